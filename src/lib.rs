//! # Introduction
//!
//! Sump is a growable, optionally typed LIFO stack. Its buffer starts at a
//! fixed capacity and stretches by 70% (at least one slot) whenever a push
//! finds it full. `trim` shrinks it back to the live size and `clear` releases
//! it entirely.
//!
//! The crate also ships a slot visualizer: a small script language drives a
//! stack one operation at a time, a snapshot of the stack is captured after
//! every operation, and the history is navigated forward and backward through
//! a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Script → Lexer → Parser → Script AST → Runner → Snapshots → TUI
//! ```
//!
//! 1. [`memory`]: the stack itself, [`memory::stack::TypedStack`], its
//!    container traits and the tagged [`memory::value::Value`] model.
//! 2. [`script`]: tokenizes a stack script and builds its statement list.
//! 3. [`runner`]: executes statements and captures [`snapshot::Snapshot`]s.
//! 4. [`snapshot`]: snapshot history with a configurable memory limit and
//!    the [`snapshot::OutputLog`] of operation outcomes.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Using the stack directly
//!
//! ```
//! use sump::memory::stack::TypedStack;
//! use sump::memory::value::{Value, ValueType};
//!
//! let mut stack: TypedStack<Value> = TypedStack::new_typed(ValueType::String, 3);
//! stack.push(Value::from("a")).unwrap();
//! assert!(stack.push(Value::Integer(1)).is_err());
//! assert_eq!(stack.pull(), Some(Value::from("a")));
//! ```

pub mod memory;
pub mod runner;
pub mod script;
pub mod snapshot;
pub mod ui;
