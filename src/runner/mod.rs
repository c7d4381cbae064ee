//! Script execution engine
//!
//! This module provides the run logic:
//! - [`engine`]: [`Runner`](engine::Runner), which executes a script against a stack
//! - [`errors`]: Run error types
//!
//! # Execution Model
//!
//! The runner executes the script's operations one at a time against a
//! `TypedStack<Value>`. A snapshot is taken before the first operation and
//! after every operation, so the whole run can be stepped through backward and
//! forward afterwards.
//!
//! A rejected push does not stop the run: the error is written to the output
//! log for that step, the stack is left as it was, and execution continues.

pub mod engine;
pub mod errors;
