//! Stack script parser
//!
//! This module turns a stack script into a [`Script`](ast::Script):
//! - [`lexer`]: Tokenization (script text → tokens)
//! - [`parse`]: Parsing (tokens → script)
//! - [`ast`]: Declaration, operation and statement definitions
//!
//! # Script Language
//!
//! One statement per line. An optional `stack [<Type>] [<capacity>]`
//! declaration comes first; every other line is a stack operation:
//!
//! ```text
//! stack String 1000
//! push "Hello world"
//! pull
//! trim
//! ```
//!
//! Comments start with `#` or `//` and run to the end of the line.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser. No external parser generator
//! dependencies.

pub mod ast;
pub mod lexer;
pub mod parse;
