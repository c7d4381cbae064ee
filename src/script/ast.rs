// AST definitions for stack scripts

use crate::memory::constants::DEFAULT_INITIAL_CAPACITY;
use crate::memory::stack::TypedStack;
use crate::memory::value::{Value, ValueType};

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// The `stack [<Type>] [<capacity>]` header
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub element_type: Option<ValueType>,
    pub capacity: usize,
    pub location: SourceLocation,
}

impl Declaration {
    /// Build the stack this declaration describes
    pub fn build(&self) -> TypedStack<Value> {
        match self.element_type {
            Some(element_type) => TypedStack::new_typed(element_type, self.capacity),
            None => TypedStack::new(self.capacity),
        }
    }
}

/// A single stack operation
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Push(Value),
    Pull(usize), // Number of pulls
    Drain,
    Trim,
    Clear,
    PushBatch(Vec<Value>),
    PullBatch,
}

impl Op {
    /// Keyword that introduces this operation in a script
    pub fn keyword(&self) -> &'static str {
        match self {
            Op::Push(_) => "push",
            Op::Pull(_) => "pull",
            Op::Drain => "drain",
            Op::Trim => "trim",
            Op::Clear => "clear",
            Op::PushBatch(_) => "push_batch",
            Op::PullBatch => "pull_batch",
        }
    }
}

/// An operation together with where it was written
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub op: Op,
    pub location: SourceLocation,
}

/// A parsed script: an optional declaration followed by operations
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    pub declaration: Option<Declaration>,
    pub statements: Vec<Statement>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the stack the script runs against.
    /// Without a declaration this is an untyped stack with the default capacity.
    pub fn build_stack(&self) -> TypedStack<Value> {
        match &self.declaration {
            Some(declaration) => declaration.build(),
            None => TypedStack::new(DEFAULT_INITIAL_CAPACITY),
        }
    }
}
