//! Error types for the stack container
//!
//! This module defines [`StackError`]. The container has exactly one failure
//! mode: pushing a value whose runtime type differs from the type a typed
//! stack was declared with. Every other operation is total.

use super::value::ValueType;
use std::fmt;

/// Errors that can occur when mutating a stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    /// A typed stack rejected a value of a different type.
    /// The stack is left exactly as it was before the push.
    TypeMismatch {
        actual: ValueType,
        declared: ValueType,
    },
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackError::TypeMismatch { actual, declared } => {
                write!(
                    f,
                    "Unable to push type {} to stack typed by {}",
                    actual, declared
                )
            }
        }
    }
}

impl std::error::Error for StackError {}
