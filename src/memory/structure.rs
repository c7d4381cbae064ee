//! Container contracts
//!
//! - [`Structure`]: the basic push/pull/size/clear contract
//! - [`SumpStack`]: a [`Structure`] with batch extension points
//!
//! Both are implemented by [`TypedStack`], which forwards to its inherent
//! methods.

use super::errors::StackError;
use super::stack::TypedStack;
use super::value::Tagged;

/// Basic container contract
pub trait Structure {
    type Item;

    fn push(&mut self, entry: Self::Item) -> Result<(), StackError>;

    fn pull(&mut self) -> Option<Self::Item>;

    fn size(&self) -> usize;

    fn clear(&mut self);
}

/// Stack contract with batch insertion and removal
///
/// The batch operations are extension points without defined semantics:
/// implementations treat them as no-ops.
pub trait SumpStack: Structure {
    fn push_batch(&mut self, batch: Vec<Self::Item>);

    fn pull_batch(&mut self) -> Vec<Self::Item>;
}

impl<T: Tagged> Structure for TypedStack<T> {
    type Item = T;

    fn push(&mut self, entry: T) -> Result<(), StackError> {
        TypedStack::push(self, entry)
    }

    fn pull(&mut self) -> Option<T> {
        TypedStack::pull(self)
    }

    fn size(&self) -> usize {
        TypedStack::size(self)
    }

    fn clear(&mut self) {
        TypedStack::clear(self)
    }
}

impl<T: Tagged> SumpStack for TypedStack<T> {
    fn push_batch(&mut self, batch: Vec<T>) {
        TypedStack::push_batch(self, batch)
    }

    fn pull_batch(&mut self) -> Vec<T> {
        TypedStack::pull_batch(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::value::{Value, ValueType};

    /// Drain any structure through the trait surface only
    fn drain<S: Structure>(structure: &mut S) -> Vec<S::Item> {
        let mut out = Vec::new();
        while let Some(item) = structure.pull() {
            out.push(item);
        }
        out
    }

    #[test]
    fn test_trait_surface_is_lifo() {
        let mut stack: TypedStack<Value> = TypedStack::untyped();
        Structure::push(&mut stack, Value::Integer(1)).unwrap();
        Structure::push(&mut stack, Value::from("two")).unwrap();
        assert_eq!(Structure::size(&stack), 2);

        let pulled = drain(&mut stack);
        assert_eq!(pulled, vec![Value::from("two"), Value::Integer(1)]);
    }

    #[test]
    fn test_trait_push_checks_type() {
        let mut stack: TypedStack<Value> = TypedStack::typed(ValueType::String);
        let result = Structure::push(&mut stack, Value::Object);
        assert!(matches!(result, Err(StackError::TypeMismatch { .. })));
    }

    #[test]
    fn test_sump_stack_batches_are_noops() {
        let mut stack: TypedStack<Value> = TypedStack::untyped();
        SumpStack::push_batch(&mut stack, vec![Value::Integer(1)]);
        assert_eq!(Structure::size(&stack), 0);
        assert!(SumpStack::pull_batch(&mut stack).is_empty());

        Structure::clear(&mut stack);
        assert_eq!(stack.capacity(), 0);
    }
}
