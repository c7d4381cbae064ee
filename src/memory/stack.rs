//! Growable LIFO stack with optional runtime type enforcement
//!
//! This module provides the container at the heart of the crate:
//! - [`TypedStack`]: a contiguous buffer of slots with an offset-based top
//! - [`Slot`]: a single buffer entry, either holding a value or empty
//!
//! # Buffer Layout
//!
//! ```text
//!  index:   0     1     2     3     4     5     6
//!         ┌─────┬─────┬─────┬─────┬─────┬─────┬─────┐
//!         │ "a" │ "b" │ "c" │  ·  │  ·  │  ·  │  ·  │
//!         └─────┴─────┴─────┴─────┴─────┴─────┴─────┘
//!                            ▲                       ▲
//!                          size                  capacity
//! ```
//!
//! Slots below `size` are live; slots from `size` up to `capacity` are always
//! empty. Pulling moves the value out of its slot, so nothing is retained for
//! removed elements even though the buffer does not shrink.
//!
//! # Growth
//!
//! A push into a full buffer grows it by [`stretched_capacity`]: the old
//! capacity plus 70% of it (rounded down, at least one slot). Growth and
//! [`TypedStack::trim`] both build a fresh buffer and move the live values
//! across.
//!
//! # Clearing
//!
//! [`TypedStack::clear`] deallocates: afterwards both `size` and `capacity`
//! are zero, and the next push regrows from an empty buffer.

use super::constants::DEFAULT_INITIAL_CAPACITY;
use super::errors::StackError;
use super::stretched_capacity;
use super::value::{Tagged, ValueType};

/// A single entry in the stack buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Slot<T> {
    value: Option<T>,
}

impl<T> Slot<T> {
    fn empty() -> Self {
        Slot { value: None }
    }

    fn occupied(value: T) -> Self {
        Slot { value: Some(value) }
    }

    /// The stored value, if the slot is live
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_occupied(&self) -> bool {
        self.value.is_some()
    }

    /// Move the value out, leaving the slot empty
    fn release(&mut self) -> Option<T> {
        self.value.take()
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::empty()
    }
}

/// Dynamically growing LIFO stack, optionally restricted to one element type
#[derive(Debug, Clone)]
pub struct TypedStack<T> {
    slots: Box<[Slot<T>]>,
    size: usize, // Live count; also the index of the next free slot
    element_type: Option<ValueType>,
}

impl<T> TypedStack<T> {
    /// Create an untyped stack with `capacity` pre-allocated slots
    pub fn new(capacity: usize) -> Self {
        TypedStack {
            slots: allocate(capacity),
            size: 0,
            element_type: None,
        }
    }

    /// Create a stack that only accepts values of `element_type`
    pub fn new_typed(element_type: ValueType, capacity: usize) -> Self {
        TypedStack {
            slots: allocate(capacity),
            size: 0,
            element_type: Some(element_type),
        }
    }

    /// Untyped stack with the default capacity
    pub fn untyped() -> Self {
        Self::new(DEFAULT_INITIAL_CAPACITY)
    }

    /// Typed stack with the default capacity
    pub fn typed(element_type: ValueType) -> Self {
        Self::new_typed(element_type, DEFAULT_INITIAL_CAPACITY)
    }

    /// Remove and return the top value, or `None` if the stack is empty
    pub fn pull(&mut self) -> Option<T> {
        if self.size == 0 {
            return None;
        }

        self.size -= 1;
        self.slots[self.size].release()
    }

    /// Number of live values
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of slots in the buffer
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_typed(&self) -> bool {
        self.element_type.is_some()
    }

    /// The declared element type of a typed stack
    pub fn element_type(&self) -> Option<ValueType> {
        self.element_type
    }

    /// Read-only view of the whole buffer, live and empty slots alike
    pub fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }

    /// Drop every value and release the buffer: size and capacity become 0
    pub fn clear(&mut self) {
        self.slots = allocate(0);
        self.size = 0;
    }

    /// Shrink the buffer to exactly `size` slots
    pub fn trim(&mut self) {
        if self.capacity() > self.size {
            self.relocate(self.size);
        }
    }

    /// Batch insertion is declared but not implemented; the batch is dropped
    /// and the stack is left unchanged.
    pub fn push_batch(&mut self, _batch: Vec<T>) {}

    /// Batch removal is declared but not implemented; always returns an empty
    /// batch and leaves the stack unchanged.
    pub fn pull_batch(&mut self) -> Vec<T> {
        Vec::new()
    }

    fn grow(&mut self) {
        self.relocate(stretched_capacity(self.capacity()));
    }

    /// Move the live values into a fresh buffer of `new_capacity` slots
    fn relocate(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity >= self.size);
        let mut slots = allocate(new_capacity);
        for (dst, src) in slots.iter_mut().zip(self.slots[..self.size].iter_mut()) {
            *dst = std::mem::take(src);
        }
        self.slots = slots;
    }
}

impl<T: Tagged> TypedStack<T> {
    /// Push a value on top of the stack
    ///
    /// A typed stack rejects values of any other type with
    /// [`StackError::TypeMismatch`] and is left untouched.
    pub fn push(&mut self, value: T) -> Result<(), StackError> {
        if let Some(declared) = self.element_type {
            let actual = value.value_type();
            if actual != declared {
                return Err(StackError::TypeMismatch { actual, declared });
            }
        }

        if self.size == self.capacity() {
            self.grow();
        }

        self.slots[self.size] = Slot::occupied(value);
        self.size += 1;
        Ok(())
    }
}

impl<T> Default for TypedStack<T> {
    fn default() -> Self {
        Self::untyped()
    }
}

fn allocate<T>(capacity: usize) -> Box<[Slot<T>]> {
    (0..capacity).map(|_| Slot::empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::value::Value;

    #[test]
    fn test_pull_releases_slot() {
        let mut stack: TypedStack<Value> = TypedStack::new(4);
        stack.push(Value::from("a")).unwrap();
        stack.push(Value::from("b")).unwrap();

        assert_eq!(stack.pull(), Some(Value::from("b")));
        assert!(stack.slots()[0].is_occupied());
        assert!(!stack.slots()[1].is_occupied());
        assert_eq!(stack.slots().len(), 4);
    }

    #[test]
    fn test_growth_preserves_order() {
        let mut stack: TypedStack<i32> = TypedStack::new(2);
        for i in 0..3 {
            stack.push(i).unwrap();
        }

        assert_eq!(stack.capacity(), 3);
        let live: Vec<i32> = stack
            .slots()
            .iter()
            .filter_map(|s| s.value().copied())
            .collect();
        assert_eq!(live, vec![0, 1, 2]);
    }

    #[test]
    fn test_zero_capacity_grows_by_one() {
        let mut stack: TypedStack<i32> = TypedStack::new(0);
        stack.push(1).unwrap();
        assert_eq!(stack.capacity(), 1);
        stack.push(2).unwrap();
        assert_eq!(stack.capacity(), 2);
        stack.push(3).unwrap();
        assert_eq!(stack.capacity(), 3);
        assert_eq!(stack.size(), 3);
    }

    #[test]
    fn test_push_after_clear() {
        let mut stack: TypedStack<Value> = TypedStack::typed(ValueType::Integer);
        stack.push(Value::Integer(7)).unwrap();
        stack.clear();

        assert_eq!(stack.capacity(), 0);
        stack.push(Value::Integer(8)).unwrap();
        assert_eq!(stack.capacity(), 1);
        assert_eq!(stack.pull(), Some(Value::Integer(8)));
        assert!(stack.is_typed());
    }

    #[test]
    fn test_trim_keeps_top() {
        let mut stack: TypedStack<i64> = TypedStack::new(8);
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        stack.trim();

        assert_eq!(stack.capacity(), 2);
        assert_eq!(stack.pull(), Some(2));
        assert_eq!(stack.pull(), Some(1));
        assert_eq!(stack.pull(), None);
    }

    #[test]
    fn test_native_stack_rejects_other_declared_type() {
        let mut stack: TypedStack<String> = TypedStack::typed(ValueType::Integer);
        let err = stack.push("x".to_string()).unwrap_err();
        assert_eq!(
            err,
            StackError::TypeMismatch {
                actual: ValueType::String,
                declared: ValueType::Integer,
            }
        );
        assert_eq!(stack.size(), 0);
    }

    #[test]
    fn test_batch_extension_points_are_inert() {
        let mut stack: TypedStack<i32> = TypedStack::untyped();
        stack.push(1).unwrap();
        stack.push_batch(vec![2, 3, 4]);
        assert_eq!(stack.size(), 1);
        assert!(stack.pull_batch().is_empty());
        assert_eq!(stack.size(), 1);
    }
}
