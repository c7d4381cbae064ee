//! Stack container and its value model
//!
//! This module provides the core abstractions:
//! - [`stack`]: [`TypedStack`](stack::TypedStack), the growable slot buffer
//! - [`structure`]: `Structure` / `SumpStack` container contracts
//! - [`value`]: Runtime value representation and type tags
//! - [`errors`]: The single push failure, `TypeMismatch`
//! - [`constants`]: Default capacity and growth ratio
//!
//! # Growth Policy
//!
//! Growth is additive-relative rather than doubling:
//! ```text
//! new_capacity = capacity + max(floor(capacity * 0.7), 1)
//! ```
//! Starting from the default capacity this yields
//! `10 → 17 → 28 → 47 → 79 → 134 → 227 → ...`.

pub mod constants;
pub mod errors;
pub mod stack;
pub mod structure;
pub mod value;

use constants::{DEFAULT_STRETCH_RATIO, MIN_STRETCH};

/// Capacity a full buffer of `capacity` slots grows to
pub fn stretched_capacity(capacity: usize) -> usize {
    // Truncating cast: the stretch is floor(capacity * ratio)
    let stretch = (capacity as f64 * DEFAULT_STRETCH_RATIO) as usize;
    capacity + stretch.max(MIN_STRETCH)
}
