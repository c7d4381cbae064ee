//! Runtime value representation
//!
//! This module defines the [`Value`] enum, the dynamically-typed wrapper stored
//! by untyped stacks, and [`ValueType`], the runtime type descriptor a typed
//! stack is declared with.
//!
//! # Value Types
//!
//! - [`Value::String`]: UTF-8 string
//! - [`Value::Integer`]: 32-bit signed integer
//! - [`Value::Long`]: 64-bit signed integer
//! - [`Value::Double`]: 64-bit float
//! - [`Value::Boolean`]: `true` / `false`
//! - [`Value::List`]: ordered list of values
//! - [`Value::Map`]: string-keyed map of values
//! - [`Value::Object`]: plain object without a payload
//!
//! # Type Tags
//!
//! Anything that can be pushed onto a [`TypedStack`](super::stack::TypedStack)
//! implements [`Tagged`], which reports the value's [`ValueType`] at runtime.
//! `Value` reports the tag of its variant; the native payload types report a
//! fixed tag, so a `TypedStack<String>` is homogeneous at compile time as well.

use rustc_hash::FxHashMap;
use std::fmt;

/// Values that can be stored on a stack
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i32),
    Long(i64),
    Double(f64),
    Boolean(bool),
    List(Vec<Value>),
    Map(FxHashMap<String, Value>), // Key -> value
    Object,
}

/// Runtime type descriptor, one per [`Value`] variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Integer,
    Long,
    Double,
    Boolean,
    List,
    Map,
    Object,
}

impl ValueType {
    /// All type descriptors, in declaration order
    pub const ALL: [ValueType; 8] = [
        ValueType::String,
        ValueType::Integer,
        ValueType::Long,
        ValueType::Double,
        ValueType::Boolean,
        ValueType::List,
        ValueType::Map,
        ValueType::Object,
    ];

    /// Simple type name, as used in error messages and scripts
    pub fn name(self) -> &'static str {
        match self {
            ValueType::String => "String",
            ValueType::Integer => "Integer",
            ValueType::Long => "Long",
            ValueType::Double => "Double",
            ValueType::Boolean => "Boolean",
            ValueType::List => "List",
            ValueType::Map => "Map",
            ValueType::Object => "Object",
        }
    }

    /// Look up a type descriptor by its simple name
    pub fn from_name(name: &str) -> Option<ValueType> {
        ValueType::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reports the runtime type of a value
pub trait Tagged {
    fn value_type(&self) -> ValueType;
}

impl Tagged for Value {
    fn value_type(&self) -> ValueType {
        match self {
            Value::String(_) => ValueType::String,
            Value::Integer(_) => ValueType::Integer,
            Value::Long(_) => ValueType::Long,
            Value::Double(_) => ValueType::Double,
            Value::Boolean(_) => ValueType::Boolean,
            Value::List(_) => ValueType::List,
            Value::Map(_) => ValueType::Map,
            Value::Object => ValueType::Object,
        }
    }
}

impl Tagged for String {
    fn value_type(&self) -> ValueType {
        ValueType::String
    }
}

impl Tagged for i32 {
    fn value_type(&self) -> ValueType {
        ValueType::Integer
    }
}

impl Tagged for i64 {
    fn value_type(&self) -> ValueType {
        ValueType::Long
    }
}

impl Tagged for f64 {
    fn value_type(&self) -> ValueType {
        ValueType::Double
    }
}

impl Tagged for bool {
    fn value_type(&self) -> ValueType {
        ValueType::Boolean
    }
}

impl Value {
    /// Get the string payload, returns None if not a String
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer payload, returns None if not an Integer
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the long payload, returns None if not a Long
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the double payload, returns None if not a Double
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&FxHashMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Check if this value is a plain object
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Long(n) => write!(f, "{}L", n),
            Value::Double(d) => write!(f, "{:?}", d),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                // Sorted so the rendering is stable across runs
                let mut keys: Vec<&String> = entries.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", key, entries[key])?;
                }
                write!(f, "}}")
            }
            Value::Object => write!(f, "object"),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Long(n)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<FxHashMap<String, Value>> for Value {
    fn from(entries: FxHashMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tags_match_variants() {
        assert_eq!(Value::from("a").value_type(), ValueType::String);
        assert_eq!(Value::from(1).value_type(), ValueType::Integer);
        assert_eq!(Value::from(1_i64).value_type(), ValueType::Long);
        assert_eq!(Value::from(1.5).value_type(), ValueType::Double);
        assert_eq!(Value::from(true).value_type(), ValueType::Boolean);
        assert_eq!(Value::List(Vec::new()).value_type(), ValueType::List);
        assert_eq!(Value::Map(FxHashMap::default()).value_type(), ValueType::Map);
        assert_eq!(Value::Object.value_type(), ValueType::Object);
    }

    #[test]
    fn test_type_names_round_trip() {
        for t in ValueType::ALL {
            assert_eq!(ValueType::from_name(t.name()), Some(t));
        }
        assert_eq!(ValueType::from_name("string"), None);
    }

    #[test]
    fn test_display_map_is_sorted() {
        let mut entries = FxHashMap::default();
        entries.insert("b".to_string(), Value::Integer(2));
        entries.insert("a".to_string(), Value::from("x"));
        assert_eq!(Value::Map(entries).to_string(), r#"{"a": "x", "b": 2}"#);
    }

    #[test]
    fn test_accessors_reject_other_variants() {
        let v = Value::Long(5);
        assert_eq!(v.as_long(), Some(5));
        assert_eq!(v.as_integer(), None);
        assert!(v.as_str().is_none());
    }
}
