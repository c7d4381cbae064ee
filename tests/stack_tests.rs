// Integration tests for the typed stack container

use sump::memory::errors::StackError;
use sump::memory::stack::TypedStack;
use sump::memory::structure::{Structure, SumpStack};
use sump::memory::value::{Value, ValueType};

#[test]
fn test_default_capacity_and_clear() {
    let mut stack: TypedStack<Value> = TypedStack::untyped();
    assert_eq!(stack.capacity(), 10);
    assert_eq!(stack.size(), 0);

    stack.clear();
    assert_eq!(stack.capacity(), 0);
    assert_eq!(stack.size(), 0);

    let stack: TypedStack<Value> = TypedStack::new(1000);
    assert_eq!(stack.capacity(), 1000);
}

#[test]
fn test_typed_stack_rejects_other_types() {
    let mut stack: TypedStack<Value> = TypedStack::new_typed(ValueType::String, 1000);
    assert_eq!(stack.element_type(), Some(ValueType::String));

    let err = stack.push(Value::Object).unwrap_err();
    assert_eq!(
        err,
        StackError::TypeMismatch {
            actual: ValueType::Object,
            declared: ValueType::String,
        }
    );
    assert_eq!(
        err.to_string(),
        "Unable to push type Object to stack typed by String"
    );
    assert_eq!(stack.size(), 0);

    stack.push(Value::from("Hello world")).expect("String push failed");
    assert_eq!(stack.size(), 1);

    // A rejected push leaves a non-empty stack untouched too
    assert!(matches!(
        stack.push(Value::Integer(5)),
        Err(StackError::TypeMismatch {
            actual: ValueType::Integer,
            declared: ValueType::String,
        })
    ));
    assert_eq!(stack.size(), 1);
    assert_eq!(stack.capacity(), 1000);
    assert_eq!(stack.pull(), Some(Value::from("Hello world")));
}

#[test]
fn test_growth_on_full_buffer() {
    let mut stack: TypedStack<Value> = TypedStack::untyped();
    for i in 0..11 {
        stack.push(Value::Integer(i)).expect("push failed");
    }
    assert_eq!(stack.capacity(), 17);

    let mut small: TypedStack<Value> = TypedStack::new(3);
    for i in 0..5 {
        small.push(Value::Integer(i)).expect("push failed");
    }
    assert_eq!(small.capacity(), 5);
}

#[test]
fn test_pulling_never_shrinks() {
    let mut stack: TypedStack<Value> = TypedStack::untyped();
    for i in 0..100 {
        stack.push(Value::Integer(i)).expect("push failed");
    }
    for _ in 0..100 {
        assert!(stack.pull().is_some());
    }
    assert_eq!(stack.size(), 0);
    assert_eq!(stack.capacity(), 134);
}

#[test]
fn test_untyped_stack_holds_heterogeneous_values() {
    let mut stack: TypedStack<Value> = TypedStack::untyped();
    let mut map = rustc_hash::FxHashMap::default();
    map.insert("1".to_string(), Value::from("String value"));

    let values = vec![
        Value::from("String"),
        Value::Integer(1),
        Value::Long(4_000_000_000),
        Value::Double(2.123),
        Value::List(vec![Value::Integer(5)]),
        Value::Map(map),
        Value::Object,
    ];
    for value in values.iter().cloned() {
        stack.push(value).expect("untyped push failed");
    }

    for expected in values.iter().rev() {
        assert_eq!(stack.pull().as_ref(), Some(expected));
    }
    assert_eq!(stack.pull(), None);
}

#[test]
fn test_trim_relocates_to_size() {
    let mut stack: TypedStack<Value> = TypedStack::new(15);
    for i in 0..10 {
        stack.push(Value::Integer(i)).expect("push failed");
    }
    stack.trim();
    assert_eq!(stack.capacity(), 10);
    assert_eq!(stack.size(), 10);
    assert_eq!(stack.pull(), Some(Value::Integer(9)));
}

#[test]
fn test_trim_on_full_buffer_is_noop() {
    let mut stack: TypedStack<Value> = TypedStack::new(3);
    for i in 0..3 {
        stack.push(Value::Integer(i)).expect("push failed");
    }
    stack.trim();

    assert_eq!((stack.size(), stack.capacity()), (3, 3));
    assert_eq!(stack.pull(), Some(Value::Integer(2)));
}

#[test]
fn test_clear_after_growth() {
    let mut stack: TypedStack<Value> = TypedStack::new(2);
    for i in 0..5 {
        stack.push(Value::Integer(i)).expect("push failed");
    }
    assert_eq!(stack.capacity(), 5);

    stack.clear();
    assert_eq!((stack.size(), stack.capacity()), (0, 0));
    assert_eq!(stack.pull(), None);
}

#[test]
fn test_pull_from_empty_stack() {
    let mut stack: TypedStack<Value> = TypedStack::untyped();
    assert_eq!(stack.pull(), None);
    assert_eq!(stack.size(), 0);
}

#[test]
fn test_ten_thousand_pushes_then_drain_and_trim() {
    let mut stack: TypedStack<Value> = TypedStack::untyped();
    for i in 0..10_000 {
        stack.push(Value::Integer(i)).expect("push failed");
    }
    assert_eq!(stack.size(), 10_000);
    assert_eq!(stack.capacity(), 15764);

    while stack.pull().is_some() {}
    assert_eq!(stack.capacity(), 15764);

    stack.trim();
    assert_eq!(stack.capacity(), 0);
}

#[test]
fn test_size_after_pushes_and_pulls() {
    let mut stack: TypedStack<Value> = TypedStack::untyped();
    for i in 0..25 {
        stack.push(Value::Integer(i)).expect("push failed");
    }
    for _ in 0..7 {
        stack.pull();
    }
    assert_eq!(stack.size(), 18);

    // Extra pulls past empty do not underflow
    for _ in 0..30 {
        stack.pull();
    }
    assert_eq!(stack.size(), 0);
}

#[test]
fn test_push_then_pull_is_identity() {
    let mut stack: TypedStack<Value> = TypedStack::untyped();
    stack.push(Value::Integer(1)).expect("push failed");
    let before = stack.clone();

    stack.push(Value::from("x")).expect("push failed");
    assert_eq!(stack.pull(), Some(Value::from("x")));
    assert_eq!(stack.size(), before.size());
    assert_eq!(stack.pull(), Some(Value::Integer(1)));
}

#[test]
fn test_primitive_element_types_through_traits() {
    fn fill<S: SumpStack<Item = String>>(stack: &mut S) {
        stack.push("a".to_string()).expect("push failed");
        stack.push("b".to_string()).expect("push failed");
        stack.push_batch(vec!["c".to_string()]);
    }

    let mut stack: TypedStack<String> = TypedStack::typed(ValueType::String);
    fill(&mut stack);
    assert_eq!(Structure::size(&stack), 2);
    assert!(SumpStack::pull_batch(&mut stack).is_empty());
    assert_eq!(Structure::pull(&mut stack).as_deref(), Some("b"));

    let mut longs: TypedStack<i64> = TypedStack::typed(ValueType::String);
    assert!(longs.push(7).is_err());
}
