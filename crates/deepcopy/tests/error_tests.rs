//! Copy failures and absent fields

mod common;

use std::error::Error as _;
use std::sync::Arc;

use common::*;
use deepcopy::*;
use pretty_assertions::assert_eq;

#[test]
fn test_class_without_constructor_fails() {
    let socket = ClassDef::builder("Socket")
        .field("fd", TypeHint::Int)
        .build();
    let original = Value::list(vec![Value::object(Instance::new(&socket))]);

    let err = deep_copy(&original).unwrap_err();
    assert!(matches!(err, CopyError::NoConstructor { ref class } if class == "Socket"));
}

#[test]
fn test_failing_constructor_keeps_its_error() {
    let account = ClassDef::builder("Account")
        .field("balance", TypeHint::Int)
        .constructor(vec![TypeHint::Int], |class, args| {
            anyhow::ensure!(
                args[0].as_int().unwrap_or(0) > 0,
                "opening balance must be positive"
            );
            Ok(Instance::new(class))
        })
        .build();
    let original = Value::object(
        Instance::new(&account)
            .with("balance", Value::Int(100))
            .unwrap(),
    );

    let err = deep_copy(&original).unwrap_err();
    assert_eq!(err.to_string(), "Constructor of `Account` failed");
    assert_eq!(
        err.source().map(|s| s.to_string()),
        Some("opening balance must be positive".to_string())
    );
}

#[test]
fn test_failure_deep_in_the_graph_fails_the_call() {
    let broken = ClassDef::builder("Broken").build();
    let original = record("John", 30, &[]);
    field(&original, "entries")
        .as_list()
        .unwrap()
        .push(Value::object(Instance::new(&broken)));

    assert!(deep_copy(&original).is_err());
}

#[test]
fn test_absent_fields_stay_absent() {
    let class = ClassDef::builder("Profile")
        .field("nickname", TypeHint::Str)
        .field("tags", TypeHint::List)
        .constructor(vec![TypeHint::List], |class, args| {
            Ok(Instance::new(class)
                .with("nickname", Value::string("anonymous"))?
                .with("tags", args[0].clone())?)
        })
        .build();
    let original = Value::object(Instance::new(&class));
    assert!(field(&original, "tags").is_null());

    let copied = deep_copy(&original).unwrap();
    assert!(field(&copied, "nickname").is_null());
    assert!(field(&copied, "tags").is_null());
    assert_eq!(copied, original);
}

#[test]
fn test_constructor_side_values_are_overwritten() {
    let class = ClassDef::builder("Counter")
        .field("count", TypeHint::Int)
        .constructor(vec![], |class, _| {
            Ok(Instance::new(class).with("count", Value::Int(-1))?)
        })
        .build();
    let original = Value::object(
        Instance::new(&class)
            .with("count", Value::Int(12))
            .unwrap(),
    );
    let copied = deep_copy(&original).unwrap();
    assert_eq!(field(&copied, "count"), Value::Int(12));
}

#[test]
fn test_shell_keeps_the_exact_class() {
    let base = holder_class();
    let copied = deep_copy(&holder(Value::Int(1))).unwrap();
    assert!(Arc::ptr_eq(&copied.as_object().unwrap().class(), base));
}

#[test]
fn test_node_limit_counts_distinct_nodes() {
    let shared = Value::list(vec![]);
    let original = Value::list(vec![shared.clone(), shared.clone(), shared]);
    let copier = DeepCopier::new().with_context(CopyContext::with_max_nodes(2));
    assert!(copier.copy(&original).is_ok());

    let wide = Value::list(vec![Value::list(vec![]), Value::list(vec![])]);
    let err = copier.copy(&wide).unwrap_err();
    assert_eq!(err.to_string(), "Copy aborted: more than 2 nodes reached");
}

#[test]
fn test_interrupt_can_be_reset() {
    let context = CopyContext::new();
    let copier = DeepCopier::new().with_context(context.clone());
    context.interrupt();
    assert!(matches!(
        copier.copy(&Value::list(vec![])),
        Err(CopyError::Interrupted)
    ));
    context.reset_interrupt();
    assert!(copier.copy(&Value::list(vec![])).is_ok());
}
