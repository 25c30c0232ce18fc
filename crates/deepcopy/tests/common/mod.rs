//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::{Arc, OnceLock};

use deepcopy::{ClassDef, Instance, TypeHint, Value};

/// A class with one free-form field and a no-argument constructor
pub fn holder_class() -> &'static Arc<ClassDef> {
    static CLASS: OnceLock<Arc<ClassDef>> = OnceLock::new();
    CLASS.get_or_init(|| {
        ClassDef::builder("Holder")
            .field("item", TypeHint::Any)
            .constructor(vec![], |class, _| Ok(Instance::new(class)))
            .build()
    })
}

/// A class whose only constructor takes one argument of each scalar kind
/// plus a list
pub fn record_class() -> &'static Arc<ClassDef> {
    static CLASS: OnceLock<Arc<ClassDef>> = OnceLock::new();
    CLASS.get_or_init(|| {
        ClassDef::builder("Record")
            .field("label", TypeHint::Str)
            .field("count", TypeHint::Int)
            .field("entries", TypeHint::List)
            .constructor(
                vec![TypeHint::Str, TypeHint::Int, TypeHint::List],
                |class, args| {
                    Ok(Instance::new(class)
                        .with("label", args[0].clone())?
                        .with("count", args[1].clone())?
                        .with("entries", args[2].clone())?)
                },
            )
            .build()
    })
}

pub fn holder(item: Value) -> Value {
    let instance = Instance::new(holder_class()).with("item", item).unwrap();
    Value::object(instance)
}

pub fn record(label: &str, count: i64, entries: &[&str]) -> Value {
    let entries = entries.iter().copied().map(Value::from).collect();
    Value::object(
        record_class()
            .instantiate(&[Value::string(label), Value::Int(count), Value::list(entries)])
            .unwrap(),
    )
}

pub fn field(object: &Value, name: &str) -> Value {
    object.as_object().unwrap().get(name).unwrap()
}

/// Point the holder `from` at `to`.
pub fn link(from: &Value, to: &Value) {
    from.as_object().unwrap().set("item", to.clone()).unwrap();
}

/// Cut the outgoing edges of `roots` so cyclic graphs can be freed.
pub fn break_cycles(roots: &[&Value]) {
    for root in roots {
        if let Some(list) = root.as_list() {
            list.write().clear();
        }
        if let Some(obj) = root.as_object() {
            if obj.class().field_index("item").is_some() {
                obj.set("item", Value::Null).unwrap();
            }
        }
    }
}
