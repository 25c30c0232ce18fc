//! Sample classes used by the scenarios
//!
//! Each class is described once per process so that instances built at
//! different times share the same [`ClassDef`] and compare equal.

use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};
use deepcopy::{ClassDef, Instance, TypeHint, Value};

/// A person with a list of favorite books.
pub fn man_class() -> &'static Arc<ClassDef> {
    static CLASS: OnceLock<Arc<ClassDef>> = OnceLock::new();
    CLASS.get_or_init(|| {
        ClassDef::builder("Man")
            .field("name", TypeHint::Str)
            .field("age", TypeHint::Int)
            .field("favorite_books", TypeHint::List)
            .constructor(
                vec![TypeHint::Str, TypeHint::Int, TypeHint::List],
                |class, args| {
                    Ok(Instance::new(class)
                        .with("name", args[0].clone())?
                        .with("age", args[1].clone())?
                        .with("favorite_books", args[2].clone())?)
                },
            )
            .build()
    })
}

/// A named node whose children may lead back to it.
pub fn tree_node_class() -> &'static Arc<ClassDef> {
    static CLASS: OnceLock<Arc<ClassDef>> = OnceLock::new();
    CLASS.get_or_init(|| {
        ClassDef::builder("TreeNode")
            .field("value", TypeHint::Str)
            .field("children", TypeHint::List)
            .constructor(vec![TypeHint::Str], |class, args| {
                Ok(Instance::new(class)
                    .with("value", args[0].clone())?
                    .with("children", Value::list(Vec::new()))?)
            })
            .build()
    })
}

/// A list of collections next to a map of collections.
pub fn nested_collection_class() -> &'static Arc<ClassDef> {
    static CLASS: OnceLock<Arc<ClassDef>> = OnceLock::new();
    CLASS.get_or_init(|| {
        ClassDef::builder("NestedCollection")
            .field("collection_list", TypeHint::List)
            .field("collection_map", TypeHint::Map)
            .constructor(vec![], |class, _| {
                Ok(Instance::new(class)
                    .with("collection_list", Value::list(Vec::new()))?
                    .with("collection_map", Value::map(Vec::new()))?)
            })
            .build()
    })
}

/// A list of lists.
pub fn nested_list_class() -> &'static Arc<ClassDef> {
    static CLASS: OnceLock<Arc<ClassDef>> = OnceLock::new();
    CLASS.get_or_init(|| {
        ClassDef::builder("NestedList")
            .field("list", TypeHint::List)
            .constructor(vec![], |class, _| {
                Ok(Instance::new(class).with("list", Value::list(Vec::new()))?)
            })
            .build()
    })
}

/// Build a `Man`.
pub fn man(name: &str, age: i64, books: &[&str]) -> Result<Value> {
    let books = books.iter().copied().map(Value::from).collect();
    let instance = man_class().instantiate(&[
        Value::string(name),
        Value::Int(age),
        Value::list(books),
    ])?;
    Ok(Value::object(instance))
}

/// Build a childless `TreeNode`.
pub fn tree_node(value: &str) -> Result<Value> {
    let instance = tree_node_class().instantiate(&[Value::string(value)])?;
    Ok(Value::object(instance))
}

/// Build an empty `NestedCollection`.
pub fn nested_collection() -> Result<Value> {
    Ok(Value::object(nested_collection_class().instantiate(&[])?))
}

/// Build an empty `NestedList`.
pub fn nested_list() -> Result<Value> {
    Ok(Value::object(nested_list_class().instantiate(&[])?))
}

/// Read a field of an object value.
pub fn field(object: &Value, name: &str) -> Result<Value> {
    let handle = object
        .as_object()
        .with_context(|| format!("expected an object, found {}", object.type_name()))?;
    handle
        .get(name)
        .with_context(|| format!("`{}` has no field `{}`", handle.class().name(), name))
}

/// Append `child` to the children of `parent`.
pub fn add_child(parent: &Value, child: &Value) -> Result<()> {
    let children = field(parent, "children")?;
    children
        .as_list()
        .context("children is not a list")?
        .push(child.clone());
    Ok(())
}
