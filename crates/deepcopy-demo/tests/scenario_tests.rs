//! End-to-end copies of the sample models

use deepcopy::{deep_copy, Value};
use deepcopy_demo::models::{add_child, field, man, nested_collection, tree_node};
use pretty_assertions::assert_eq;

fn children(node: &Value) -> Vec<Value> {
    field(node, "children").unwrap().as_list().unwrap().snapshot()
}

#[test]
fn test_deep_copy_man() {
    let original = man("John Doe", 30, &["Moby Dick", "War and Peace"]).unwrap();
    let copied = deep_copy(&original).unwrap();

    assert!(!copied.ptr_eq(&original));
    assert_eq!(field(&copied, "name").unwrap(), field(&original, "name").unwrap());
    assert_eq!(field(&copied, "age").unwrap(), Value::Int(30));

    let original_books = field(&original, "favorite_books").unwrap();
    let copied_books = field(&copied, "favorite_books").unwrap();
    assert!(!copied_books.ptr_eq(&original_books));
    assert_eq!(copied_books, original_books);

    original_books
        .as_list()
        .unwrap()
        .push(Value::string("Pride and Prejudice"));

    let books = copied_books.as_list().unwrap().snapshot();
    assert_eq!(
        books,
        vec![Value::string("Moby Dick"), Value::string("War and Peace")]
    );
}

#[test]
fn test_deep_copy_with_cyclic_dependency() {
    let root = tree_node("root").unwrap();
    let child = tree_node("child").unwrap();
    add_child(&root, &child).unwrap();
    add_child(&child, &root).unwrap();

    let copied_root = deep_copy(&root).unwrap();

    assert_eq!(field(&copied_root, "value").unwrap().as_str(), Some("root"));
    assert_eq!(children(&copied_root).len(), children(&root).len());

    let copied_child = children(&copied_root)[0].clone();
    assert_eq!(field(&copied_child, "value").unwrap().as_str(), Some("child"));
    assert!(!copied_root.ptr_eq(&root));
    assert!(!copied_child.ptr_eq(&child));
    assert!(children(&copied_child)[0].ptr_eq(&copied_root));

    for node in [&child, &copied_child] {
        field(node, "children").unwrap().as_list().unwrap().write().clear();
    }
}

#[test]
fn test_deep_copy_nested_collection() {
    let original = nested_collection().unwrap();
    let list = field(&original, "collection_list").unwrap();
    let map = field(&original, "collection_map").unwrap();
    list.as_list()
        .unwrap()
        .push(Value::from(vec!["One", "Two", "Three"]));
    list.as_list()
        .unwrap()
        .push(Value::set(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
    map.as_map()
        .unwrap()
        .insert(Value::string("List"), Value::from(vec!["A", "B", "C"]));
    map.as_map().unwrap().insert(
        Value::string("Set"),
        Value::set(vec![Value::Int(4), Value::Int(5), Value::Int(6)]),
    );

    let copied = deep_copy(&original).unwrap();
    let copied_list = field(&copied, "collection_list").unwrap();
    let copied_map = field(&copied, "collection_map").unwrap();

    assert!(!copied.ptr_eq(&original));
    assert!(!copied_list.ptr_eq(&list));
    assert!(!copied_map.ptr_eq(&map));
    assert_eq!(copied_list, list);
    assert_eq!(copied_map, map);

    list.as_list().unwrap().push(Value::from(vec!["New Entry"]));
    map.as_map()
        .unwrap()
        .insert(Value::string("NewList"), Value::from(vec!["X", "Y", "Z"]));
    assert_eq!(list.len(), Some(3));
    assert_eq!(copied_list.len(), Some(2));
    assert_eq!(map.len(), Some(3));
    assert_eq!(copied_map.len(), Some(2));
}
