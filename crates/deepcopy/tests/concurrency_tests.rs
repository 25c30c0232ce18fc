//! Concurrent copy calls

mod common;

use std::thread;

use common::*;
use deepcopy::*;

#[test]
fn test_parallel_copies_of_one_graph() {
    let shared = Value::list(vec![Value::Int(1), Value::string("s")]);
    let original = Value::list(vec![shared.clone(), holder(shared), record("M", 1, &["B"])]);
    let copier = DeepCopier::new();

    let copies: Vec<Value> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| copier.copy(&original).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, copy) in copies.iter().enumerate() {
        assert_eq!(copy, &original);
        let items = copy.as_list().unwrap().snapshot();
        assert!(items[0].ptr_eq(&field(&items[1], "item")));
        for other in &copies[i + 1..] {
            assert!(!copy.ptr_eq(other));
        }
    }
}

#[test]
fn test_interrupt_from_another_thread() {
    let context = CopyContext::new();
    let copier = DeepCopier::new().with_context(context.clone());

    let mut value = Value::Int(0);
    for _ in 0..1_000 {
        value = Value::list(vec![value]);
    }

    thread::scope(|scope| {
        scope.spawn(|| context.interrupt());
    });
    assert!(matches!(copier.copy(&value), Err(CopyError::Interrupted)));
}
