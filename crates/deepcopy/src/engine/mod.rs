//! The deep-copy engine
//!
//! A copy call runs in two phases per node. *Allocation* (see [`dispatch`])
//! classifies a value, builds an empty shell of the same shape, registers
//! `(original, shell)` in the call's tracker and queues a fill task. *Filling*
//! (see `containers` and `object`) copies the original's children into the
//! shell. Children are themselves only allocated, never filled recursively,
//! so the call stack stays flat however deep the graph is.

mod containers;
pub mod defaults;
pub mod dispatch;
mod object;
mod tracker;

pub use dispatch::{classify, Shape};

use log::debug;

use crate::context::CopyContext;
use crate::error::{CopyError, Result};
use crate::registry::TypeRegistry;
use crate::value::{
    ArrayRef, CollectionRef, DequeRef, ListRef, MapRef, ObjectRef, SetRef, Value,
};
use tracker::ReferenceTracker;

/// Produces independent copies of value graphs.
///
/// A copier holds configuration only. Each call to [`DeepCopier::copy`] owns
/// its own tracker, so one copier can serve concurrent calls.
///
/// # Example
///
/// ```
/// use deepcopy::{DeepCopier, Value};
///
/// let books = Value::list(vec![Value::string("Moby Dick")]);
/// let copy = DeepCopier::new().copy(&books).unwrap();
///
/// books.as_list().unwrap().push(Value::string("War and Peace"));
///
/// assert_eq!(copy.len(), Some(1));
/// assert!(!copy.ptr_eq(&books));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeepCopier {
    registry: TypeRegistry,
    context: CopyContext,
}

impl DeepCopier {
    /// Create a copier with the default registry and an unbounded context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a copier with a custom registry.
    pub fn with_registry(registry: TypeRegistry) -> Self {
        Self {
            registry,
            context: CopyContext::default(),
        }
    }

    /// Replace the copy context (builder pattern).
    pub fn with_context(mut self, context: CopyContext) -> Self {
        self.context = context;
        self
    }

    /// The registry consulted by this copier
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Mutable access to the registry
    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    /// The context consulted by this copier
    pub fn context(&self) -> &CopyContext {
        &self.context
    }

    /// Copy a value graph.
    ///
    /// Returns `Value::Null` for `Value::Null`. On failure nothing of the
    /// partial copy survives the call.
    pub fn copy(&self, value: &Value) -> Result<Value> {
        let mut session = Session::new(&self.registry, &self.context);
        debug!("deep copy of {} started", value.type_name());
        match session.run(value) {
            Ok(copy) => {
                debug!("deep copy finished, {} nodes copied", session.tracker.len());
                Ok(copy)
            }
            Err(err) => {
                debug!(
                    "deep copy failed: {}; discarding {} tracked nodes",
                    err,
                    session.tracker.len()
                );
                Err(err)
            }
        }
    }
}

/// Copy a value graph with the default registry and context.
///
/// # Example
///
/// ```
/// use deepcopy::{deep_copy, Value};
///
/// let original = Value::map(vec![(Value::string("k"), Value::list(vec![]))]);
/// let copy = deep_copy(&original).unwrap();
/// assert_eq!(copy, original);
/// assert!(!copy.ptr_eq(&original));
/// ```
pub fn deep_copy(value: &Value) -> Result<Value> {
    DeepCopier::new().copy(value)
}

/// A shell waiting for its original's children.
pub(crate) enum Fill {
    Array { source: ArrayRef, shell: ArrayRef },
    List { source: ListRef, shell: ListRef },
    Set { source: SetRef, shell: SetRef },
    Deque { source: DequeRef, shell: DequeRef },
    Collection { source: CollectionRef, shell: CollectionRef },
    Map { source: MapRef, shell: MapRef },
    Object { source: ObjectRef, shell: ObjectRef },
}

/// State of one top-level copy call.
pub(crate) struct Session<'a> {
    registry: &'a TypeRegistry,
    context: &'a CopyContext,
    tracker: ReferenceTracker,
    pending: Vec<Fill>,
}

impl<'a> Session<'a> {
    fn new(registry: &'a TypeRegistry, context: &'a CopyContext) -> Self {
        Self {
            registry,
            context,
            tracker: ReferenceTracker::new(),
            pending: Vec::new(),
        }
    }

    fn run(&mut self, root: &Value) -> Result<Value> {
        self.check_interrupt()?;
        let copy = self.visit(root)?;
        while let Some(task) = self.pending.pop() {
            self.check_interrupt()?;
            self.fill(task)?;
        }
        Ok(copy)
    }

    fn fill(&mut self, task: Fill) -> Result<()> {
        match task {
            Fill::Array { source, shell } => self.fill_array(&source, &shell),
            Fill::List { source, shell } => self.fill_list(&source, &shell),
            Fill::Set { source, shell } => self.fill_set(&source, &shell),
            Fill::Deque { source, shell } => self.fill_deque(&source, &shell),
            Fill::Collection { source, shell } => self.fill_collection(&source, &shell),
            Fill::Map { source, shell } => self.fill_map(&source, &shell),
            Fill::Object { source, shell } => self.fill_object(&source, &shell),
        }
    }

    fn check_interrupt(&self) -> Result<()> {
        if self.context.is_interrupted() {
            return Err(CopyError::Interrupted);
        }
        Ok(())
    }

    /// Copy each value in order
    fn visit_all(&mut self, values: &[Value]) -> Result<Vec<Value>> {
        values.iter().map(|v| self.visit(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copier_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DeepCopier>();
        assert_send_sync::<Value>();
    }

    #[test]
    fn test_null_copies_to_null() {
        assert!(deep_copy(&Value::Null).unwrap().is_null());
    }

    #[test]
    fn test_interrupted_context_aborts() {
        let ctx = CopyContext::new();
        ctx.interrupt();
        let copier = DeepCopier::new().with_context(ctx);
        let err = copier.copy(&Value::list(vec![])).unwrap_err();
        assert!(matches!(err, CopyError::Interrupted));
    }

    #[test]
    fn test_node_limit_aborts() {
        let copier = DeepCopier::new().with_context(CopyContext::with_max_nodes(2));
        let graph = Value::list(vec![Value::list(vec![]), Value::list(vec![])]);
        let err = copier.copy(&graph).unwrap_err();
        assert!(matches!(err, CopyError::NodeLimit { max: 2 }));

        let small = Value::list(vec![Value::list(vec![])]);
        assert!(copier.copy(&small).is_ok());
    }

    #[test]
    fn test_deep_nesting_does_not_grow_the_stack() {
        let mut value = Value::Int(0);
        for _ in 0..200_000 {
            value = Value::list(vec![value]);
        }
        let copy = deep_copy(&value).unwrap();
        assert!(!copy.ptr_eq(&value));

        // Unwind iteratively so dropping the chains does not recurse either.
        for mut node in [value, copy] {
            loop {
                let next = match node.as_list() {
                    Some(list) => list.write().pop(),
                    None => None,
                };
                match next {
                    Some(next) => node = next,
                    None => break,
                }
            }
        }
    }
}
