//! Value classification and routing

use std::sync::Arc;

use log::trace;

use super::{Fill, Session};
use crate::error::{CopyError, Result};
use crate::registry::TypeRegistry;
use crate::value::{Identity, Value};

/// How the engine treats a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// `Value::Null`: copied as absent
    Absent,
    /// Inline scalar with no identity: returned as is
    Scalar,
    /// Member of the registry's atomic set: shared with the copy
    Atomic,
    /// Text outside the atomic set: copied into a fresh allocation
    Text,
    /// Fixed-length array
    Array,
    /// Ordered sequence
    Sequence,
    /// Unique-element set
    Set,
    /// Double-ended queue
    Queue,
    /// Collection of another runtime type, built by a registered factory
    Collection,
    /// Key-value map, built by a registered factory
    Map,
    /// Class instance, rebuilt through its constructor
    Object,
}

/// Classify a value against a registry.
///
/// Atomic membership is decided before the container kind, so a registered
/// atomic type is shared whatever its shape.
pub fn classify(value: &Value, registry: &TypeRegistry) -> Shape {
    match value {
        Value::Null => Shape::Absent,
        Value::Bool(_) | Value::Char(_) | Value::Int(_) | Value::Float(_) => Shape::Scalar,
        _ if registry.is_atomic(value) => Shape::Atomic,
        Value::Str(_) => Shape::Text,
        Value::Array(_) => Shape::Array,
        Value::List(_) => Shape::Sequence,
        Value::Set(_) => Shape::Set,
        Value::Deque(_) => Shape::Queue,
        Value::Collection(_) => Shape::Collection,
        Value::Map(_) => Shape::Map,
        Value::Object(_) => Shape::Object,
    }
}

impl Session<'_> {
    /// Return the copy of `value`, allocating and queueing a shell for any
    /// node not seen before in this call.
    ///
    /// The tracker is consulted before any shell is built; that lookup is
    /// what ends cycles and keeps shared nodes shared.
    pub(crate) fn visit(&mut self, value: &Value) -> Result<Value> {
        let shape = classify(value, self.registry);
        if matches!(shape, Shape::Absent | Shape::Scalar | Shape::Atomic) {
            return Ok(value.clone());
        }
        let Some(id) = value.identity() else {
            return Ok(value.clone());
        };
        if let Some(copy) = self.tracker.get(id) {
            return Ok(copy);
        }

        match value {
            Value::Str(s) => {
                let copy = Value::Str(Arc::from(&**s));
                self.register(id, value, &copy)?;
                Ok(copy)
            }
            Value::Array(source) => self.alloc_array(id, value, source),
            Value::List(source) => self.alloc_list(id, value, source),
            Value::Set(source) => self.alloc_set(id, value, source),
            Value::Deque(source) => self.alloc_deque(id, value, source),
            Value::Collection(source) => self.alloc_collection(id, value, source),
            Value::Map(source) => self.alloc_map(id, value, source),
            Value::Object(source) => self.alloc_object(id, value, source),
            Value::Null | Value::Bool(_) | Value::Char(_) | Value::Int(_) | Value::Float(_) => {
                Ok(value.clone())
            }
        }
    }

    /// Register a freshly allocated shell as the copy of `original`.
    pub(crate) fn register(&mut self, id: Identity, original: &Value, copy: &Value) -> Result<()> {
        if let Some(max) = self.context.max_nodes {
            if self.tracker.len() >= max {
                return Err(CopyError::NodeLimit { max });
            }
        }
        trace!("{} {:?} -> {:?}", original.type_name(), id, copy.identity());
        self.tracker.put(id, original.clone(), copy.clone());
        Ok(())
    }

    /// Register a shell and queue the task that fills it.
    pub(crate) fn enqueue(
        &mut self,
        id: Identity,
        original: &Value,
        copy: Value,
        task: Fill,
    ) -> Result<Value> {
        self.register(id, original, &copy)?;
        self.pending.push(task);
        Ok(copy)
    }
}
