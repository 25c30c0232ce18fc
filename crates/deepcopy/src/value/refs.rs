//! Shared heap node handles

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::{IndexMap, IndexSet};

use super::{Identity, Instance, TypeHint, Value, ValueKey};

/// A shared, mutable heap node.
///
/// Cloning a handle yields another reference to the same node. The
/// allocation address is the node's [`Identity`].
pub struct Handle<T> {
    inner: Arc<RwLock<T>>,
}

/// Handle to a fixed-length array
pub type ArrayRef = Handle<ArrayValue>;
/// Handle to an ordered sequence
pub type ListRef = Handle<Vec<Value>>;
/// Handle to a unique-element set
pub type SetRef = Handle<IndexSet<ValueKey>>;
/// Handle to a double-ended queue
pub type DequeRef = Handle<VecDeque<Value>>;
/// Handle to a collection of a named runtime type
pub type CollectionRef = Handle<CollectionValue>;
/// Handle to a key-value map
pub type MapRef = Handle<MapValue>;
/// Handle to a class instance
pub type ObjectRef = Handle<Instance>;

impl<T> Handle<T> {
    /// Wrap a node in a new handle
    pub fn new(node: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(node)),
        }
    }

    /// Lock the node for reading.
    ///
    /// A poisoned lock is recovered: nodes hold plain data, so a panic in
    /// another holder cannot leave them in a state worse than half-updated.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock the node for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Identity of the node
    pub fn identity(&self) -> Identity {
        Identity::of(Arc::as_ptr(&self.inner))
    }

    /// Check if two handles point at the same node
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:#x})", self.identity().0)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Node Types
// ═══════════════════════════════════════════════════════════════════════

/// A fixed-length array of slots with a declared component type.
#[derive(Clone)]
pub struct ArrayValue {
    /// Component type of every slot
    pub component: TypeHint,

    /// The slots
    pub items: Box<[Value]>,
}

impl ArrayValue {
    /// Create an array of `len` slots, each at the component's zero value
    pub fn filled(component: TypeHint, len: usize) -> Self {
        let items = (0..len).map(|_| component.zero()).collect();
        Self { component, items }
    }
}

/// A collection whose runtime type is outside the built-in kinds.
///
/// Elements keep insertion order; the type name selects the factory used to
/// build an empty instance when the collection is copied.
#[derive(Clone)]
pub struct CollectionValue {
    /// Runtime type name (e.g. "PriorityBag")
    pub type_name: Arc<str>,

    /// Elements in insertion order
    pub items: Vec<Value>,
}

impl CollectionValue {
    /// Create an empty collection of the given runtime type
    pub fn new(type_name: impl Into<Arc<str>>) -> Self {
        Self {
            type_name: type_name.into(),
            items: Vec::new(),
        }
    }
}

/// A key-value map with a runtime type name.
#[derive(Clone)]
pub struct MapValue {
    /// Runtime type name (e.g. "HashMap")
    pub type_name: Arc<str>,

    /// Entries in insertion order
    pub entries: IndexMap<ValueKey, Value>,
}

impl MapValue {
    /// Runtime type name of maps built with [`Value::map`]
    pub const DEFAULT_TYPE: &'static str = "HashMap";

    /// Create an empty map of the given runtime type
    pub fn new(type_name: impl Into<Arc<str>>) -> Self {
        Self {
            type_name: type_name.into(),
            entries: IndexMap::new(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Typed Helpers
// ═══════════════════════════════════════════════════════════════════════

impl Handle<Vec<Value>> {
    /// Append an element
    pub fn push(&self, value: Value) {
        self.write().push(value);
    }

    /// Get an element by index
    pub fn get(&self, index: usize) -> Option<Value> {
        self.read().get(index).cloned()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Clone the current elements out of the lock
    pub fn snapshot(&self) -> Vec<Value> {
        self.read().clone()
    }
}

impl Handle<IndexSet<ValueKey>> {
    /// Add an element; returns `false` if an equal key was already present
    pub fn insert(&self, value: Value) -> bool {
        self.write().insert(ValueKey(value))
    }

    /// Check for an element by key equality
    pub fn contains(&self, value: &Value) -> bool {
        self.read().contains(&ValueKey(value.clone()))
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Clone the current elements out of the lock
    pub fn snapshot(&self) -> Vec<Value> {
        self.read().iter().map(|k| k.0.clone()).collect()
    }
}

impl Handle<VecDeque<Value>> {
    /// Add an element at the back
    pub fn push_back(&self, value: Value) {
        self.write().push_back(value);
    }

    /// Remove the element at the front
    pub fn pop_front(&self) -> Option<Value> {
        self.write().pop_front()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the deque is empty
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Clone the current elements out of the lock, front to back
    pub fn snapshot(&self) -> Vec<Value> {
        self.read().iter().cloned().collect()
    }
}

impl Handle<ArrayValue> {
    /// Get a slot by index
    pub fn get(&self, index: usize) -> Option<Value> {
        self.read().items.get(index).cloned()
    }

    /// Overwrite a slot; returns `false` if the index is out of bounds
    pub fn set(&self, index: usize, value: Value) -> bool {
        match self.write().items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    /// Check if the array has no slots
    pub fn is_empty(&self) -> bool {
        self.read().items.is_empty()
    }

    /// Component type
    pub fn component(&self) -> TypeHint {
        self.read().component.clone()
    }

    /// Clone the current slots out of the lock
    pub fn snapshot(&self) -> Vec<Value> {
        self.read().items.to_vec()
    }
}

impl Handle<CollectionValue> {
    /// Add an element
    pub fn add(&self, value: Value) {
        self.write().items.push(value);
    }

    /// Runtime type name
    pub fn type_name(&self) -> Arc<str> {
        Arc::clone(&self.read().type_name)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.read().items.is_empty()
    }

    /// Clone the current elements out of the lock
    pub fn snapshot(&self) -> Vec<Value> {
        self.read().items.clone()
    }
}

impl Handle<MapValue> {
    /// Insert an entry, returning the previous value for an equal key
    pub fn insert(&self, key: Value, value: Value) -> Option<Value> {
        self.write().entries.insert(ValueKey(key), value)
    }

    /// Look up a value by key equality
    pub fn get(&self, key: &Value) -> Option<Value> {
        self.read().entries.get(&ValueKey(key.clone())).cloned()
    }

    /// Runtime type name
    pub fn type_name(&self) -> Arc<str> {
        Arc::clone(&self.read().type_name)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    /// Clone the current entries out of the lock
    pub fn snapshot(&self) -> Vec<(Value, Value)> {
        self.read()
            .entries
            .iter()
            .map(|(k, v)| (k.0.clone(), v.clone()))
            .collect()
    }
}
