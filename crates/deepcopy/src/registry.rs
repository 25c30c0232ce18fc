//! Type registry: atomic types and container factories

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::value::{CollectionValue, MapValue, Value, STRING_TYPE};

/// Type alias for no-argument collection factories
pub type CollectionFactory = Arc<dyn Fn() -> anyhow::Result<CollectionValue> + Send + Sync>;

/// Type alias for no-argument map factories
pub type MapFactory = Arc<dyn Fn() -> anyhow::Result<MapValue> + Send + Sync>;

/// What the engine knows about runtime types beyond the value model itself.
///
/// - **Atomic types** are immutable and shared between original and copy.
///   Only `"String"` is atomic by default; any class, map or collection type
///   name can be added.
/// - **Factories** build an empty container of an exact runtime type. Every
///   map and every collection outside the list/set/deque kinds needs one to be
///   copyable. `"HashMap"` and `"IndexMap"` maps are registered by default.
#[derive(Clone)]
pub struct TypeRegistry {
    atomic: HashSet<String>,
    collections: HashMap<String, CollectionFactory>,
    maps: HashMap<String, MapFactory>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register_atomic(STRING_TYPE);
        for type_name in [MapValue::DEFAULT_TYPE, "IndexMap"] {
            registry.register_map(type_name, move || Ok(MapValue::new(type_name)));
        }
        registry
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut atomic: Vec<_> = self.atomic.iter().collect();
        atomic.sort();
        let mut collections: Vec<_> = self.collections.keys().collect();
        collections.sort();
        let mut maps: Vec<_> = self.maps.keys().collect();
        maps.sort();
        f.debug_struct("TypeRegistry")
            .field("atomic", &atomic)
            .field("collections", &collections)
            .field("maps", &maps)
            .finish()
    }
}

impl TypeRegistry {
    /// Create a registry with the default atomic set and map factories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry that knows no types at all.
    ///
    /// Strings are then copied like any other node, and no map can be copied
    /// until its factory is registered.
    pub fn empty() -> Self {
        Self {
            atomic: HashSet::new(),
            collections: HashMap::new(),
            maps: HashMap::new(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Atomic Types
    // ═══════════════════════════════════════════════════════════════════

    /// Treat values of the named type as immutable and share them.
    pub fn register_atomic(&mut self, type_name: impl Into<String>) -> &mut Self {
        self.atomic.insert(type_name.into());
        self
    }

    /// Stop treating the named type as atomic. Returns whether it was atomic.
    pub fn unregister_atomic(&mut self, type_name: &str) -> bool {
        self.atomic.remove(type_name)
    }

    /// Check if a type name is in the atomic set
    pub fn is_atomic_type(&self, type_name: &str) -> bool {
        self.atomic.contains(type_name)
    }

    /// Check if a value is shared rather than copied.
    ///
    /// Inline scalars have no identity and are never in question here.
    pub fn is_atomic(&self, value: &Value) -> bool {
        if self.atomic.is_empty() {
            return false;
        }
        match value {
            Value::Str(_) => self.atomic.contains(STRING_TYPE),
            Value::Object(obj) => self.atomic.contains(obj.class().name()),
            Value::Map(map) => self.atomic.contains(&*map.type_name()),
            Value::Collection(coll) => self.atomic.contains(&*coll.type_name()),
            Value::Array(_) | Value::List(_) | Value::Set(_) | Value::Deque(_) => {
                self.atomic.contains(value.type_name().as_str())
            }
            Value::Null | Value::Bool(_) | Value::Char(_) | Value::Int(_) | Value::Float(_) => {
                false
            }
        }
    }

    /// Atomic type names, sorted
    pub fn atomic_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.atomic.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    // ═══════════════════════════════════════════════════════════════════
    // Factories
    // ═══════════════════════════════════════════════════════════════════

    /// Register the no-argument factory for a collection runtime type.
    pub fn register_collection<F>(&mut self, type_name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> anyhow::Result<CollectionValue> + Send + Sync + 'static,
    {
        self.collections.insert(type_name.into(), Arc::new(factory));
        self
    }

    /// Register the no-argument factory for a map runtime type.
    pub fn register_map<F>(&mut self, type_name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> anyhow::Result<MapValue> + Send + Sync + 'static,
    {
        self.maps.insert(type_name.into(), Arc::new(factory));
        self
    }

    /// Factory for a collection runtime type
    pub fn collection_factory(&self, type_name: &str) -> Option<&CollectionFactory> {
        self.collections.get(type_name)
    }

    /// Factory for a map runtime type
    pub fn map_factory(&self, type_name: &str) -> Option<&MapFactory> {
        self.maps.get(type_name)
    }
}
