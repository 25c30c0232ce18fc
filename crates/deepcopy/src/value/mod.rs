//! Value representation for copyable object graphs

mod display;
mod equality;
mod hashable;
mod hint;
mod impls;
mod object;
mod refs;

pub use hashable::ValueKey;
pub use hint::TypeHint;
pub use object::{ClassBuilder, ClassDef, Constructor, ConstructorFn, FieldDef, Instance};
pub use refs::{
    ArrayRef, ArrayValue, CollectionRef, CollectionValue, DequeRef, Handle, ListRef, MapRef,
    MapValue, ObjectRef, SetRef,
};

use std::sync::Arc;

/// Runtime value in an object graph.
///
/// Values are organized into two tiers:
/// - Tier 1: Inline scalars (no allocation, no identity)
/// - Tier 2: Shared heap nodes (`Arc`-wrapped, identity = allocation address)
///
/// Cloning a `Value` clones the handle, never the node: two clones of a
/// `Value::List` are the same list.
#[derive(Clone)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Tier 1: Inline Scalars
    // ═══════════════════════════════════════════════════════════════════
    /// The absent value
    Null,

    /// Boolean: `true` or `false`
    Bool(bool),

    /// Unicode scalar value
    Char(char),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point, compared by bit pattern
    Float(f64),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 2: Shared Heap Nodes
    // ═══════════════════════════════════════════════════════════════════
    /// Immutable text
    Str(Arc<str>),

    /// Fixed-length array with a component type
    Array(ArrayRef),

    /// Ordered sequence
    List(ListRef),

    /// Unordered unique-element set
    Set(SetRef),

    /// Double-ended queue
    Deque(DequeRef),

    /// Collection of a named runtime type outside the built-in kinds
    Collection(CollectionRef),

    /// Key-value map of a named runtime type
    Map(MapRef),

    /// Instance of a declared class
    Object(ObjectRef),
}

/// Reference identity of a heap node.
///
/// Two values have the same identity exactly when they share one allocation.
/// Identities are only meaningful while the node is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(usize);

impl Identity {
    pub(crate) fn of<T: ?Sized>(ptr: *const T) -> Self {
        Identity(ptr as *const () as usize)
    }
}

impl Value {
    /// Identity of the heap node behind this value, `None` for scalars and `Null`.
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Value::Null | Value::Bool(_) | Value::Char(_) | Value::Int(_) | Value::Float(_) => {
                None
            }
            Value::Str(s) => Some(Identity::of(Arc::as_ptr(s))),
            Value::Array(r) => Some(r.identity()),
            Value::List(r) => Some(r.identity()),
            Value::Set(r) => Some(r.identity()),
            Value::Deque(r) => Some(r.identity()),
            Value::Collection(r) => Some(r.identity()),
            Value::Map(r) => Some(r.identity()),
            Value::Object(r) => Some(r.identity()),
        }
    }

    /// Check whether two values are the same heap node.
    ///
    /// Scalars never share identity, so this is `false` for them.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self.identity(), other.identity()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Runtime type name, as matched against the atomic set of a registry.
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Char(_) => "char".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Str(_) => STRING_TYPE.to_string(),
            Value::Array(_) => "Array".to_string(),
            Value::List(_) => "List".to_string(),
            Value::Set(_) => "Set".to_string(),
            Value::Deque(_) => "Deque".to_string(),
            Value::Collection(r) => r.type_name().to_string(),
            Value::Map(r) => r.type_name().to_string(),
            Value::Object(r) => r.class().name().to_string(),
        }
    }
}

/// Type name reported for `Value::Str`.
pub const STRING_TYPE: &str = "String";
