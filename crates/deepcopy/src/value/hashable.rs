//! Hashable wrapper for Value to enable use as set elements and map keys

use std::hash::{Hash, Hasher};

use super::Value;

/// A wrapper for Value that implements Hash and Eq.
///
/// Scalars and strings are keyed by content (floats by bit pattern). Every
/// other heap node is keyed by identity, so a key stays valid while the node
/// it names is still being filled in.
#[derive(Debug, Clone)]
pub struct ValueKey(pub Value);

impl ValueKey {
    /// Check if a value is keyed by content rather than identity
    pub fn is_by_content(value: &Value) -> bool {
        matches!(
            value,
            Value::Null
                | Value::Bool(_)
                | Value::Char(_)
                | Value::Int(_)
                | Value::Float(_)
                | Value::Str(_)
        )
    }
}

impl Hash for ValueKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash the discriminant first
        std::mem::discriminant(&self.0).hash(state);

        match &self.0 {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Char(c) => c.hash(state),
            Value::Int(n) => n.hash(state),
            Value::Float(n) => n.to_bits().hash(state),
            Value::Str(s) => s.hash(state),
            other => other.identity().hash(state),
        }
    }
}

impl PartialEq for ValueKey {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (a, b) => a.ptr_eq(b),
        }
    }
}

impl Eq for ValueKey {}
