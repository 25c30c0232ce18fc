//! Value trait implementations: constructors, predicates, extractors, From traits

use std::collections::VecDeque;
use std::sync::Arc;

use indexmap::IndexSet;

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(Arc::from(s.as_ref()))
    }

    /// Create a list value
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Handle::new(items))
    }

    /// Create a set value; later duplicates of a key are dropped
    pub fn set(items: Vec<Value>) -> Self {
        Value::Set(Handle::new(items.into_iter().map(ValueKey).collect::<IndexSet<_>>()))
    }

    /// Create a deque value, front to back
    pub fn deque(items: Vec<Value>) -> Self {
        Value::Deque(Handle::new(items.into_iter().collect::<VecDeque<_>>()))
    }

    /// Create an array value with a component type
    pub fn array(component: TypeHint, items: Vec<Value>) -> Self {
        Value::Array(Handle::new(ArrayValue {
            component,
            items: items.into_boxed_slice(),
        }))
    }

    /// Create a collection value of a named runtime type
    pub fn collection(type_name: impl Into<Arc<str>>, items: Vec<Value>) -> Self {
        Value::Collection(Handle::new(CollectionValue {
            type_name: type_name.into(),
            items,
        }))
    }

    /// Create a `HashMap` value; later entries win on equal keys
    pub fn map(entries: Vec<(Value, Value)>) -> Self {
        Value::typed_map(MapValue::DEFAULT_TYPE, entries)
    }

    /// Create a map value of a named runtime type
    pub fn typed_map(type_name: impl Into<Arc<str>>, entries: Vec<(Value, Value)>) -> Self {
        let mut map = MapValue::new(type_name);
        for (k, v) in entries {
            map.entries.insert(ValueKey(k), v);
        }
        Value::Map(Handle::new(map))
    }

    /// Create an object value
    pub fn object(instance: Instance) -> Self {
        Value::Object(Handle::new(instance))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Predicates
    // ═══════════════════════════════════════════════════════════════════

    /// Check if value is absent
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is an inline scalar
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Bool(_) | Value::Char(_) | Value::Int(_) | Value::Float(_)
        )
    }

    /// Check if value is a string
    pub fn is_string(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// Check if value is any kind of collection (maps and arrays excluded)
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            Value::List(_) | Value::Set(_) | Value::Deque(_) | Value::Collection(_)
        )
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════

    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract integer value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Extract list handle
    pub fn as_list(&self) -> Option<&ListRef> {
        match self {
            Value::List(r) => Some(r),
            _ => None,
        }
    }

    /// Extract set handle
    pub fn as_set(&self) -> Option<&SetRef> {
        match self {
            Value::Set(r) => Some(r),
            _ => None,
        }
    }

    /// Extract deque handle
    pub fn as_deque(&self) -> Option<&DequeRef> {
        match self {
            Value::Deque(r) => Some(r),
            _ => None,
        }
    }

    /// Extract array handle
    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(r) => Some(r),
            _ => None,
        }
    }

    /// Extract collection handle
    pub fn as_collection(&self) -> Option<&CollectionRef> {
        match self {
            Value::Collection(r) => Some(r),
            _ => None,
        }
    }

    /// Extract map handle
    pub fn as_map(&self) -> Option<&MapRef> {
        match self {
            Value::Map(r) => Some(r),
            _ => None,
        }
    }

    /// Extract object handle
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(r) => Some(r),
            _ => None,
        }
    }

    /// Number of elements or entries of a container, `None` for other values
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Array(r) => Some(r.len()),
            Value::List(r) => Some(r.len()),
            Value::Set(r) => Some(r.len()),
            Value::Deque(r) => Some(r.len()),
            Value::Collection(r) => Some(r.len()),
            Value::Map(r) => Some(r.len()),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Trait Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::list(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_constructor_drops_duplicates() {
        let v = Value::set(vec![Value::Int(1), Value::Int(2), Value::Int(1)]);
        assert_eq!(v.len(), Some(2));
    }

    #[test]
    fn test_map_constructor_keeps_last_entry() {
        let v = Value::map(vec![
            (Value::string("k"), Value::Int(1)),
            (Value::string("k"), Value::Int(2)),
        ]);
        let map = v.as_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&Value::string("k")), Some(Value::Int(2)));
    }

    #[test]
    fn test_predicates() {
        assert!(Value::Null.is_null());
        assert!(Value::Int(1).is_scalar());
        assert!(!Value::string("a").is_scalar());
        assert!(Value::string("a").is_string());
        assert!(Value::deque(vec![]).is_collection());
        assert!(!Value::map(vec![]).is_collection());
        assert_eq!(Value::Int(1).len(), None);
    }

    #[test]
    fn test_extractors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(4).as_int(), Some(4));
        assert_eq!(Value::Float(0.5).as_float(), Some(0.5));
        assert_eq!(Value::string("hi").as_str(), Some("hi"));
        assert!(Value::Int(4).as_list().is_none());
        assert!(Value::list(vec![]).as_list().is_some());
        assert!(Value::array(TypeHint::Int, vec![]).as_array().is_some());
        assert!(Value::collection("Bag", vec![]).as_collection().is_some());
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(3), Value::Int(3));
        assert_eq!(Value::from("a"), Value::string("a"));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        let list = Value::from(vec!["x", "y"]);
        assert_eq!(list.len(), Some(2));
    }
}
