//! Declared types of fields, constructor parameters and array components

use super::Value;

/// The declared type of a slot.
///
/// Runtime values carry their own shape; a hint only describes what a slot
/// was declared to hold, which is all the engine knows about a constructor
/// parameter or an empty array slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeHint {
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// 64-bit integer
    Int,
    /// 64-bit float
    Float,
    /// Text
    Str,
    /// Fixed-length array
    Array,
    /// Ordered sequence
    List,
    /// Unique-element set
    Set,
    /// Double-ended queue
    Deque,
    /// Any other collection type
    Collection,
    /// Key-value map
    Map,
    /// Instance of the named class
    Class(String),
    /// No declared type
    Any,
}

impl TypeHint {
    /// The value an uninitialized slot of this type holds.
    ///
    /// Scalars start at zero/false; everything else starts absent.
    pub fn zero(&self) -> Value {
        match self {
            TypeHint::Bool => Value::Bool(false),
            TypeHint::Char => Value::Char('\0'),
            TypeHint::Int => Value::Int(0),
            TypeHint::Float => Value::Float(0.0),
            _ => Value::Null,
        }
    }

    /// Check if this type is a collection shape (maps and arrays excluded)
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            TypeHint::List | TypeHint::Set | TypeHint::Deque | TypeHint::Collection
        )
    }

    /// Check if this type is an inline scalar
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            TypeHint::Bool | TypeHint::Char | TypeHint::Int | TypeHint::Float
        )
    }
}
