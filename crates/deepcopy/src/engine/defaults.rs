//! Placeholder arguments for shell construction

use crate::value::{TypeHint, Value};

/// The argument passed for a constructor parameter of the given type when
/// building an empty shell.
///
/// Scalars get zero/false, text gets the empty string, any collection-shaped
/// parameter gets a fresh empty list, everything else is absent.
pub fn placeholder(hint: &TypeHint) -> Value {
    match hint {
        TypeHint::Str => Value::string(""),
        hint if hint.is_collection() => Value::list(Vec::new()),
        hint => hint.zero(),
    }
}

/// Placeholders for a whole parameter list
pub fn placeholders(params: &[TypeHint]) -> Vec<Value> {
    params.iter().map(placeholder).collect()
}
