//! # Deepcopy
//!
//! A deep-copy engine for object graphs with shared references and cycles.
//!
//! Given the root of a graph of [`Value`]s, the engine produces a structurally
//! equal graph that shares no mutable node with the original. Aliasing is
//! reproduced faithfully: a node reachable along several paths is copied once,
//! and a cycle in the original is the same cycle in the copy.
//!
//! ## Architecture
//!
//! - **Value model**: scalars, text, built-in containers, named collections
//!   and maps, and class instances ([`value`])
//! - **Registry**: atomic (shared) types and container factories ([`registry`])
//! - **Engine**: classification, identity tracking and the allocate-then-fill
//!   worklist ([`engine`])
//! - **Context**: per-copier limits and cooperative interruption ([`context`])
//!
//! ## Example
//!
//! ```
//! use deepcopy::{deep_copy, Value};
//!
//! let shared = Value::list(vec![Value::Int(1)]);
//! let original = Value::list(vec![shared.clone(), shared]);
//!
//! let copy = deep_copy(&original).unwrap();
//! let list = copy.as_list().unwrap();
//! assert!(list.get(0).unwrap().ptr_eq(&list.get(1).unwrap()));
//! ```
//!
//! Handles are reference counted, so a cyclic graph, original or copy, is
//! never freed on its own. Break the cycle to release it.
//!
//! Copying walks the graph with an explicit worklist, so nesting depth is
//! bounded only by memory. Comparing (`==`), formatting (`Debug`, `Display`)
//! and dropping a graph still recurse once per level of nesting, so a chain
//! nested hundreds of thousands of levels deep can overflow the stack in those
//! routines. Take such chains apart iteratively before dropping them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod engine;
pub mod error;
pub mod registry;
pub mod value;

// Re-export main types
pub use context::CopyContext;
pub use engine::{classify, deep_copy, DeepCopier, Shape};
pub use error::{CopyError, Result};
pub use registry::{CollectionFactory, MapFactory, TypeRegistry};
pub use value::{
    ArrayRef, ArrayValue, ClassBuilder, ClassDef, CollectionRef, CollectionValue, Constructor,
    ConstructorFn, DequeRef, FieldDef, Handle, Identity, Instance, ListRef, MapRef, MapValue,
    ObjectRef, SetRef, TypeHint, Value, ValueKey, STRING_TYPE,
};

/// Deepcopy version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
