//! Identity map from original nodes to their copies

use std::collections::HashMap;

use crate::value::{Identity, Value};

/// Maps each original node visited by one copy call to its copy.
///
/// A tracker belongs to exactly one top-level call and is dropped with it,
/// whether the call succeeds or fails. Entries are never evicted while the
/// call runs.
#[derive(Debug, Default)]
pub(crate) struct ReferenceTracker {
    entries: HashMap<Identity, Tracked>,
}

#[derive(Debug)]
struct Tracked {
    // Holding the original keeps its address from being reused while the call
    // runs, which would alias two distinct nodes under one identity.
    _original: Value,
    copy: Value,
}

impl ReferenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The copy registered for an original, if any
    pub(crate) fn get(&self, id: Identity) -> Option<Value> {
        self.entries.get(&id).map(|t| t.copy.clone())
    }

    /// Register the copy of an original
    pub(crate) fn put(&mut self, id: Identity, original: Value, copy: Value) {
        self.entries.insert(
            id,
            Tracked {
                _original: original,
                copy,
            },
        );
    }

    /// Number of originals registered so far
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
