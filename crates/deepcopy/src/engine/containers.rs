//! Array, collection and map copiers

use std::collections::VecDeque;

use indexmap::IndexSet;

use super::{Fill, Session};
use crate::error::{CopyError, Result};
use crate::value::{
    ArrayRef, ArrayValue, CollectionRef, DequeRef, Handle, Identity, ListRef, MapRef, SetRef,
    Value, ValueKey,
};

/// Smallest capacity given to a copied set.
const MIN_SET_CAPACITY: usize = 16;

/// Capacity for a set of `len` elements that stays under a 0.75 load factor.
fn set_capacity(len: usize) -> usize {
    (len * 4 / 3 + 1).max(MIN_SET_CAPACITY)
}

/// Why a factory's product cannot serve as the shell, if it cannot.
fn unusable_shell(expected: &str, found: &str, len: usize) -> Option<String> {
    if found != expected {
        Some(format!("factory returned a `{}`", found))
    } else if len > 0 {
        Some(format!("factory returned {} existing elements", len))
    } else {
        None
    }
}

impl Session<'_> {
    // ═══════════════════════════════════════════════════════════════════
    // Allocation
    // ═══════════════════════════════════════════════════════════════════

    pub(super) fn alloc_array(
        &mut self,
        id: Identity,
        original: &Value,
        source: &ArrayRef,
    ) -> Result<Value> {
        let (component, len) = {
            let array = source.read();
            (array.component.clone(), array.items.len())
        };
        let shell = Handle::new(ArrayValue::filled(component, len));
        let task = Fill::Array {
            source: source.clone(),
            shell: shell.clone(),
        };
        self.enqueue(id, original, Value::Array(shell), task)
    }

    pub(super) fn alloc_list(
        &mut self,
        id: Identity,
        original: &Value,
        source: &ListRef,
    ) -> Result<Value> {
        let shell = Handle::new(Vec::with_capacity(source.len()));
        let task = Fill::List {
            source: source.clone(),
            shell: shell.clone(),
        };
        self.enqueue(id, original, Value::List(shell), task)
    }

    pub(super) fn alloc_set(
        &mut self,
        id: Identity,
        original: &Value,
        source: &SetRef,
    ) -> Result<Value> {
        let shell = Handle::new(IndexSet::with_capacity(set_capacity(source.len())));
        let task = Fill::Set {
            source: source.clone(),
            shell: shell.clone(),
        };
        self.enqueue(id, original, Value::Set(shell), task)
    }

    pub(super) fn alloc_deque(
        &mut self,
        id: Identity,
        original: &Value,
        source: &DequeRef,
    ) -> Result<Value> {
        let shell = Handle::new(VecDeque::new());
        let task = Fill::Deque {
            source: source.clone(),
            shell: shell.clone(),
        };
        self.enqueue(id, original, Value::Deque(shell), task)
    }

    pub(super) fn alloc_collection(
        &mut self,
        id: Identity,
        original: &Value,
        source: &CollectionRef,
    ) -> Result<Value> {
        let type_name = source.type_name();
        let factory = self.registry.collection_factory(&type_name).ok_or_else(|| {
            CopyError::Instantiation {
                kind: "collection",
                type_name: type_name.to_string(),
                reason: "no factory is registered".to_string(),
            }
        })?;
        let empty = factory().map_err(|e| CopyError::Instantiation {
            kind: "collection",
            type_name: type_name.to_string(),
            reason: e.to_string(),
        })?;
        if let Some(reason) = unusable_shell(&type_name, &empty.type_name, empty.items.len()) {
            return Err(CopyError::Instantiation {
                kind: "collection",
                type_name: type_name.to_string(),
                reason,
            });
        }
        let shell = Handle::new(empty);
        let task = Fill::Collection {
            source: source.clone(),
            shell: shell.clone(),
        };
        self.enqueue(id, original, Value::Collection(shell), task)
    }

    pub(super) fn alloc_map(
        &mut self,
        id: Identity,
        original: &Value,
        source: &MapRef,
    ) -> Result<Value> {
        let type_name = source.type_name();
        let factory =
            self.registry
                .map_factory(&type_name)
                .ok_or_else(|| CopyError::Instantiation {
                    kind: "map",
                    type_name: type_name.to_string(),
                    reason: "no factory is registered".to_string(),
                })?;
        let empty = factory().map_err(|e| CopyError::Instantiation {
            kind: "map",
            type_name: type_name.to_string(),
            reason: e.to_string(),
        })?;
        if let Some(reason) = unusable_shell(&type_name, &empty.type_name, empty.entries.len()) {
            return Err(CopyError::Instantiation {
                kind: "map",
                type_name: type_name.to_string(),
                reason,
            });
        }
        let shell = Handle::new(empty);
        let task = Fill::Map {
            source: source.clone(),
            shell: shell.clone(),
        };
        self.enqueue(id, original, Value::Map(shell), task)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Filling
    // ═══════════════════════════════════════════════════════════════════
    //
    // Each filler snapshots the original's children, copies them with no
    // lock held, then takes the shell's write lock once to store them.

    pub(super) fn fill_array(&mut self, source: &ArrayRef, shell: &ArrayRef) -> Result<()> {
        let copies = self.visit_all(&source.snapshot())?;
        let mut array = shell.write();
        for (slot, copy) in array.items.iter_mut().zip(copies) {
            *slot = copy;
        }
        Ok(())
    }

    pub(super) fn fill_list(&mut self, source: &ListRef, shell: &ListRef) -> Result<()> {
        let copies = self.visit_all(&source.snapshot())?;
        shell.write().extend(copies);
        Ok(())
    }

    pub(super) fn fill_set(&mut self, source: &SetRef, shell: &SetRef) -> Result<()> {
        let copies = self.visit_all(&source.snapshot())?;
        shell.write().extend(copies.into_iter().map(ValueKey));
        Ok(())
    }

    pub(super) fn fill_deque(&mut self, source: &DequeRef, shell: &DequeRef) -> Result<()> {
        let copies = self.visit_all(&source.snapshot())?;
        shell.write().extend(copies);
        Ok(())
    }

    pub(super) fn fill_collection(
        &mut self,
        source: &CollectionRef,
        shell: &CollectionRef,
    ) -> Result<()> {
        let copies = self.visit_all(&source.snapshot())?;
        shell.write().items.extend(copies);
        Ok(())
    }

    pub(super) fn fill_map(&mut self, source: &MapRef, shell: &MapRef) -> Result<()> {
        let entries = source.snapshot();
        let mut copies = Vec::with_capacity(entries.len());
        for (key, value) in &entries {
            copies.push((self.visit(key)?, self.visit(value)?));
        }
        let mut map = shell.write();
        for (key, value) in copies {
            map.entries.insert(ValueKey(key), value);
        }
        Ok(())
    }
}
