//! Structural equality for value graphs

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::{Identity, Value, ValueKey};

// Two graphs are equal when every node pair reachable in lockstep holds the
// same data. A pair already under comparison is assumed equal, which makes
// cyclic graphs compare in finite time. Floats compare by bit pattern, the
// same rule set and map keys use, so `NaN` equals itself and `0.0` does not
// equal `-0.0`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        Comparison::default().eq(self, other)
    }
}

#[derive(Default)]
struct Comparison {
    assumed: HashSet<(Identity, Identity)>,
    log: Vec<(Identity, Identity)>,
}

impl Comparison {
    fn eq(&mut self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (Value::Char(x), Value::Char(y)) => x == y,
            (Value::Int(x), Value::Int(y)) => x == y,
            (Value::Float(x), Value::Float(y)) => x.to_bits() == y.to_bits(),
            (Value::Str(x), Value::Str(y)) => x == y,
            _ if a.ptr_eq(b) => true,
            (Value::Array(x), Value::Array(y)) => {
                self.assuming(x.identity(), y.identity(), |c| {
                    c.seq_eq(&x.snapshot(), &y.snapshot())
                })
            }
            (Value::List(x), Value::List(y)) => self.assuming(x.identity(), y.identity(), |c| {
                c.seq_eq(&x.snapshot(), &y.snapshot())
            }),
            (Value::Deque(x), Value::Deque(y)) => {
                self.assuming(x.identity(), y.identity(), |c| {
                    c.seq_eq(&x.snapshot(), &y.snapshot())
                })
            }
            (Value::Collection(x), Value::Collection(y)) => {
                self.assuming(x.identity(), y.identity(), |c| {
                    c.seq_eq(&x.snapshot(), &y.snapshot())
                })
            }
            (Value::Set(x), Value::Set(y)) => self.assuming(x.identity(), y.identity(), |c| {
                c.set_eq(&x.snapshot(), &y.snapshot())
            }),
            (Value::Map(x), Value::Map(y)) => self.assuming(x.identity(), y.identity(), |c| {
                c.map_eq(&x.snapshot(), &y.snapshot())
            }),
            (Value::Object(x), Value::Object(y)) => {
                if !Arc::ptr_eq(&x.class(), &y.class()) {
                    return false;
                }
                self.assuming(x.identity(), y.identity(), |c| {
                    c.seq_eq(&x.snapshot(), &y.snapshot())
                })
            }
            _ => false,
        }
    }

    /// Compare under the assumption that `a` and `b` are equal.
    ///
    /// Assumptions made while a comparison fails are rolled back, so a failed
    /// candidate match cannot vouch for a later one.
    fn assuming(
        &mut self,
        a: Identity,
        b: Identity,
        compare: impl FnOnce(&mut Self) -> bool,
    ) -> bool {
        if !self.assumed.insert((a, b)) {
            return true;
        }
        let mark = self.log.len();
        self.log.push((a, b));
        let equal = compare(self);
        if !equal {
            self.rollback(mark);
        }
        equal
    }

    fn rollback(&mut self, mark: usize) {
        for pair in self.log.drain(mark..) {
            self.assumed.remove(&pair);
        }
    }

    fn seq_eq(&mut self, a: &[Value], b: &[Value]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| self.eq(x, y))
    }

    /// Content-keyed members are unique within a set, so they match by
    /// lookup. The remaining members are paired off one to one.
    fn set_eq(&mut self, a: &[Value], b: &[Value]) -> bool {
        if a.len() != b.len() {
            return false;
        }
        let (a_content, a_nodes): (Vec<&Value>, Vec<&Value>) =
            a.iter().partition(|v| ValueKey::is_by_content(v));
        let (b_content, b_nodes): (Vec<&Value>, Vec<&Value>) =
            b.iter().partition(|v| ValueKey::is_by_content(v));
        if a_content.len() != b_content.len() {
            return false;
        }
        let by_content: HashSet<ValueKey> =
            b_content.into_iter().cloned().map(ValueKey).collect();
        if !a_content
            .into_iter()
            .all(|x| by_content.contains(&ValueKey(x.clone())))
        {
            return false;
        }
        let mut used = vec![false; b_nodes.len()];
        self.pair_off(&a_nodes, &b_nodes, &mut used, |c, x, y| c.eq(x, y))
    }

    /// Entries with content keys match by key lookup; entries keyed by heap
    /// nodes are paired off one to one on key and value together.
    fn map_eq(&mut self, a: &[(Value, Value)], b: &[(Value, Value)]) -> bool {
        if a.len() != b.len() {
            return false;
        }
        let (a_content, a_nodes): (Vec<&(Value, Value)>, Vec<&(Value, Value)>) =
            a.iter().partition(|(k, _)| ValueKey::is_by_content(k));
        let (b_content, b_nodes): (Vec<&(Value, Value)>, Vec<&(Value, Value)>) =
            b.iter().partition(|(k, _)| ValueKey::is_by_content(k));
        if a_content.len() != b_content.len() {
            return false;
        }
        let by_key: HashMap<ValueKey, &Value> = b_content
            .into_iter()
            .map(|(k, v)| (ValueKey(k.clone()), v))
            .collect();
        for (key, value) in a_content {
            match by_key.get(&ValueKey(key.clone())) {
                Some(other) if self.eq(value, other) => {}
                _ => return false,
            }
        }
        let mut used = vec![false; b_nodes.len()];
        self.pair_off(&a_nodes, &b_nodes, &mut used, |c, x, y| {
            c.eq(&x.0, &y.0) && c.eq(&x.1, &y.1)
        })
    }

    /// Find a partner in `b` for every item of `a`, each partner used once.
    ///
    /// Backtracks over candidates; assumptions made for a rejected pairing
    /// are rolled back with it.
    fn pair_off<T>(
        &mut self,
        a: &[&T],
        b: &[&T],
        used: &mut [bool],
        matches: fn(&mut Self, &T, &T) -> bool,
    ) -> bool {
        let Some((first, rest)) = a.split_first() else {
            return true;
        };
        for (j, candidate) in b.iter().enumerate() {
            if used[j] {
                continue;
            }
            let mark = self.log.len();
            if matches(self, *first, *candidate) {
                used[j] = true;
                if self.pair_off(rest, b, used, matches) {
                    return true;
                }
                used[j] = false;
            }
            self.rollback(mark);
        }
        false
    }
}
