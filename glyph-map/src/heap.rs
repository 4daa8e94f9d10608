//! The concrete array store: owns every live array alongside the value
//! pool its entries are allocated from, and implements
//! [`glyph_value::ArrayHost`] over the pair.
//!
//! A class/object table is deliberately absent here — [`Heap`] carries
//! an inert [`ClassCastDispatcher`] implementation only so it satisfies
//! `ValueHost` on its own for standalone testing. A future runtime
//! composes a real object table with a [`Heap`] into the pair a live
//! engine actually needs.

use std::cmp::Ordering;
use std::collections::HashMap;

use glyph_mem::{SlabId, SlabPool};
use glyph_value::{ArrayHandle, ArrayHost, ClassCastDispatcher, ObjectHandle, Value, ValueId, ValuePool};

use crate::hashmap::Hashmap;
use crate::key::Key;

fn to_slab(h: ArrayHandle) -> SlabId {
    SlabId(h.0)
}

fn from_slab(id: SlabId) -> ArrayHandle {
    ArrayHandle(id.0)
}

pub struct Heap {
    pub values: ValuePool,
    arrays: SlabPool<Hashmap>,
    refcounts: HashMap<SlabId, u32>,
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heap {
    pub fn new() -> Self {
        Self { values: ValuePool::new(), arrays: SlabPool::new(), refcounts: HashMap::new() }
    }

    pub fn array(&self, h: ArrayHandle) -> Option<&Hashmap> {
        self.arrays.get(to_slab(h))
    }

    pub fn array_mut(&mut self, h: ArrayHandle) -> Option<&mut Hashmap> {
        self.arrays.get_mut(to_slab(h))
    }

    fn alloc_array(&mut self, map: Hashmap) -> ArrayHandle {
        let id = self.arrays.insert(map);
        self.refcounts.insert(id, 1);
        from_slab(id)
    }

    /// Deep-copies a single cell for use as a fresh, independently owned
    /// array entry: nested arrays are cloned recursively, everything
    /// else is a structural copy (retaining nothing, since a structural
    /// copy is already an independent value).
    fn clone_entry(&mut self, value_id: ValueId) -> Value {
        let nested = self.values.get(value_id).and_then(|v| v.array_handle());
        match nested {
            Some(handle) => Value::from_array(self.array_clone(handle)),
            None => self.values.get(value_id).expect("live array entry").load(),
        }
    }
}

impl ArrayHost for Heap {
    fn array_new_empty(&mut self) -> ArrayHandle {
        self.alloc_array(Hashmap::new())
    }

    fn array_new_singleton(&mut self, value: Value) -> ArrayHandle {
        let mut map = Hashmap::new();
        let id = self.values.alloc(value);
        map.insert(Some(Key::Int(0)), id);
        self.alloc_array(map)
    }

    fn array_len(&self, h: ArrayHandle) -> usize {
        self.array(h).map(Hashmap::len).unwrap_or(0)
    }

    fn array_retain(&mut self, h: ArrayHandle) {
        if let Some(count) = self.refcounts.get_mut(&to_slab(h)) {
            *count += 1;
        }
    }

    /// Drops one reference; at zero, releases every owned (non-foreign)
    /// entry's value before freeing the array itself.
    fn array_release(&mut self, h: ArrayHandle) {
        let id = to_slab(h);
        let Some(count) = self.refcounts.get_mut(&id) else { return };
        *count -= 1;
        if *count > 0 {
            return;
        }
        self.refcounts.remove(&id);
        let Some(map) = self.arrays.remove(id) else { return };
        let owned: Vec<ValueId> = map.iter().filter(|(_, n)| !n.foreign).map(|(_, n)| n.value).collect();
        let mut values = std::mem::take(&mut self.values);
        for value_id in owned {
            values.release(value_id, self);
        }
        self.values = values;
    }

    fn array_clone(&mut self, h: ArrayHandle) -> ArrayHandle {
        let Some(src) = self.array(h) else { return self.array_new_empty() };
        let entries: Vec<(Key, ValueId, bool)> = src.iter().map(|(_, n)| (n.key.clone(), n.value, n.foreign)).collect();
        let mut new_map = Hashmap::new();
        for (key, value_id, foreign) in entries {
            if foreign {
                new_map.insert_by_ref(Some(key), value_id);
                continue;
            }
            let copy = self.clone_entry(value_id);
            let new_id = self.values.alloc(copy);
            new_map.insert(Some(key), new_id);
        }
        self.alloc_array(new_map)
    }

    /// Copies every key from `src` missing in `dst` into `dst`, cloning
    /// each value so the two arrays stay independently owned.
    fn array_union_into(&mut self, dst: ArrayHandle, src: ArrayHandle) {
        let Some(src_map) = self.array(src) else { return };
        let missing: Vec<(Key, ValueId)> = src_map
            .iter()
            .filter(|(_, n)| self.array(dst).is_some_and(|d| d.lookup(&n.key).is_none()))
            .map(|(_, n)| (n.key.clone(), n.value))
            .collect();
        for (key, value_id) in missing {
            let copy = self.clone_entry(value_id);
            let new_id = self.values.alloc(copy);
            if let Some(dst_map) = self.array_mut(dst) {
                dst_map.insert(Some(key), new_id);
            }
        }
    }

    /// Threads its own recursion budget through nested arrays rather
    /// than relying on `Value::cmp`'s (which restarts at zero on every
    /// call) — the only path that can actually recurse without bound is
    /// array-within-array, so that's the one this checks directly.
    fn array_compare(&self, a: ArrayHandle, b: ArrayHandle, strict: bool, depth: u32) -> Ordering {
        if depth > glyph_value::compare::DEFAULT_COMPARE_DEPTH_LIMIT {
            return Ordering::Equal;
        }
        let (Some(map_a), Some(map_b)) = (self.array(a), self.array(b)) else { return Ordering::Equal };
        if map_a.len() != map_b.len() {
            return map_a.len().cmp(&map_b.len());
        }
        for (_, node) in map_a.iter() {
            let Some(other_id) = map_b.lookup(&node.key) else { return Ordering::Greater };
            let other_value = map_b.get(other_id).expect("lookup returned a live id").value;
            let va = self.values.get(node.value).expect("live value");
            let vb = self.values.get(other_value).expect("live value");
            let ordering = match (va.array_handle(), vb.array_handle()) {
                (Some(ha), Some(hb)) => self.array_compare(ha, hb, strict, depth + 1),
                _ => va.cmp(vb, self, strict).unwrap_or(Ordering::Equal),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl ClassCastDispatcher for Heap {
    fn object_new_empty(&mut self) -> ObjectHandle {
        ObjectHandle(0)
    }
    fn object_retain(&mut self, _h: ObjectHandle) {}
    fn object_release(&mut self, _h: ObjectHandle) {}
    fn object_to_int(&self, _h: ObjectHandle) -> Option<i64> {
        None
    }
    fn object_to_bool(&self, _h: ObjectHandle) -> Option<bool> {
        None
    }
    fn object_to_real(&self, _h: ObjectHandle) -> Option<f64> {
        None
    }
    fn object_to_string(&self, _h: ObjectHandle) -> Option<String> {
        None
    }
    fn object_compare(&self, _a: ObjectHandle, _b: ObjectHandle, _strict: bool, _depth: u32) -> Ordering {
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_singleton_wraps_under_key_zero() {
        let mut heap = Heap::new();
        let handle = heap.array_new_singleton(Value::from_int(7));
        assert_eq!(heap.array_len(handle), 1);
        let map = heap.array(handle).unwrap();
        let id = map.lookup(&Key::Int(0)).unwrap();
        let value_id = map.get(id).unwrap().value;
        assert!(matches!(heap.values.get(value_id).unwrap().kind(), glyph_value::Kind::Int(7)));
    }

    #[test]
    fn release_at_zero_refs_frees_owned_entries() {
        let mut heap = Heap::new();
        let handle = heap.array_new_singleton(Value::from_int(7));
        let map = heap.array(handle).unwrap();
        let id = map.lookup(&Key::Int(0)).unwrap();
        let value_id = map.get(id).unwrap().value;
        heap.array_release(handle);
        assert!(heap.array(handle).is_none());
        assert!(!heap.values.contains(value_id));
    }

    #[test]
    fn retain_then_release_keeps_the_array_alive_once() {
        let mut heap = Heap::new();
        let handle = heap.array_new_singleton(Value::from_int(7));
        heap.array_retain(handle);
        heap.array_release(handle);
        assert!(heap.array(handle).is_some());
        heap.array_release(handle);
        assert!(heap.array(handle).is_none());
    }

    #[test]
    fn clone_produces_an_independent_array() {
        let mut heap = Heap::new();
        let original = heap.array_new_singleton(Value::from_int(1));
        let cloned = heap.array_clone(original);
        assert_ne!(original, cloned);
        let id = heap.array(cloned).unwrap().lookup(&Key::Int(0)).unwrap();
        let value_id = heap.array(cloned).unwrap().get(id).unwrap().value;
        let original_id = heap.array(original).unwrap().lookup(&Key::Int(0)).unwrap();
        let original_value_id = heap.array(original).unwrap().get(original_id).unwrap().value;
        assert_ne!(value_id, original_value_id);
    }

    #[test]
    fn union_into_copies_missing_keys_only() {
        let mut heap = Heap::new();
        let dst = heap.array_new_empty();
        heap.array_mut(dst).unwrap().insert(Some(Key::Int(0)), heap.values.alloc(Value::from_int(1)));
        let src = heap.array_new_empty();
        heap.array_mut(src).unwrap().insert(Some(Key::Int(0)), heap.values.alloc(Value::from_int(99)));
        heap.array_mut(src).unwrap().insert(Some(Key::Int(1)), heap.values.alloc(Value::from_int(2)));
        heap.array_union_into(dst, src);
        assert_eq!(heap.array_len(dst), 2);
        let id0 = heap.array(dst).unwrap().lookup(&Key::Int(0)).unwrap();
        let value_id0 = heap.array(dst).unwrap().get(id0).unwrap().value;
        assert!(matches!(heap.values.get(value_id0).unwrap().kind(), glyph_value::Kind::Int(1)));
    }

    #[test]
    fn compare_ranks_by_length_first() {
        let mut heap = Heap::new();
        let a = heap.array_new_singleton(Value::from_int(1));
        let b = heap.array_new_empty();
        assert_eq!(heap.array_compare(a, b, false, 1), Ordering::Greater);
    }
}
