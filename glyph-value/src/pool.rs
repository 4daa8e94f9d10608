//! The value pool: stable 32-bit handles over a slab of [`Value`]
//! cells, built directly on [`glyph_mem::SlabPool`] so slot reuse and
//! the LIFO free list come for free.

use glyph_mem::SlabPool;
use glyph_util::{define_idx, Idx};

use crate::host::ValueHost;
use crate::refs::ReleaseGuard;
use crate::value::Value;

define_idx!(ValueId);

fn to_slab(id: ValueId) -> glyph_mem::SlabId {
    glyph_mem::SlabId(id.0)
}

fn from_slab(id: glyph_mem::SlabId) -> ValueId {
    ValueId(id.0)
}

/// Owns every live [`Value`] cell allocated through it. A value
/// constructed directly (`Value::from_int`, etc.) and never passed to
/// [`ValuePool::alloc`] is a constant living outside the pool — the
/// classic `u32::MAX` sentinel index collapses to
/// `Value::index() == None`.
pub struct ValuePool {
    slab: SlabPool<Value>,
    guard: ReleaseGuard,
}

impl Default for ValuePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ValuePool {
    pub fn new() -> Self {
        Self { slab: SlabPool::new(), guard: ReleaseGuard::new() }
    }

    pub fn len(&self) -> usize {
        self.slab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slab.is_empty()
    }

    pub fn alloc(&mut self, mut value: Value) -> ValueId {
        // Reserve the slot first so the id can be stamped onto the
        // value before it's moved in; SlabPool hands out the id at
        // insertion time, so stamp-then-reinsert is the simplest way to
        // keep `Value::index()` accurate without a second lookup.
        let slab_id = self.slab.insert(Value::null());
        let id = from_slab(slab_id);
        value.set_index(id);
        *self.slab.get_mut(slab_id).expect("slot just inserted") = value;
        id
    }

    pub fn get(&self, id: ValueId) -> Option<&Value> {
        self.slab.get(to_slab(id))
    }

    pub fn get_mut(&mut self, id: ValueId) -> Option<&mut Value> {
        self.slab.get_mut(to_slab(id))
    }

    pub fn contains(&self, id: ValueId) -> bool {
        self.slab.contains(to_slab(id))
    }

    /// Releases the cell at `id`, dropping any composite handle it
    /// holds via `host`. Reentrant releases (a composite whose release
    /// cascades back into releasing the same id, e.g. a self-referential
    /// array) are guarded against and become no-ops on the second entry.
    pub fn release(&mut self, id: ValueId, host: &mut dyn ValueHost) {
        if !self.guard.begin(id) {
            return;
        }
        if let Some(mut value) = self.slab.remove(to_slab(id)) {
            value.release_composite(host);
        }
        self.guard.end(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ArrayHandle, ClassCastDispatcher, ObjectHandle};
    use std::cmp::Ordering;

    struct NullHost;
    impl crate::host::ArrayHost for NullHost {
        fn array_new_empty(&mut self) -> ArrayHandle {
            ArrayHandle(0)
        }
        fn array_new_singleton(&mut self, _value: Value) -> ArrayHandle {
            ArrayHandle(1)
        }
        fn array_len(&self, _h: ArrayHandle) -> usize {
            0
        }
        fn array_retain(&mut self, _h: ArrayHandle) {}
        fn array_release(&mut self, _h: ArrayHandle) {}
        fn array_clone(&mut self, h: ArrayHandle) -> ArrayHandle {
            h
        }
        fn array_union_into(&mut self, _dst: ArrayHandle, _src: ArrayHandle) {}
        fn array_compare(&self, _a: ArrayHandle, _b: ArrayHandle, _strict: bool, _depth: u32) -> Ordering {
            Ordering::Equal
        }
    }
    impl ClassCastDispatcher for NullHost {
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

    #[test]
    fn alloc_stamps_index_onto_value() {
        let mut pool = ValuePool::new();
        let id = pool.alloc(Value::from_int(7));
        assert_eq!(pool.get(id).unwrap().index(), Some(id));
    }

    #[test]
    fn release_removes_from_pool() {
        let mut pool = ValuePool::new();
        let mut host = NullHost;
        let id = pool.alloc(Value::from_int(7));
        pool.release(id, &mut host);
        assert!(!pool.contains(id));
    }

    #[test]
    fn double_release_is_a_noop() {
        let mut pool = ValuePool::new();
        let mut host = NullHost;
        let id = pool.alloc(Value::from_int(7));
        pool.release(id, &mut host);
        pool.release(id, &mut host);
        assert_eq!(pool.len(), 0);
    }
}
