//! Composes [`glyph_map::Heap`] with a minimal object table into the
//! single type a VM hands to every `glyph-value`/`glyph-map` operation
//! as its [`ValueHost`].
//!
//! No class-definition or method-resolution system lives in this
//! workspace, so [`ObjectTable`] tracks only what the host API surface
//! itself needs: a live handle per instantiated object and its
//! refcount, for the "per-VM list of active class instances"
//! bookkeeping. Magic-method cast dispatch stays inert, the same way
//! `Heap`'s own stand-in does, because there is no class body anywhere
//! in scope to dispatch to.

use std::cmp::Ordering;
use std::collections::HashMap;

use glyph_map::Heap;
use glyph_value::{ArrayHandle, ArrayHost, ClassCastDispatcher, ObjectHandle, Value, ValueHost};

/// Tracks live object handles and their refcounts. Real cast dispatch
/// (`__toInt`, `__toString`, ...) has nowhere to route to without a
/// class system, so those methods always report "no magic method
/// defined" rather than fabricate behavior.
#[derive(Default)]
pub struct ObjectTable {
    refcounts: HashMap<u32, u32>,
    next: u32,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live object handles, for the host API's "list active class
    /// instances" surface.
    pub fn active(&self) -> impl Iterator<Item = ObjectHandle> + '_ {
        self.refcounts.keys().copied().map(ObjectHandle)
    }

    pub fn len(&self) -> usize {
        self.refcounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refcounts.is_empty()
    }
}

impl ClassCastDispatcher for ObjectTable {
    fn object_new_empty(&mut self) -> ObjectHandle {
        let id = self.next;
        self.next += 1;
        self.refcounts.insert(id, 1);
        ObjectHandle(id)
    }

    fn object_retain(&mut self, h: ObjectHandle) {
        if let Some(count) = self.refcounts.get_mut(&h.0) {
            *count += 1;
        }
    }

    fn object_release(&mut self, h: ObjectHandle) {
        let Some(count) = self.refcounts.get_mut(&h.0) else { return };
        *count -= 1;
        if *count == 0 {
            self.refcounts.remove(&h.0);
        }
    }

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

/// One VM's value storage: arrays via `Heap`, objects via `ObjectTable`.
/// Implements `ArrayHost`/`ClassCastDispatcher` by straight delegation,
/// so it satisfies `ValueHost` for every `glyph-value`/`glyph-map` call
/// a VM makes.
#[derive(Default)]
pub struct EngineHost {
    pub heap: Heap,
    pub objects: ObjectTable,
}

impl EngineHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArrayHost for EngineHost {
    fn array_new_empty(&mut self) -> ArrayHandle {
        self.heap.array_new_empty()
    }
    fn array_new_singleton(&mut self, value: Value) -> ArrayHandle {
        self.heap.array_new_singleton(value)
    }
    fn array_len(&self, h: ArrayHandle) -> usize {
        self.heap.array_len(h)
    }
    fn array_retain(&mut self, h: ArrayHandle) {
        self.heap.array_retain(h)
    }
    fn array_release(&mut self, h: ArrayHandle) {
        self.heap.array_release(h)
    }
    fn array_clone(&mut self, h: ArrayHandle) -> ArrayHandle {
        self.heap.array_clone(h)
    }
    fn array_union_into(&mut self, dst: ArrayHandle, src: ArrayHandle) {
        self.heap.array_union_into(dst, src)
    }
    fn array_compare(&self, a: ArrayHandle, b: ArrayHandle, strict: bool, depth: u32) -> Ordering {
        self.heap.array_compare(a, b, strict, depth)
    }
}

impl ClassCastDispatcher for EngineHost {
    fn object_new_empty(&mut self) -> ObjectHandle {
        self.objects.object_new_empty()
    }
    fn object_retain(&mut self, h: ObjectHandle) {
        self.objects.object_retain(h)
    }
    fn object_release(&mut self, h: ObjectHandle) {
        self.objects.object_release(h)
    }
    fn object_to_int(&self, h: ObjectHandle) -> Option<i64> {
        self.objects.object_to_int(h)
    }
    fn object_to_bool(&self, h: ObjectHandle) -> Option<bool> {
        self.objects.object_to_bool(h)
    }
    fn object_to_real(&self, h: ObjectHandle) -> Option<f64> {
        self.objects.object_to_real(h)
    }
    fn object_to_string(&self, h: ObjectHandle) -> Option<String> {
        self.objects.object_to_string(h)
    }
    fn object_compare(&self, a: ObjectHandle, b: ObjectHandle, strict: bool, depth: u32) -> Ordering {
        self.objects.object_compare(a, b, strict, depth)
    }
}

// `EngineHost` satisfies the blanket `ValueHost` impl on its own, the
// way `Heap` does.
static_assertions::assert_impl_all!(EngineHost: ValueHost);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_handles_are_distinct_and_refcounted() {
        let mut objects = ObjectTable::new();
        let a = objects.object_new_empty();
        let b = objects.object_new_empty();
        assert_ne!(a, b);
        assert_eq!(objects.len(), 2);
        objects.object_release(a);
        assert_eq!(objects.len(), 1);
    }

    #[test]
    fn retain_then_release_keeps_the_object_alive_once() {
        let mut objects = ObjectTable::new();
        let h = objects.object_new_empty();
        objects.object_retain(h);
        objects.object_release(h);
        assert_eq!(objects.len(), 1);
        objects.object_release(h);
        assert_eq!(objects.len(), 0);
    }

    #[test]
    fn cast_dispatch_is_inert_with_no_class_system() {
        let objects = ObjectTable::new();
        assert_eq!(objects.object_to_int(ObjectHandle(0)), None);
        assert_eq!(objects.object_compare(ObjectHandle(0), ObjectHandle(1), false, 0), Ordering::Equal);
    }

    #[test]
    fn engine_host_delegates_arrays_to_its_heap() {
        let mut host = EngineHost::new();
        let h = host.array_new_singleton(Value::from_int(5));
        assert_eq!(host.array_len(h), 1);
    }
}
