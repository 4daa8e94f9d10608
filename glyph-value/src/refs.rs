//! The reference table: back-references from a pool slot to every
//! by-reference hashmap node that points at it, so `unset()` on the
//! owning slot can propagate into nodes holding it by reference
//! This crate treats a back-reference as an opaque tag —
//! `glyph-map` is the one that knows a tag means "bucket N, node M".

use std::collections::{HashMap, HashSet};

use crate::pool::ValueId;

/// An opaque identifier for a single by-reference slot somewhere else
/// in the engine (a hashmap node, a future local-variable table entry).
/// The value module never interprets this; it only stores and returns
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotTag(pub u64);

/// Maps a pool index to every slot that references it by reference
/// rather than by value.
#[derive(Default)]
pub struct ReferenceTable {
    refs: HashMap<ValueId, Vec<SlotTag>>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self { refs: HashMap::new() }
    }

    pub fn link(&mut self, value: ValueId, slot: SlotTag) {
        self.refs.entry(value).or_default().push(slot);
    }

    pub fn unlink(&mut self, value: ValueId, slot: SlotTag) {
        if let Some(slots) = self.refs.get_mut(&value) {
            slots.retain(|s| *s != slot);
            if slots.is_empty() {
                self.refs.remove(&value);
            }
        }
    }

    pub fn back_refs(&self, value: ValueId) -> &[SlotTag] {
        self.refs.get(&value).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Removes and returns every slot referencing `value`, for the
    /// caller to clear on its side (e.g. mark the corresponding hashmap
    /// nodes `foreign`-dangling) as part of releasing `value`.
    pub fn drain(&mut self, value: ValueId) -> Vec<SlotTag> {
        self.refs.remove(&value).unwrap_or_default()
    }
}

/// Prevents a composite release from re-entering the release of a value
/// already in the middle of being released, e.g. an array that
/// (directly or transitively) contains itself.
#[derive(Default)]
pub struct ReleaseGuard {
    in_progress: HashSet<ValueId>,
}

impl ReleaseGuard {
    pub fn new() -> Self {
        Self { in_progress: HashSet::new() }
    }

    /// Returns `true` if `id` was not already being released (the
    /// caller should proceed); `false` means a cycle was detected and
    /// the caller must treat this as a no-op.
    pub fn begin(&mut self, id: ValueId) -> bool {
        self.in_progress.insert(id)
    }

    pub fn end(&mut self, id: ValueId) {
        self.in_progress.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_util::Idx;

    #[test]
    fn link_then_unlink_clears_entry() {
        let mut table = ReferenceTable::new();
        let id = ValueId::from_usize(0);
        table.link(id, SlotTag(1));
        table.link(id, SlotTag(2));
        assert_eq!(table.back_refs(id).len(), 2);
        table.unlink(id, SlotTag(1));
        assert_eq!(table.back_refs(id), &[SlotTag(2)]);
    }

    #[test]
    fn drain_empties_and_returns_all_tags() {
        let mut table = ReferenceTable::new();
        let id = ValueId::from_usize(0);
        table.link(id, SlotTag(5));
        let drained = table.drain(id);
        assert_eq!(drained, vec![SlotTag(5)]);
        assert!(table.back_refs(id).is_empty());
    }

    #[test]
    fn release_guard_detects_reentrancy() {
        let mut guard = ReleaseGuard::new();
        let id = ValueId::from_usize(0);
        assert!(guard.begin(id));
        assert!(!guard.begin(id));
        guard.end(id);
        assert!(guard.begin(id));
    }
}
