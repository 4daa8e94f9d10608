//! The `$GLOBALS` wrapper: one distinguished, effectively-immutable map
//! instance per engine. Its buckets are never freed by emptying it, and
//! the ordinary insert/unlink path is closed off — attempts through it
//! log a notice and do nothing, matching the one privileged path (the
//! VM's own top-level-scope bootstrap) that is still allowed to write
//! through [`GlobalsMap::raw_mut`].

use glyph_mem::SlabId;
use glyph_value::ValueId;

use crate::hashmap::{Hashmap, HashmapIter, Insert};
use crate::key::Key;
use crate::node::Node;

pub struct GlobalsMap {
    inner: Hashmap,
}

impl Default for GlobalsMap {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalsMap {
    pub fn new() -> Self {
        let mut inner = Hashmap::new();
        inner.immutable = true;
        Self { inner }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn lookup(&self, key: &Key) -> Option<SlabId> {
        self.inner.lookup(key)
    }

    pub fn get(&self, id: SlabId) -> Option<&Node> {
        self.inner.get(id)
    }

    pub fn iter(&self) -> HashmapIter<'_> {
        self.inner.iter()
    }

    /// A no-op that logs the rejection — ordinary script-level writes to
    /// `$GLOBALS` go through here.
    pub fn insert(&mut self, key: Option<Key>, _value: ValueId) {
        tracing::warn!(?key, "insert into $GLOBALS ignored: the map is immutable");
    }

    /// A no-op that logs the rejection.
    pub fn unlink(&mut self, id: SlabId) {
        tracing::warn!(?id, "unlink from $GLOBALS ignored: the map is immutable");
    }

    /// The VM's bootstrap path: direct, unguarded access to the backing
    /// map for populating it from the top-level scope.
    pub fn raw_mut(&mut self) -> &mut Hashmap {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_through_the_guarded_path_is_a_noop() {
        let mut globals = GlobalsMap::new();
        globals.insert(Some(Key::Int(0)), ValueId(1));
        assert_eq!(globals.len(), 0);
    }

    #[test]
    fn raw_mut_bypasses_the_guard() {
        let mut globals = GlobalsMap::new();
        let Insert::Created(_) = globals.raw_mut().insert(Some(Key::Int(0)), ValueId(1)) else {
            panic!("expected created")
        };
        assert_eq!(globals.len(), 1);
    }
}
