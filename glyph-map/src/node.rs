//! A single hashmap entry: a key, its cached hash, the pool index of
//! the entry's value, and the two link sets that make the structure
//! work — a bucket chain for O(1) lookup and a doubly-linked
//! insertion-order list for deterministic iteration.

use glyph_mem::SlabId;
use glyph_value::ValueId;

use crate::key::Key;

#[derive(Debug, Clone)]
pub struct Node {
    pub key: Key,
    pub hash: u32,
    pub value: ValueId,
    /// `true` if this node holds `value` by reference rather than
    /// owning it — a `foreign` slot's value is never released when the
    /// node is unlinked, and is what the reference table's
    /// back-reference bookkeeping targets.
    pub foreign: bool,
    pub bucket_next: Option<SlabId>,
    pub order_prev: Option<SlabId>,
    pub order_next: Option<SlabId>,
}

impl Node {
    pub fn new(key: Key, value: ValueId) -> Self {
        let hash = key.hash();
        Self { key, hash, value, foreign: false, bucket_next: None, order_prev: None, order_next: None }
    }
}
