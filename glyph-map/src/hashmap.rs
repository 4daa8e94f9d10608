//! The order-preserving associative array: a power-of-two bucket array
//! for lookup, a doubly-linked insertion-order list for iteration, and
//! PHP's auto-index rule for keyless inserts.

use glyph_mem::{SlabId, SlabPool};
use glyph_value::ValueId;

use crate::key::Key;
use crate::node::Node;

const INITIAL_BUCKETS: usize = 16;
/// Rehash once the load factor would exceed 3 entries per bucket.
const LOAD_FACTOR_NUMERATOR: usize = 3;

/// What happened when inserting at a key that may already be present.
#[derive(Debug)]
pub enum Insert {
    Created(SlabId),
    /// A node already held this key; `previous` is the value it held
    /// (the caller is responsible for releasing it unless
    /// `previous_foreign` is set, in which case the slot was a
    /// by-reference alias and must not be released here).
    Replaced { node: SlabId, previous: ValueId, previous_foreign: bool },
}

pub struct Hashmap {
    buckets: Vec<Option<SlabId>>,
    nodes: SlabPool<Node>,
    head: Option<SlabId>,
    tail: Option<SlabId>,
    count: usize,
    auto_index: i64,
    /// `$GLOBALS` is the only hashmap instance that sets this; insert
    /// and release become no-ops that log a notice instead of
    /// mutating.
    pub(crate) immutable: bool,
}

impl Default for Hashmap {
    fn default() -> Self {
        Self::new()
    }
}

impl Hashmap {
    pub fn new() -> Self {
        Self {
            buckets: vec![None; INITIAL_BUCKETS],
            nodes: SlabPool::new(),
            head: None,
            tail: None,
            count: 0,
            auto_index: 0,
            immutable: false,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    fn bucket_index(&self, hash: u32) -> usize {
        (hash as usize) & (self.buckets.len() - 1)
    }

    fn maybe_grow(&mut self) {
        if self.count + 1 < self.buckets.len() * LOAD_FACTOR_NUMERATOR {
            return;
        }
        let new_len = self.buckets.len() * 2;
        let mut new_buckets = vec![None; new_len];
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = self.nodes.get(id).expect("insertion-order list points at a live node");
            let idx = (node.hash as usize) & (new_len - 1);
            self.nodes.get_mut(id).unwrap().bucket_next = new_buckets[idx];
            new_buckets[idx] = Some(id);
            cursor = node.order_next;
        }
        self.buckets = new_buckets;
    }

    pub fn lookup(&self, key: &Key) -> Option<SlabId> {
        let hash = key.hash();
        let idx = self.bucket_index(hash);
        let mut cursor = self.buckets[idx];
        while let Some(id) = cursor {
            let node = self.nodes.get(id)?;
            if node.hash == hash && node.key == *key {
                return Some(id);
            }
            cursor = node.bucket_next;
        }
        None
    }

    pub fn get(&self, id: SlabId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: SlabId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Inserts `value` at `key`, or appends it with the next auto-index
    /// if `key` is `None`. Advances the auto-index whenever an explicit
    /// integer key is seen that is `>=` the current one, even out of
    /// insertion order — tracked as a running maximum rather than by
    /// rescanning every existing key on each insert.
    pub fn insert(&mut self, key: Option<Key>, value: ValueId) -> Insert {
        let key = key.unwrap_or_else(|| {
            let k = Key::Int(self.auto_index);
            self.auto_index += 1;
            k
        });
        if let Key::Int(i) = key {
            if i >= self.auto_index {
                self.auto_index = i + 1;
            }
        }

        if let Some(id) = self.lookup(&key) {
            let node = self.nodes.get_mut(id).expect("lookup returned a live id");
            let previous = node.value;
            let previous_foreign = node.foreign;
            node.value = value;
            node.foreign = false;
            return Insert::Replaced { node: id, previous, previous_foreign };
        }

        self.maybe_grow();
        let hash = key.hash();
        let idx = self.bucket_index(hash);
        let mut node = Node::new(key, value);
        node.bucket_next = self.buckets[idx];
        node.order_prev = self.tail;
        let id = self.nodes.insert(node);
        self.buckets[idx] = Some(id);
        if let Some(tail) = self.tail {
            self.nodes.get_mut(tail).unwrap().order_next = Some(id);
        } else {
            self.head = Some(id);
        }
        self.tail = Some(id);
        self.count += 1;
        Insert::Created(id)
    }

    /// Like [`Hashmap::insert`], but the resulting node is marked
    /// `foreign`: its value is a by-reference alias, never owned, and
    /// must not be released when the node is unlinked.
    pub fn insert_by_ref(&mut self, key: Option<Key>, value: ValueId) -> Insert {
        let outcome = self.insert(key, value);
        let id = match outcome {
            Insert::Created(id) => id,
            Insert::Replaced { node, .. } => node,
        };
        self.nodes.get_mut(id).unwrap().foreign = true;
        outcome
    }

    /// Removes the node at `id`, unlinking it from both the bucket
    /// chain and the insertion-order list, and returns it so the
    /// caller can release its value (unless `foreign`).
    pub fn unlink(&mut self, id: SlabId) -> Option<Node> {
        let node = self.nodes.get(id)?.clone();
        let idx = self.bucket_index(node.hash);

        let mut cursor = self.buckets[idx];
        let mut prev: Option<SlabId> = None;
        while let Some(cur) = cursor {
            if cur == id {
                let next = self.nodes.get(cur).unwrap().bucket_next;
                match prev {
                    Some(p) => self.nodes.get_mut(p).unwrap().bucket_next = next,
                    None => self.buckets[idx] = next,
                }
                break;
            }
            prev = Some(cur);
            cursor = self.nodes.get(cur).unwrap().bucket_next;
        }

        match node.order_prev {
            Some(p) => self.nodes.get_mut(p).unwrap().order_next = node.order_next,
            None => self.head = node.order_next,
        }
        match node.order_next {
            Some(n) => self.nodes.get_mut(n).unwrap().order_prev = node.order_prev,
            None => self.tail = node.order_prev,
        }

        self.nodes.remove(id);
        self.count -= 1;
        Some(node)
    }

    /// Iterates nodes in insertion order.
    pub fn iter(&self) -> HashmapIter<'_> {
        HashmapIter { map: self, cursor: self.head }
    }

    pub fn first(&self) -> Option<SlabId> {
        self.head
    }

    pub fn last(&self) -> Option<SlabId> {
        self.tail
    }
}

pub struct HashmapIter<'a> {
    map: &'a Hashmap,
    cursor: Option<SlabId>,
}

impl<'a> Iterator for HashmapIter<'a> {
    type Item = (SlabId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.map.get(id)?;
        self.cursor = node.order_next;
        Some((id, node))
    }
}
