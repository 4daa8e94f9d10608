//! Callback-driven traversal over a [`Hashmap`], for callers that want
//! to stop partway through without building an intermediate `Vec`.

use glyph_value::ValueId;

use crate::hashmap::Hashmap;
use crate::key::Key;

/// What a walk callback asks the walker to do next.
pub enum WalkControl {
    Continue,
    Break,
}

impl Hashmap {
    /// Visits every entry in insertion order, stopping early if the
    /// callback returns [`WalkControl::Break`].
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&Key, ValueId) -> WalkControl,
    {
        let mut cursor = self.first();
        while let Some(id) = cursor {
            let node = self.get(id).expect("insertion-order list points at a live node");
            match f(&node.key, node.value) {
                WalkControl::Continue => cursor = node.order_next,
                WalkControl::Break => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_visits_every_entry_in_order() {
        let mut map = Hashmap::new();
        map.insert(Some(Key::Int(0)), ValueId(10));
        map.insert(Some(Key::Int(1)), ValueId(20));
        map.insert(Some(Key::Int(2)), ValueId(30));
        let mut seen = Vec::new();
        map.for_each(|_, value| {
            seen.push(value);
            WalkControl::Continue
        });
        assert_eq!(seen, vec![ValueId(10), ValueId(20), ValueId(30)]);
    }

    #[test]
    fn walk_stops_on_break() {
        let mut map = Hashmap::new();
        map.insert(Some(Key::Int(0)), ValueId(10));
        map.insert(Some(Key::Int(1)), ValueId(20));
        let mut seen = Vec::new();
        map.for_each(|_, value| {
            seen.push(value);
            WalkControl::Break
        });
        assert_eq!(seen, vec![ValueId(10)]);
    }
}
