//! An explicit, mutable iteration position over a [`crate::Hashmap`] —
//! the PHP "internal array pointer" (`current`/`next`/`prev`/`reset`/
//! `end`) rather than a one-shot `Iterator`.

use glyph_mem::SlabId;

use crate::hashmap::Hashmap;

#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    position: Option<SlabId>,
}

impl Cursor {
    pub fn at_start(map: &Hashmap) -> Self {
        Self { position: map.first() }
    }

    pub fn at_end(map: &Hashmap) -> Self {
        Self { position: map.last() }
    }

    pub fn current(&self) -> Option<SlabId> {
        self.position
    }

    pub fn reset(&mut self, map: &Hashmap) {
        self.position = map.first();
    }

    pub fn end(&mut self, map: &Hashmap) {
        self.position = map.last();
    }

    /// Advances one step in insertion order; lands on `None` ("past the
    /// end") if already at the last node or the map is empty.
    pub fn advance(&mut self, map: &Hashmap) {
        self.position = self.position.and_then(|id| map.get(id)?.order_next);
    }

    /// Steps back one position; lands on `None` if already at the
    /// first node.
    pub fn retreat(&mut self, map: &Hashmap) {
        self.position = self.position.and_then(|id| map.get(id)?.order_prev);
    }

    pub fn is_valid(&self, map: &Hashmap) -> bool {
        self.position.is_some_and(|id| map.get(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashmap::Insert;
    use crate::key::Key;
    use glyph_value::ValueId;

    #[test]
    fn advance_walks_insertion_order_then_falls_off_the_end() {
        let mut map = Hashmap::new();
        map.insert(Some(Key::Int(1)), ValueId(1));
        map.insert(Some(Key::Int(2)), ValueId(2));
        let mut cursor = Cursor::at_start(&map);
        let first = cursor.current().unwrap();
        assert_eq!(map.get(first).unwrap().key, Key::Int(1));
        cursor.advance(&map);
        let second = cursor.current().unwrap();
        assert_eq!(map.get(second).unwrap().key, Key::Int(2));
        cursor.advance(&map);
        assert!(cursor.current().is_none());
    }

    #[test]
    fn end_then_retreat_reaches_start() {
        let mut map = Hashmap::new();
        let Insert::Created(a) = map.insert(Some(Key::Int(1)), ValueId(1)) else { panic!() };
        map.insert(Some(Key::Int(2)), ValueId(2));
        let mut cursor = Cursor::at_end(&map);
        cursor.retreat(&map);
        assert_eq!(cursor.current(), Some(a));
    }
}
