//! Property tests for the order-preserving hashmap's core invariants.

use glyph_map::{Hashmap, Insert, Key};
use glyph_value::ValueId;
use quickcheck_macros::quickcheck;

fn vid(n: u32) -> ValueId {
    ValueId(n)
}

/// `len()` always equals the number of nodes an insertion-order walk
/// visits, and that walk visits every live node exactly once.
#[quickcheck]
fn entry_count_matches_insertion_order_walk(keys: Vec<i32>) -> bool {
    let mut map = Hashmap::new();
    for (i, k) in keys.iter().enumerate() {
        map.insert(Some(Key::Int(*k as i64)), vid(i as u32));
    }
    map.iter().count() == map.len()
}

/// Inserting the same key repeatedly always leaves `lookup` pointing at
/// the most recently inserted value for that key, regardless of how
/// many times it was overwritten in between.
#[quickcheck]
fn lookup_returns_most_recent_insert(values: Vec<u32>) -> bool {
    if values.is_empty() {
        return true;
    }
    let mut map = Hashmap::new();
    let key = Key::Int(1);
    for v in &values {
        map.insert(Some(key.clone()), vid(*v));
    }
    let id = map.lookup(&key).unwrap();
    map.get(id).unwrap().value == vid(*values.last().unwrap())
}

/// A keyless insert always lands on a key strictly greater than every
/// integer key already present, no matter what order explicit integer
/// keys arrived in.
#[quickcheck]
fn auto_index_exceeds_every_present_int_key(keys: Vec<i32>) -> bool {
    let mut map = Hashmap::new();
    for (i, k) in keys.iter().enumerate() {
        map.insert(Some(Key::Int(*k as i64)), vid(i as u32));
    }
    let max_present = map
        .iter()
        .filter_map(|(_, node)| match &node.key {
            Key::Int(n) => Some(*n),
            Key::Str(_) => None,
        })
        .max();

    let Insert::Created(id) = map.insert(None, vid(u32::MAX)) else {
        return false;
    };
    let Key::Int(new_key) = map.get(id).unwrap().key.clone() else {
        return false;
    };
    match max_present {
        Some(max) => new_key > max,
        None => true,
    }
}

/// Two hashmaps built from the same ordered sequence of (key, value)
/// inserts end up with the same insertion-order sequence of entries.
#[quickcheck]
fn same_insert_sequence_yields_equal_maps(pairs: Vec<(Option<i32>, u32)>) -> bool {
    let build = |pairs: &[(Option<i32>, u32)]| {
        let mut map = Hashmap::new();
        for (k, v) in pairs {
            map.insert(k.map(|i| Key::Int(i as i64)), vid(*v));
        }
        map
    };

    let a = build(&pairs);
    let b = build(&pairs);

    let snapshot = |m: &Hashmap| -> Vec<(Key, ValueId)> {
        m.iter().map(|(_, n)| (n.key.clone(), n.value)).collect()
    };
    snapshot(&a) == snapshot(&b)
}

/// Unlinking a node removes it from the insertion-order walk and drops
/// `len()` by exactly one, without disturbing the relative order of
/// whatever remains.
#[quickcheck]
fn unlink_removes_exactly_one_entry(keys: Vec<i32>, drop_at: usize) -> bool {
    if keys.is_empty() {
        return true;
    }
    let mut map = Hashmap::new();
    let mut ids = Vec::new();
    for (i, k) in keys.iter().enumerate() {
        if let Insert::Created(id) = map.insert(Some(Key::Int(*k as i64)), vid(i as u32)) {
            ids.push(id);
        }
    }
    if ids.is_empty() {
        return true;
    }
    let target = ids[drop_at % ids.len()];
    let target_key = map.get(target).unwrap().key.clone();
    let before = map.len();

    let removed = map.unlink(target);
    removed.is_some() && map.len() == before - 1 && map.lookup(&target_key).is_none()
}
