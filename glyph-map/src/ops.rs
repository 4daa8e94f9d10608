//! Composite operations between two hashmaps: union, merge, replace, and
//! the intersect/diff family. Every operation here produces or mutates a
//! *destination* map while leaving its sources untouched, copying (not
//! aliasing) each value it brings across so the two maps stay
//! independently owned.

use std::cmp::Ordering;

use glyph_value::{Value, ValueHost, ValueId, ValuePool};

use crate::hashmap::{Hashmap, Insert};
use crate::key::Key;

/// How two candidate values are judged equal for `intersect`/`diff`.
pub enum MatchMode<'a> {
    /// Only the key has to be present on both sides; values are never
    /// inspected.
    KeyOnly,
    /// PHP's `===` value comparison (type and value both match).
    Strict,
    /// PHP's `==` value comparison.
    Loose,
    /// A host-supplied callback; values match when it returns `Equal`.
    Callback(&'a dyn Fn(&Value, &Value) -> Ordering),
}

fn values_match(mode: &MatchMode, a: &Value, b: &Value, host: &dyn ValueHost) -> bool {
    match mode {
        MatchMode::KeyOnly => true,
        MatchMode::Strict => a.cmp(b, host, true).map(|o| o == Ordering::Equal).unwrap_or(false),
        MatchMode::Loose => a.cmp(b, host, false).map(|o| o == Ordering::Equal).unwrap_or(false),
        MatchMode::Callback(f) => f(a, b) == Ordering::Equal,
    }
}

/// Copies a value into `pool`, retaining whatever composite handle it
/// holds so the copy is an independent owner rather than an alias.
fn copy_value(pool: &mut ValuePool, id: ValueId, host: &mut dyn ValueHost) -> ValueId {
    let mut copy = pool.get(id).expect("live source value").load();
    if let Some(h) = copy.array_handle() {
        host.array_retain(h);
    }
    if let Some(h) = copy.object_handle() {
        host.object_retain(h);
    }
    pool.alloc(copy)
}

/// If `outcome` replaced a previously-owned value, releases it.
fn release_replaced(outcome: Insert, pool: &mut ValuePool, host: &mut dyn ValueHost) {
    if let Insert::Replaced { previous, previous_foreign, .. } = outcome {
        if !previous_foreign {
            pool.release(previous, host);
        }
    }
}

/// `array1 + array2`: every key present in `src` but absent from `dst`
/// is copied across. Keys already present in `dst` keep their existing
/// value — the left operand always wins.
pub fn union_into(dst: &mut Hashmap, src: &Hashmap, pool: &mut ValuePool, host: &mut dyn ValueHost) {
    let missing: Vec<(Key, ValueId)> =
        src.iter().filter(|(_, node)| dst.lookup(&node.key).is_none()).map(|(_, node)| (node.key.clone(), node.value)).collect();
    for (key, value) in missing {
        let copied = copy_value(pool, value, host);
        dst.insert(Some(key), copied);
    }
}

/// Numeric keys from `src` are appended under fresh auto-indices;
/// string keys overwrite the matching entry in `dst` if present.
pub fn merge_into(dst: &mut Hashmap, src: &Hashmap, pool: &mut ValuePool, host: &mut dyn ValueHost) {
    let entries: Vec<(Key, ValueId)> = src.iter().map(|(_, node)| (node.key.clone(), node.value)).collect();
    for (key, value) in entries {
        let copied = copy_value(pool, value, host);
        match key {
            Key::Int(_) => {
                dst.insert(None, copied);
            }
            Key::Str(_) => {
                let outcome = dst.insert(Some(key), copied);
                release_replaced(outcome, pool, host);
            }
        }
    }
}

/// Every entry in `src` is inserted into `dst` under its own key,
/// overwriting whatever was already there.
pub fn replace_into(dst: &mut Hashmap, src: &Hashmap, pool: &mut ValuePool, host: &mut dyn ValueHost) {
    let entries: Vec<(Key, ValueId)> = src.iter().map(|(_, node)| (node.key.clone(), node.value)).collect();
    for (key, value) in entries {
        let copied = copy_value(pool, value, host);
        let outcome = dst.insert(Some(key), copied);
        release_replaced(outcome, pool, host);
    }
}

/// A new map holding every entry of `left` whose key (and, per `mode`,
/// value) is also present in `right`, in `left`'s insertion order.
pub fn intersect(
    left: &Hashmap,
    right: &Hashmap,
    mode: &MatchMode,
    pool: &mut ValuePool,
    host: &mut dyn ValueHost,
) -> Hashmap {
    let mut out = Hashmap::new();
    for (_, node) in left.iter() {
        let Some(other_id) = right.lookup(&node.key) else { continue };
        let other_value = right.get(other_id).expect("lookup returned a live id").value;
        let left_value = pool.get(node.value).expect("live left value");
        let right_value = pool.get(other_value).expect("live right value");
        if values_match(mode, left_value, right_value, host) {
            let copied = copy_value(pool, node.value, host);
            out.insert(Some(node.key.clone()), copied);
        }
    }
    out
}

/// A new map holding every entry of `left` whose key (and, per `mode`,
/// value) is absent from `right`, in `left`'s insertion order.
pub fn diff(left: &Hashmap, right: &Hashmap, mode: &MatchMode, pool: &mut ValuePool, host: &mut dyn ValueHost) -> Hashmap {
    let mut out = Hashmap::new();
    for (_, node) in left.iter() {
        let present = match right.lookup(&node.key) {
            None => false,
            Some(other_id) => {
                let other_value = right.get(other_id).expect("lookup returned a live id").value;
                let left_value = pool.get(node.value).expect("live left value");
                let right_value = pool.get(other_value).expect("live right value");
                values_match(mode, left_value, right_value, host)
            }
        };
        if !present {
            let copied = copy_value(pool, node.value, host);
            out.insert(Some(node.key.clone()), copied);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_value::{ArrayHandle, ArrayHost, ClassCastDispatcher, ObjectHandle};

    struct NullHost;
    impl ArrayHost for NullHost {
        fn array_new_empty(&mut self) -> ArrayHandle {
            ArrayHandle(0)
        }
        fn array_new_singleton(&mut self, _value: Value) -> ArrayHandle {
            ArrayHandle(0)
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
    fn union_keeps_left_on_conflict() {
        let mut pool = ValuePool::new();
        let mut host = NullHost;
        let mut left = Hashmap::new();
        let mut right = Hashmap::new();
        left.insert(Some(Key::Int(0)), pool.alloc(Value::from_int(1)));
        right.insert(Some(Key::Int(0)), pool.alloc(Value::from_int(99)));
        right.insert(Some(Key::Int(1)), pool.alloc(Value::from_int(2)));
        union_into(&mut left, &right, &mut pool, &mut host);
        assert_eq!(left.len(), 2);
        let id0 = left.lookup(&Key::Int(0)).unwrap();
        let v0 = pool.get(left.get(id0).unwrap().value).unwrap();
        assert!(matches!(v0.kind(), glyph_value::Kind::Int(1)));
    }

    #[test]
    fn merge_appends_numeric_overwrites_string() {
        let mut pool = ValuePool::new();
        let mut host = NullHost;
        let mut dst = Hashmap::new();
        dst.insert(Some(Key::Int(0)), pool.alloc(Value::from_int(1)));
        dst.insert(Some(Key::from_str("name")), pool.alloc(Value::from_string("old")));
        let mut src = Hashmap::new();
        src.insert(Some(Key::Int(0)), pool.alloc(Value::from_int(2)));
        src.insert(Some(Key::from_str("name")), pool.alloc(Value::from_string("new")));
        merge_into(&mut dst, &src, &mut pool, &mut host);
        assert_eq!(dst.len(), 3);
        let name_id = dst.lookup(&Key::from_str("name")).unwrap();
        let name_value = pool.get(dst.get(name_id).unwrap().value).unwrap();
        assert!(matches!(name_value.kind(), glyph_value::Kind::String(s) if s == b"new"));
    }

    #[test]
    fn intersect_keeps_only_matching_entries() {
        let mut pool = ValuePool::new();
        let mut host = NullHost;
        let mut left = Hashmap::new();
        left.insert(Some(Key::Int(0)), pool.alloc(Value::from_int(1)));
        left.insert(Some(Key::Int(1)), pool.alloc(Value::from_int(2)));
        let mut right = Hashmap::new();
        right.insert(Some(Key::Int(0)), pool.alloc(Value::from_int(1)));
        let result = intersect(&left, &right, &MatchMode::Strict, &mut pool, &mut host);
        assert_eq!(result.len(), 1);
        assert!(result.lookup(&Key::Int(0)).is_some());
    }

    #[test]
    fn diff_keeps_only_unmatched_entries() {
        let mut pool = ValuePool::new();
        let mut host = NullHost;
        let mut left = Hashmap::new();
        left.insert(Some(Key::Int(0)), pool.alloc(Value::from_int(1)));
        left.insert(Some(Key::Int(1)), pool.alloc(Value::from_int(2)));
        let mut right = Hashmap::new();
        right.insert(Some(Key::Int(0)), pool.alloc(Value::from_int(1)));
        let result = diff(&left, &right, &MatchMode::Strict, &mut pool, &mut host);
        assert_eq!(result.len(), 1);
        assert!(result.lookup(&Key::Int(1)).is_some());
    }
}
