//! The six comparators a sort operation can be configured with, and the
//! stable merge sort that reorders the insertion-order list by them.

use std::cmp::Ordering;

use glyph_value::{Value, ValueHost, ValuePool};

use crate::key::Key;

/// How two entries are ranked against each other during a sort.
pub enum SortKind {
    /// Loose value comparison — the same ordering `Value::cmp` gives in
    /// non-strict mode.
    Regular,
    /// Both sides are read as `REAL` first.
    Numeric,
    /// Both sides are read as a byte string and compared lexically.
    StringAscii,
    /// Like `StringAscii`, but ASCII case is folded before comparing.
    StringCaseInsensitive,
    /// Ranks by key instead of by value, using `Regular` ordering on the
    /// key itself (an integer key always sorts before a string key).
    ByKey,
    /// A host-supplied callback, for `usort`/`uasort`/`uksort`-style
    /// custom comparators. Receives the two values (or, depending on
    /// how the caller built the entry, the two keys projected into a
    /// `Value`) and the strict ordering the callback returns.
    User(Box<dyn Fn(&Value, &Value) -> Ordering>),
}

/// One entry being sorted: its key, its value id, and the value read
/// out of the pool so the comparator doesn't need pool access on every
/// comparison.
pub struct SortEntry {
    pub key: Key,
    pub value: glyph_value::ValueId,
}

fn key_as_value(key: &Key) -> Value {
    match key {
        Key::Int(i) => Value::from_int(*i),
        Key::Str(s) => Value::from_string(s.clone()),
    }
}

fn compare_entries(
    kind: &SortKind,
    a: &SortEntry,
    b: &SortEntry,
    pool: &ValuePool,
    host: &dyn ValueHost,
) -> Ordering {
    match kind {
        SortKind::Regular => {
            let av = pool.get(a.value).expect("live entry");
            let bv = pool.get(b.value).expect("live entry");
            av.cmp(bv, host, false).unwrap_or(Ordering::Equal)
        }
        SortKind::Numeric => {
            let av = pool.get(a.value).expect("live entry");
            let bv = pool.get(b.value).expect("live entry");
            av.preview_real(host).partial_cmp(&bv.preview_real(host)).unwrap_or(Ordering::Equal)
        }
        SortKind::StringAscii => {
            let av = pool.get(a.value).expect("live entry");
            let bv = pool.get(b.value).expect("live entry");
            av.preview_string(host).cmp(&bv.preview_string(host))
        }
        SortKind::StringCaseInsensitive => {
            let av = pool.get(a.value).expect("live entry");
            let bv = pool.get(b.value).expect("live entry");
            let a_lower: Vec<u8> = av.preview_string(host).to_ascii_lowercase();
            let b_lower: Vec<u8> = bv.preview_string(host).to_ascii_lowercase();
            a_lower.cmp(&b_lower)
        }
        SortKind::ByKey => {
            let ak = key_as_value(&a.key);
            let bk = key_as_value(&b.key);
            ak.cmp(&bk, host, false).unwrap_or(Ordering::Equal)
        }
        SortKind::User(f) => {
            let av = pool.get(a.value).expect("live entry");
            let bv = pool.get(b.value).expect("live entry");
            f(av, bv)
        }
    }
}

/// A bottom-up merge sort, stable by construction (ties keep their
/// original relative order since the merge step always prefers the
/// left run on equality).
pub fn sort_entries(entries: &mut Vec<SortEntry>, kind: &SortKind, pool: &ValuePool, host: &dyn ValueHost) {
    let len = entries.len();
    if len < 2 {
        return;
    }
    let mut width = 1;
    let mut buffer: Vec<Option<SortEntry>> = Vec::with_capacity(len);
    buffer.resize_with(len, || None);
    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            merge_run(entries, &mut buffer, start, mid, end, kind, pool, host);
            start += 2 * width;
        }
        for (slot, entry) in entries.iter_mut().zip(buffer.iter_mut()) {
            *slot = entry.take().expect("every slot filled by merge_run");
        }
        width *= 2;
    }
}

#[allow(clippy::too_many_arguments)]
fn merge_run(
    entries: &mut [SortEntry],
    buffer: &mut [Option<SortEntry>],
    start: usize,
    mid: usize,
    end: usize,
    kind: &SortKind,
    pool: &ValuePool,
    host: &dyn ValueHost,
) {
    let mut left = start;
    let mut right = mid;
    let mut out = start;
    while left < mid && right < end {
        if compare_entries(kind, &entries[left], &entries[right], pool, host) != Ordering::Greater {
            buffer[out] = Some(std::mem::replace(&mut entries[left], SortEntry { key: Key::Int(0), value: glyph_value::ValueId(0) }));
            left += 1;
        } else {
            buffer[out] = Some(std::mem::replace(&mut entries[right], SortEntry { key: Key::Int(0), value: glyph_value::ValueId(0) }));
            right += 1;
        }
        out += 1;
    }
    while left < mid {
        buffer[out] = Some(std::mem::replace(&mut entries[left], SortEntry { key: Key::Int(0), value: glyph_value::ValueId(0) }));
        left += 1;
        out += 1;
    }
    while right < end {
        buffer[out] = Some(std::mem::replace(&mut entries[right], SortEntry { key: Key::Int(0), value: glyph_value::ValueId(0) }));
        right += 1;
        out += 1;
    }
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

    fn entries_from(values: &[i64], pool: &mut ValuePool) -> Vec<SortEntry> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| SortEntry { key: Key::Int(i as i64), value: pool.alloc(Value::from_int(*v)) })
            .collect()
    }

    #[test]
    fn regular_sort_orders_ascending() {
        let mut pool = ValuePool::new();
        let host = NullHost;
        let mut entries = entries_from(&[5, 1, 4, 2, 3], &mut pool);
        sort_entries(&mut entries, &SortKind::Regular, &pool, &host);
        let got: Vec<i64> = entries.iter().map(|e| pool.get(e.value).unwrap().preview_real(&host) as i64).collect();
        assert_eq!(got, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let mut pool = ValuePool::new();
        let host = NullHost;
        let a = pool.alloc(Value::from_int(1));
        let b = pool.alloc(Value::from_int(1));
        let mut entries = vec![
            SortEntry { key: Key::Int(0), value: a },
            SortEntry { key: Key::Int(1), value: b },
        ];
        sort_entries(&mut entries, &SortKind::Regular, &pool, &host);
        assert_eq!(entries[0].value, a);
        assert_eq!(entries[1].value, b);
    }

    #[test]
    fn by_key_sort_orders_on_key_not_value() {
        let mut pool = ValuePool::new();
        let host = NullHost;
        let a = pool.alloc(Value::from_int(100));
        let b = pool.alloc(Value::from_int(1));
        let mut entries = vec![
            SortEntry { key: Key::Int(5), value: a },
            SortEntry { key: Key::Int(1), value: b },
        ];
        sort_entries(&mut entries, &SortKind::ByKey, &pool, &host);
        assert_eq!(entries[0].value, b);
        assert_eq!(entries[1].value, a);
    }

    #[test]
    fn user_callback_drives_order() {
        let mut pool = ValuePool::new();
        let host = NullHost;
        let mut entries = entries_from(&[1, 2, 3], &mut pool);
        let descending: SortKind = SortKind::User(Box::new(|a: &Value, b: &Value| {
            let av = if let glyph_value::Kind::Int(i) = a.kind() { *i } else { 0 };
            let bv = if let glyph_value::Kind::Int(i) = b.kind() { *i } else { 0 };
            bv.cmp(&av)
        }));
        sort_entries(&mut entries, &descending, &pool, &host);
        let got: Vec<i64> = entries.iter().map(|e| pool.get(e.value).unwrap().preview_real(&host) as i64).collect();
        assert_eq!(got, vec![3, 2, 1]);
    }
}
