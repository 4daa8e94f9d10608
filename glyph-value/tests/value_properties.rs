//! Property tests for the value cell's coercion and copy semantics.

use std::cmp::Ordering;

use glyph_value::host::{ArrayHandle, ArrayHost, ClassCastDispatcher, ObjectHandle};
use glyph_value::Value;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

/// A host with no real array/object storage behind it — every scalar
/// coercion law below never touches a composite handle's contents, so
/// a host that just accepts handles without modeling them is enough.
struct NullHost;

impl ArrayHost for NullHost {
    fn array_new_empty(&mut self) -> ArrayHandle {
        ArrayHandle(0)
    }
    fn array_new_singleton(&mut self, _value: Value) -> ArrayHandle {
        ArrayHandle(1)
    }
    fn array_len(&self, h: ArrayHandle) -> usize {
        if h.0 == 1 {
            1
        } else {
            0
        }
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

/// A scalar drawn from every non-composite `Kind`, for laws that hold
/// regardless of which scalar type they start from.
#[derive(Clone, Debug)]
enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    Str(String),
}

impl Scalar {
    fn into_value(self) -> Value {
        match self {
            Scalar::Null => Value::null(),
            Scalar::Bool(b) => Value::from_bool(b),
            Scalar::Int(i) => Value::from_int(i),
            Scalar::Real(r) => Value::from_real(r),
            Scalar::Str(s) => Value::from_string(s),
        }
    }
}

impl Arbitrary for Scalar {
    fn arbitrary(g: &mut Gen) -> Self {
        match u32::arbitrary(g) % 5 {
            0 => Scalar::Null,
            1 => Scalar::Bool(bool::arbitrary(g)),
            2 => Scalar::Int(i64::arbitrary(g)),
            3 => {
                let r = f64::arbitrary(g);
                Scalar::Real(if r.is_finite() { r } else { 0.0 })
            }
            _ => {
                let len = u8::arbitrary(g) % 12;
                let s: String = (0..len).map(|_| *g.choose(&['a', 'b', ' ', '!', '9']).unwrap()).collect();
                Scalar::Str(s)
            }
        }
    }
}

/// A digit string, optionally negative and optionally zero-padded —
/// the exact domain the leading-zero exception in the round-trip law
/// is about.
#[derive(Clone, Debug)]
struct DigitString(String);

impl Arbitrary for DigitString {
    fn arbitrary(g: &mut Gen) -> Self {
        let negative = bool::arbitrary(g);
        let leading_zeros = u8::arbitrary(g) % 4;
        let digits = 1 + u8::arbitrary(g) % 6;
        let mut s = String::new();
        if negative {
            s.push('-');
        }
        for _ in 0..leading_zeros {
            s.push('0');
        }
        for _ in 0..digits {
            s.push(char::from(b'0' + u8::arbitrary(g) % 10));
        }
        DigitString(s)
    }
}

/// Bool round-trip (spec 8.2): `to_bool(to_int(to_bool(v))) == to_bool(v)`
/// for every scalar `v`.
#[quickcheck]
fn bool_round_trip_is_stable(scalar: Scalar) -> bool {
    let mut host = NullHost;
    let mut v = scalar.into_value();
    let first = v.to_bool(&mut host);
    let _ = v.to_int(&mut host);
    let second = v.to_bool(&mut host);
    first == second
}

/// Normalization idempotence (spec 8.1) over the domain where it's
/// meaningful: a digit string, or an int, round-tripped through
/// `to_string; to_int; to_string` always lands on the same minimal
/// decimal rendering that coercing straight to int and back would.
#[quickcheck]
fn numeric_round_trip_normalizes_to_the_same_string(input: DigitString) -> bool {
    let mut host = NullHost;

    let mut chained = Value::from_string(input.0.clone());
    let _ = chained.to_string_value(&mut host);
    let _ = chained.to_int(&mut host);
    let chained_result = chained.to_string_value(&mut host).to_vec();

    let mut direct = Value::from_string(input.0);
    let _ = direct.to_int(&mut host);
    let direct_result = direct.to_string_value(&mut host).to_vec();

    chained_result == direct_result
}

/// Copy-on-store (spec 8.1): after `c.store(d)`, coercing `d` in place
/// never changes what `c` holds, scalar or composite alike.
#[quickcheck]
fn store_copies_independently_of_later_source_mutation(scalar: Scalar) -> bool {
    let mut host = NullHost;
    let mut c = Value::null();
    let mut d = scalar.into_value();

    c.store(&d, &mut host);
    let before = format!("{:?}", c.kind());

    let _ = d.to_string_value(&mut host);

    format!("{:?}", c.kind()) == before
}
