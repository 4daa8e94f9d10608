//! Coercion between the value cell's primary type and any other.
//!
//! Each `to_*` method mutates the cell in place: a "replace payload"
//! coercion contract rather than a method that returns a preview. The
//! non-mutating `peek_*` helpers underneath are reused by comparison
//! and the `+` operator, which need a scalar's numeric reading without
//! collapsing its type.

use crate::host::ValueHost;
use crate::numeric::{is_fully_numeric, parse_cast_int, scan_numeric_prefix};
use crate::value::{Kind, Value};

pub(crate) fn peek_bool(v: &Value, host: &dyn ValueHost) -> bool {
    match v.kind() {
        Kind::Null => false,
        Kind::Bool(b) => *b,
        Kind::Int(i) => *i != 0,
        Kind::Real(r) => *r != 0.0,
        Kind::IntReal(i, _) => *i != 0,
        Kind::String(s) => string_to_bool(s),
        Kind::Array(h) => host.array_len(*h) != 0,
        Kind::Object(h) => host.object_to_bool(*h).unwrap_or(true),
        Kind::Resource(h) => !h.is_null(),
    }
}

/// STRING->bool: empty or an all-`'0'` run is false, a case-insensitive
/// `"false"` is false, a case-insensitive `"true"`/`"on"`/`"yes"` is
/// true, anything else non-empty is true.
fn string_to_bool(s: &[u8]) -> bool {
    if s.is_empty() || s.iter().all(|b| *b == b'0') {
        return false;
    }
    if s.eq_ignore_ascii_case(b"false") {
        return false;
    }
    if s.eq_ignore_ascii_case(b"true") || s.eq_ignore_ascii_case(b"on") || s.eq_ignore_ascii_case(b"yes") {
        return true;
    }
    true
}

pub(crate) fn peek_int(v: &Value, host: &dyn ValueHost) -> i64 {
    match v.kind() {
        Kind::Null => 0,
        Kind::Bool(b) => *b as i64,
        Kind::Int(i) => *i,
        Kind::Real(r) => *r as i64,
        Kind::IntReal(i, _) => *i,
        Kind::String(s) => parse_cast_int(s),
        Kind::Array(h) => host.array_len(*h) as i64,
        Kind::Object(h) => host.object_to_int(*h).unwrap_or(1),
        Kind::Resource(h) => h.0.map(|n| n.get() as i64).unwrap_or(0),
    }
}

pub(crate) fn peek_real(v: &Value, host: &dyn ValueHost) -> f64 {
    match v.kind() {
        Kind::Null => 0.0,
        Kind::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Kind::Int(i) => *i as f64,
        Kind::Real(r) => *r,
        Kind::IntReal(_, r) => *r,
        Kind::String(s) => scan_numeric_prefix(&String::from_utf8_lossy(s)).real_value,
        Kind::Array(h) => host.array_len(*h) as f64,
        Kind::Object(h) => host.object_to_real(*h).unwrap_or(1.0),
        Kind::Resource(h) => h.0.map(|n| n.get() as f64).unwrap_or(0.0),
    }
}

pub(crate) fn peek_string(v: &Value, host: &dyn ValueHost) -> Vec<u8> {
    match v.kind() {
        Kind::Null => Vec::new(),
        Kind::Bool(b) => if *b { b"1".to_vec() } else { Vec::new() },
        Kind::Int(i) => i.to_string().into_bytes(),
        Kind::Real(r) | Kind::IntReal(_, r) => format_real(*r).into_bytes(),
        Kind::String(s) => s.clone(),
        Kind::Array(_) => b"Array".to_vec(),
        Kind::Object(h) => host
            .object_to_string(*h)
            .unwrap_or_else(|| "Object".to_string())
            .into_bytes(),
        Kind::Resource(_) => b"Resource".to_vec(),
    }
}

/// Renders a float the way PHP's default `precision` ini setting would:
/// no trailing `.0` noise is dropped, but an integral float still shows
/// its fractional dot so `(string) 4.0 === "4"` never happens by
/// accident — PHP actually does print `"4"` for that case, so we strip
/// a trailing `.0` deliberately.
fn format_real(r: f64) -> String {
    if r.is_nan() {
        return "NAN".to_string();
    }
    if r.is_infinite() {
        return if r > 0.0 { "INF".to_string() } else { "-INF".to_string() };
    }
    let s = format!("{r}");
    if let Some(stripped) = s.strip_suffix(".0") {
        stripped.to_string()
    } else {
        s
    }
}

impl Value {
    pub fn to_bool(&mut self, host: &mut dyn ValueHost) -> bool {
        let b = peek_bool(self, host);
        self.release_composite(host);
        *self = Value::from_bool(b);
        b
    }

    pub fn to_int(&mut self, host: &mut dyn ValueHost) -> i64 {
        let i = peek_int(self, host);
        self.release_composite(host);
        *self = Value::from_int(i);
        i
    }

    /// Coerces to `REAL`, then attempts an integer cache if the
    /// conversion round-trips losslessly — the one case where `INT` and
    /// `REAL` flags coexist on the same cell.
    pub fn to_real(&mut self, host: &mut dyn ValueHost) -> f64 {
        let r = peek_real(self, host);
        self.release_composite(host);
        *self = if r.fract() == 0.0 && r.is_finite() && r >= i64::MIN as f64 && r <= i64::MAX as f64 {
            Value { kind: Kind::IntReal(r as i64, r), index: None }
        } else {
            Value::from_real(r)
        };
        r
    }

    pub fn to_string_value(&mut self, host: &mut dyn ValueHost) -> &[u8] {
        let s = peek_string(self, host);
        self.release_composite(host);
        *self = Value::from_string(s);
        match self.kind() {
            Kind::String(s) => s.as_slice(),
            _ => unreachable!(),
        }
    }

    pub fn to_null(&mut self, host: &mut dyn ValueHost) {
        self.release_composite(host);
        *self = Value::null();
    }

    /// Wraps a scalar in a new single-element array (key `0`); a value
    /// already `ARRAY` is left untouched.
    pub fn to_hashmap(&mut self, host: &mut dyn ValueHost) {
        if matches!(self.kind(), Kind::Array(_)) {
            return;
        }
        let scalar = self.load();
        self.release_composite(host);
        let handle = host.array_new_singleton(scalar);
        *self = Value::from_array(handle);
    }

    /// Wraps a scalar in a new empty object; a value already `OBJECT`
    /// is left untouched. Array-to-object conversion is intentionally
    /// not modeled here: it requires copying every array entry into an
    /// object property, which is class-system territory out of scope
    /// for this crate.
    pub fn to_object(&mut self, host: &mut dyn ValueHost) {
        if matches!(self.kind(), Kind::Object(_)) {
            return;
        }
        self.release_composite(host);
        let handle = host.object_new_empty();
        *self = Value::from_object(handle);
    }

    /// True for `INT`, `REAL`, and strings whose entire (trimmed)
    /// content is a numeric literal.
    pub fn is_numeric(&self) -> bool {
        match self.kind() {
            Kind::Int(_) | Kind::Real(_) | Kind::IntReal(_, _) => true,
            Kind::String(s) => is_fully_numeric(&String::from_utf8_lossy(s)),
            _ => false,
        }
    }

    /// A non-mutating preview of [`Value::to_real`] — same reading, but
    /// the cell's own type is left untouched. Sort comparators and other
    /// read-only callers should use this instead of coercing in place.
    pub fn preview_real(&self, host: &dyn ValueHost) -> f64 {
        peek_real(self, host)
    }

    /// A non-mutating preview of [`Value::to_string_value`].
    pub fn preview_string(&self, host: &dyn ValueHost) -> Vec<u8> {
        peek_string(self, host)
    }

    /// A non-mutating preview of [`Value::to_bool`].
    pub fn preview_bool(&self, host: &dyn ValueHost) -> bool {
        peek_bool(self, host)
    }

    /// PHP's `empty()` rule: `NULL`, `false`, `0`, `0.0`, `""`, `"0"`,
    /// and a zero-length array are all empty.
    pub fn is_empty_value(&self, host: &dyn ValueHost) -> bool {
        match self.kind() {
            Kind::Null => true,
            Kind::Bool(b) => !*b,
            Kind::Int(i) => *i == 0,
            Kind::Real(r) => *r == 0.0,
            Kind::IntReal(i, _) => *i == 0,
            Kind::String(s) => s.is_empty() || s.as_slice() == b"0",
            Kind::Array(h) => host.array_len(*h) == 0,
            Kind::Object(_) | Kind::Resource(_) => false,
        }
    }
}
