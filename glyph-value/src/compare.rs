//! Three-way value comparison.
//!
//! Scalars compare by PHP's familiar loose rules; composites (arrays,
//! objects) always rank above scalars regardless of operand order — the
//! relation only ever needs to be total and order-independent, and
//! "greater" was picked arbitrarily since it is never observable except
//! as "not equal". Strict (`===`) comparison treats any type mismatch
//! as immediately unequal before the scalar rules run at all.

use std::cmp::Ordering;

use crate::host::ValueHost;
use crate::numeric::is_fully_numeric;
use crate::value::{Kind, Value};
use crate::ValueError;

/// Recursion budget for nested array/object comparison. Threaded as an
/// explicit parameter rather than tracked in shared mutable state, so
/// comparison stays reentrant and the limit is whatever the caller
/// chooses to enforce.
pub const DEFAULT_COMPARE_DEPTH_LIMIT: u32 = 32;

impl Value {
    pub fn cmp(
        &self,
        other: &Value,
        host: &dyn ValueHost,
        strict: bool,
    ) -> Result<Ordering, ValueError> {
        cmp_depth(self, other, host, strict, 0, DEFAULT_COMPARE_DEPTH_LIMIT)
    }
}

fn cmp_depth(
    a: &Value,
    b: &Value,
    host: &dyn ValueHost,
    strict: bool,
    depth: u32,
    limit: u32,
) -> Result<Ordering, ValueError> {
    if depth > limit {
        return Err(ValueError::CompareDepthExceeded);
    }

    if strict && std::mem::discriminant(a.kind()) != std::mem::discriminant(b.kind()) {
        // Treat a strict-compare type mismatch as an arbitrary but
        // stable inequality; callers only ever ask "is this Equal".
        return Ok(Ordering::Less);
    }

    // NULL/BOOL/RESOURCE on either side coerces both operands to bool
    // ahead of the composite-vs-scalar rule below, so e.g. `null` and
    // `array()` compare equal rather than composite always winning.
    if is_null_bool_or_resource(a) || is_null_bool_or_resource(b) {
        return Ok(cmp_scalars(a, b, host));
    }

    let a_composite = a.flags().is_composite();
    let b_composite = b.flags().is_composite();
    if a_composite != b_composite {
        return Ok(if a_composite { Ordering::Greater } else { Ordering::Less });
    }

    match (a.kind(), b.kind()) {
        (Kind::Array(ha), Kind::Array(hb)) => Ok(host.array_compare(*ha, *hb, strict, depth + 1)),
        (Kind::Object(ha), Kind::Object(hb)) => Ok(host.object_compare(*ha, *hb, strict, depth + 1)),
        _ => Ok(cmp_scalars(a, b, host)),
    }
}

fn is_null_bool_or_resource(v: &Value) -> bool {
    matches!(v.kind(), Kind::Null | Kind::Bool(_) | Kind::Resource(_))
}

fn cmp_scalars(a: &Value, b: &Value, host: &dyn ValueHost) -> Ordering {
    use crate::coerce::{peek_bool, peek_real, peek_string};

    // NULL only ever equals another falsy value; otherwise it sorts
    // before everything (PHP's `null < anything` loose-comparison rule).
    if a.is_null() && b.is_null() {
        return Ordering::Equal;
    }
    if a.is_null() {
        return if !peek_bool(b, host) { Ordering::Equal } else { Ordering::Less };
    }
    if b.is_null() {
        return if !peek_bool(a, host) { Ordering::Equal } else { Ordering::Greater };
    }

    if matches!(a.kind(), Kind::Bool(_) | Kind::Resource(_)) || matches!(b.kind(), Kind::Bool(_) | Kind::Resource(_)) {
        return peek_bool(a, host).cmp(&peek_bool(b, host));
    }

    if let (Kind::String(sa), Kind::String(sb)) = (a.kind(), b.kind()) {
        let (ta, tb) = (String::from_utf8_lossy(sa), String::from_utf8_lossy(sb));
        if is_fully_numeric(&ta) && is_fully_numeric(&tb) {
            return peek_real(a, host).partial_cmp(&peek_real(b, host)).unwrap_or(Ordering::Equal);
        }
        return sa.cmp(sb);
    }

    if matches!(a.kind(), Kind::String(_)) || matches!(b.kind(), Kind::String(_)) {
        // One numeric operand: coerce the string side and compare
        // numerically (PHP's pre-8 loose comparison rule).
        return peek_real(a, host).partial_cmp(&peek_real(b, host)).unwrap_or_else(|| {
            peek_string(a, host).cmp(&peek_string(b, host))
        });
    }

    peek_real(a, host).partial_cmp(&peek_real(b, host)).unwrap_or(Ordering::Equal)
}
