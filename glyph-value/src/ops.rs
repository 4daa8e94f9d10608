//! The `+` operator: numeric addition for scalars, union for two
//! arrays. Anything else is a type error left to the caller (this crate
//! only has an `ArithError` for the cases that make no sense to recover
//! from silently).

use thiserror::Error;

use crate::coerce::{peek_int, peek_real};
use crate::host::ValueHost;
use crate::value::{Kind, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithError {
    #[error("unsupported operand types for +")]
    TypeMismatch,
}

/// `a + b`. Two arrays union (left-hand keys win, matching PHP); any
/// other array/object combination with a non-array/object operand is a
/// type error. Everything else coerces to a number: if either operand
/// carries a `REAL` component the result is `f64`, otherwise it's an
/// `i64` that overflows into `f64` rather than wrapping.
pub fn add(a: &Value, b: &Value, host: &mut dyn ValueHost) -> Result<Value, ArithError> {
    match (a.kind(), b.kind()) {
        (Kind::Array(ha), Kind::Array(hb)) => {
            let dst = host.array_clone(*ha);
            host.array_union_into(dst, *hb);
            Ok(Value::from_array(dst))
        }
        (Kind::Array(_), _) | (_, Kind::Array(_)) => Err(ArithError::TypeMismatch),
        (Kind::Object(_), _) | (_, Kind::Object(_)) => Err(ArithError::TypeMismatch),
        _ => {
            let wants_real = matches!(a.kind(), Kind::Real(_) | Kind::IntReal(_, _))
                || matches!(b.kind(), Kind::Real(_) | Kind::IntReal(_, _));
            if wants_real {
                Ok(Value::from_real(peek_real(a, host) + peek_real(b, host)))
            } else {
                let (ia, ib) = (peek_int(a, host), peek_int(b, host));
                match ia.checked_add(ib) {
                    Some(sum) => Ok(Value::from_int(sum)),
                    None => Ok(Value::from_real(ia as f64 + ib as f64)),
                }
            }
        }
    }
}
