//! The tagged value cell.
//!
//! [`Kind`] is the cell's actual identity — a sum type with one variant
//! per primary type, plus a dedicated `IntReal` variant for the single
//! documented case where two primary types coexist (a float that also
//! carries a lossless cached integer rendering). Derived state like the
//! string rendering of a non-string value is recomputed on demand
//! instead of shadow-stored, since [`Kind`] already makes coercion a
//! cheap in-place replace.

use crate::flags::TypeFlags;
use crate::host::{ArrayHandle, ObjectHandle, ResourceHandle, ValueHost};
use crate::pool::ValueId;

/// The value cell's primary identity.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    /// `REAL` with a lossless cached `INT` rendering, the only
    /// coexisting flag pair. `.1` is always `.0 as f64` exactly.
    IntReal(i64, f64),
    String(Vec<u8>),
    Array(ArrayHandle),
    Object(ObjectHandle),
    Resource(ResourceHandle),
}

impl Kind {
    pub fn flags(&self) -> TypeFlags {
        match self {
            Kind::Null => TypeFlags::NULL,
            Kind::Bool(_) => TypeFlags::BOOL,
            Kind::Int(_) => TypeFlags::INT,
            Kind::Real(_) => TypeFlags::REAL,
            Kind::IntReal(_, _) => TypeFlags::INT | TypeFlags::REAL,
            Kind::String(_) => TypeFlags::STRING,
            Kind::Array(_) => TypeFlags::ARRAY,
            Kind::Object(_) => TypeFlags::OBJECT,
            Kind::Resource(_) => TypeFlags::RESOURCE,
        }
    }
}

/// A PHP-style dynamic value.
///
/// Carries the pool index it was allocated at (`None` for a value that
/// lives outside the pool, e.g. a compile-time constant folded directly
/// into bytecode — the classic `u32::MAX`-sentinel approach collapses to
/// `Option::None` here).
#[derive(Debug, Clone)]
pub struct Value {
    pub(crate) kind: Kind,
    pub(crate) index: Option<ValueId>,
}

impl Value {
    pub fn null() -> Self {
        Self { kind: Kind::Null, index: None }
    }

    pub fn from_bool(b: bool) -> Self {
        Self { kind: Kind::Bool(b), index: None }
    }

    pub fn from_int(i: i64) -> Self {
        Self { kind: Kind::Int(i), index: None }
    }

    pub fn from_real(r: f64) -> Self {
        Self { kind: Kind::Real(r), index: None }
    }

    pub fn from_string(s: impl Into<Vec<u8>>) -> Self {
        Self { kind: Kind::String(s.into()), index: None }
    }

    pub fn from_array(h: ArrayHandle) -> Self {
        Self { kind: Kind::Array(h), index: None }
    }

    pub fn from_object(h: ObjectHandle) -> Self {
        Self { kind: Kind::Object(h), index: None }
    }

    pub fn from_resource(h: ResourceHandle) -> Self {
        Self { kind: Kind::Resource(h), index: None }
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn flags(&self) -> TypeFlags {
        self.kind.flags()
    }

    pub fn index(&self) -> Option<ValueId> {
        self.index
    }

    pub fn set_index(&mut self, id: ValueId) {
        self.index = Some(id);
    }

    pub fn is_null(&self) -> bool {
        matches!(self.kind, Kind::Null)
    }

    pub fn array_handle(&self) -> Option<ArrayHandle> {
        match self.kind {
            Kind::Array(h) => Some(h),
            _ => None,
        }
    }

    pub fn object_handle(&self) -> Option<ObjectHandle> {
        match self.kind {
            Kind::Object(h) => Some(h),
            _ => None,
        }
    }

    /// Replaces this cell's payload in place, releasing whatever
    /// composite handle it previously held: scalars are copied by
    /// value, composites are retained by handle.
    pub fn store(&mut self, other: &Value, host: &mut dyn ValueHost) {
        self.release_composite(host);
        self.kind = other.kind.clone();
        if let Some(h) = self.array_handle() {
            host.array_retain(h);
        }
        if let Some(h) = self.object_handle() {
            host.object_retain(h);
        }
    }

    /// A structural copy that does not retain composite handles —
    /// scalar copy-on-store semantics for contexts that only ever see
    /// scalars.
    pub fn load(&self) -> Value {
        Value { kind: self.kind.clone(), index: None }
    }

    /// Drops the composite handle this cell holds, if any, returning it
    /// to `Kind::Null`-equivalent bookkeeping at the host. Called before
    /// a cell is overwritten or the cell itself is released from the
    /// pool.
    pub fn release_composite(&mut self, host: &mut dyn ValueHost) {
        match self.kind {
            Kind::Array(h) => host.array_release(h),
            Kind::Object(h) => host.object_release(h),
            _ => {}
        }
    }
}
