//! The type-flag bitmask used for introspection and host-facing type
//! queries. [`crate::value::Kind`] is the value cell's actual identity;
//! `TypeFlags` is the derived, queryable view of it (`kind.flags()`),
//! matching the bitmask the host API exposes for `is_*` checks and the
//! array/scalar comparison rule (composite vs. scalar).

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u16 {
        const NULL     = 1 << 0;
        const BOOL     = 1 << 1;
        const INT      = 1 << 2;
        const REAL     = 1 << 3;
        const STRING   = 1 << 4;
        const ARRAY    = 1 << 5;
        const OBJECT   = 1 << 6;
        const RESOURCE = 1 << 7;
    }
}

impl TypeFlags {
    /// The only flag combinations that ever coexist on one cell are the
    /// primary type and, for `REAL`, a lossless cached `INT` (the
    /// integer/real coexistence invariant). Everything else is scalar
    /// vs. composite.
    pub const SCALAR: TypeFlags =
        Self::BOOL.union(Self::INT).union(Self::REAL).union(Self::STRING);

    pub const COMPOSITE: TypeFlags = Self::ARRAY.union(Self::OBJECT);

    pub fn is_scalar(self) -> bool {
        self.intersects(Self::SCALAR) || self.contains(Self::NULL)
    }

    pub fn is_composite(self) -> bool {
        self.intersects(Self::COMPOSITE)
    }
}
