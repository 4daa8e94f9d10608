//! Extension points a host (the hashmap engine, the class/object system)
//! plugs into the value cell without this crate ever depending back on
//! either one.
//!
//! `glyph-map` builds its hashmap on top of [`crate::pool::ValuePool`]
//! and therefore depends on this crate; a value cell that holds an
//! `ARRAY` payload cannot in turn depend on `glyph-map` without a cycle.
//! Every operation that needs to inspect or construct a composite value
//! — coercion, comparison, the `+` operator, magic-method casts — takes
//! a `&dyn ValueHost` (or `&mut dyn ValueHost`) argument instead, and
//! the runtime crate wires the concrete hashmap/object-system
//! implementation in at the seam.

use std::cmp::Ordering;

use crate::value::Value;

/// Opaque handle to a hashmap instance, minted and interpreted entirely
/// by whatever implements [`ArrayHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrayHandle(pub u32);

/// Opaque handle to an object instance, minted and interpreted entirely
/// by whatever implements [`ClassCastDispatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub u32);

/// A resource handle: an opaque non-zero identifier, or null. Unlike
/// arrays and objects, resources carry no behavior the value cell needs
/// to delegate — only an identity check and a hex-ish string rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceHandle(pub Option<std::num::NonZeroU64>);

impl ResourceHandle {
    pub const NULL: ResourceHandle = ResourceHandle(None);

    pub fn is_null(self) -> bool {
        self.0.is_none()
    }
}

/// Everything a value cell needs from the array/hashmap engine to
/// implement coercion, comparison, and the `+` union operator over
/// `ARRAY` payloads.
pub trait ArrayHost {
    fn array_new_empty(&mut self) -> ArrayHandle;

    /// A single-element array with key `0`, used by `to_hashmap`'s
    /// scalar-wrapping coercion.
    fn array_new_singleton(&mut self, value: Value) -> ArrayHandle;

    fn array_len(&self, h: ArrayHandle) -> usize;

    fn array_retain(&mut self, h: ArrayHandle);
    fn array_release(&mut self, h: ArrayHandle);

    /// Deep copy, used when `+` or assignment needs an independent array
    /// rather than a second reference to the same one.
    fn array_clone(&mut self, h: ArrayHandle) -> ArrayHandle;

    /// Copies every key from `src` missing in `dst` into `dst` (PHP's
    /// `$a + $b` union semantics: left-hand keys win).
    fn array_union_into(&mut self, dst: ArrayHandle, src: ArrayHandle);

    fn array_compare(&self, a: ArrayHandle, b: ArrayHandle, strict: bool, depth: u32) -> Ordering;
}

/// Magic-method dispatch for casting an object to a scalar, and object
/// comparison. The value module never sees a class definition; it only
/// ever asks "what does this object coerce to" through five cast
/// methods and nothing more.
pub trait ClassCastDispatcher {
    fn object_new_empty(&mut self) -> ObjectHandle;

    fn object_retain(&mut self, h: ObjectHandle);
    fn object_release(&mut self, h: ObjectHandle);

    /// `__toInt`, if the class defines it.
    fn object_to_int(&self, h: ObjectHandle) -> Option<i64>;
    /// `__toBool`, if the class defines it.
    fn object_to_bool(&self, h: ObjectHandle) -> Option<bool>;
    /// `__toFloat`, if the class defines it.
    fn object_to_real(&self, h: ObjectHandle) -> Option<f64>;
    /// `__toString`, if the class defines it.
    fn object_to_string(&self, h: ObjectHandle) -> Option<String>;

    fn object_compare(&self, a: ObjectHandle, b: ObjectHandle, strict: bool, depth: u32) -> Ordering;
}

/// The union of everything a value cell may need from its host. Blanket
/// implementation lets any type implementing both halves stand in for
/// the whole without extra boilerplate at the runtime seam.
pub trait ValueHost: ArrayHost + ClassCastDispatcher {}

impl<T: ArrayHost + ClassCastDispatcher> ValueHost for T {}
