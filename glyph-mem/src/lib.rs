//! Arena allocation and the growable byte buffer that every string-bearing
//! value and diagnostic message in the engine is built on top of.
//!
//! This crate is deliberately value-agnostic: it knows about bytes and
//! fixed-size slots, never about the tagged value cell those slots end up
//! holding. `glyph-value` builds the value pool and reference table on
//! top of [`SlabPool`]; `glyph-map` builds hashmap node storage the same
//! way.

pub mod arena;
pub mod buffer;
pub mod error;
pub mod slab;

pub use arena::{Arena, SystemAllocator};
pub use buffer::ByteBuffer;
pub use error::MemError;
pub use slab::{SlabId, SlabPool};
