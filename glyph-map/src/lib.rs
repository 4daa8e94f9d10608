//! The order-preserving associative-array engine: a power-of-two bucket
//! array for lookup, a doubly-linked insertion-order list for
//! iteration, PHP-style key normalization and auto-indexing, and the
//! composite operations (`+`, merge, replace, intersect, diff, sort)
//! built on top. [`heap::Heap`] is the concrete store that plugs into
//! `glyph_value::ArrayHost`.

pub mod cursor;
pub mod error;
pub mod globals;
pub mod hashmap;
pub mod heap;
pub mod key;
pub mod node;
pub mod ops;
pub mod sort;
pub mod walk;

pub use cursor::Cursor;
pub use error::MapError;
pub use globals::GlobalsMap;
pub use hashmap::{Hashmap, HashmapIter, Insert};
pub use heap::Heap;
pub use key::Key;
pub use node::Node;
pub use ops::MatchMode;
pub use sort::{SortEntry, SortKind};
pub use walk::WalkControl;
