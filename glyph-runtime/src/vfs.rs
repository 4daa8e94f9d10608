//! The replaceable source-loading hook behind the `VFS` library verb.
//!
//! Reading real files is outside this crate's scope; the default `Vfs`
//! here exists only so a host that never replaces it gets a sensible
//! "not found" rather than a missing implementation, and so the library
//! verb has something concrete to swap out.

use glyph_util::ErrorKind;

pub trait Vfs: Send + Sync {
    fn read(&self, path: &str) -> Result<Vec<u8>, ErrorKind>;
}

/// Installed until a host calls the `VFS` library verb; every read
/// fails, since this crate has no filesystem access of its own.
pub struct NullVfs;

impl Vfs for NullVfs {
    fn read(&self, _path: &str) -> Result<Vec<u8>, ErrorKind> {
        Err(ErrorKind::Io)
    }
}
