use thiserror::Error;

/// Failures a memory-backed operation in this crate can raise.
///
/// Each variant maps to a distinct [`glyph_util::ErrorKind`] at the engine
/// boundary (see the `From` impl below); the richer local type exists so
/// the allocator and byte buffer can describe *which* failure occurred
/// while still testing clean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemError {
    #[error("out of memory")]
    Oom,
    /// A mutating operation was attempted on a buffer currently in
    /// read-only (borrowed) mode.
    #[error("buffer is borrowed read-only")]
    ReadOnly,
}

impl From<MemError> for glyph_util::ErrorKind {
    fn from(e: MemError) -> Self {
        match e {
            MemError::Oom => glyph_util::ErrorKind::Nomem,
            MemError::ReadOnly => glyph_util::ErrorKind::Corrupt,
        }
    }
}
