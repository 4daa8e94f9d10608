use thiserror::Error;

/// Failures a value cell or value-pool operation can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("out of memory")]
    Oom,
    /// A pool index was used after its slot was released.
    #[error("stale value handle")]
    StaleHandle,
    /// An attempt to mutate the immutable `$GLOBALS` map.
    #[error("$GLOBALS is immutable")]
    GlobalsImmutable,
    /// The recursion budget for nested array/object comparison was
    /// exhausted.
    #[error("comparison recursion limit exceeded")]
    CompareDepthExceeded,
}

impl From<glyph_mem::MemError> for ValueError {
    fn from(_: glyph_mem::MemError) -> Self {
        ValueError::Oom
    }
}

impl From<ValueError> for glyph_util::ErrorKind {
    fn from(e: ValueError) -> Self {
        match e {
            ValueError::Oom => glyph_util::ErrorKind::Nomem,
            ValueError::StaleHandle => glyph_util::ErrorKind::Corrupt,
            ValueError::GlobalsImmutable => glyph_util::ErrorKind::Corrupt,
            ValueError::CompareDepthExceeded => glyph_util::ErrorKind::Limit,
        }
    }
}
