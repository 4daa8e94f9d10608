use thiserror::Error;

/// Failures a hashmap or heap operation can raise.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("out of memory")]
    Oom,
    /// A `SlabId`/`ArrayHandle` was used after its slot was released.
    #[error("stale array handle")]
    StaleHandle,
    #[error(transparent)]
    Value(#[from] glyph_value::ValueError),
}

impl From<glyph_mem::MemError> for MapError {
    fn from(_: glyph_mem::MemError) -> Self {
        MapError::Oom
    }
}

impl From<MapError> for glyph_util::ErrorKind {
    fn from(e: MapError) -> Self {
        match e {
            MapError::Oom => glyph_util::ErrorKind::Nomem,
            MapError::StaleHandle => glyph_util::ErrorKind::Corrupt,
            MapError::Value(inner) => inner.into(),
        }
    }
}
