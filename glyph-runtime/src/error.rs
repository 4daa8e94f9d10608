//! Every public operation in this crate resolves to the closed
//! [`glyph_util::ErrorKind`] set directly — there is no richer
//! engine-local error to wrap, since nothing here calls a
//! `glyph-map`/`glyph-value` operation that itself returns a `Result`;
//! those crates surface failure as `Option` at the seams this crate
//! uses, and each missing-value/bad-handle case already has an obvious
//! single `ErrorKind` to report.

pub type EngineResult<T> = Result<T, glyph_util::ErrorKind>;
