//! The closed error-kind taxonomy every public operation in the engine
//! eventually collapses into. Individual crates define their own
//! narrower `thiserror::Error` enums for internal use and convert them to
//! `ErrorKind` only at the boundary a host actually observes.

use thiserror::Error;

/// Outcome of a public engine operation.
///
/// Internal crates are free to carry richer error types; `ErrorKind` is
/// the lossy-but-stable projection a host binding is allowed to match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Success. Not actually constructed as an error, but kept here so
    /// `ErrorKind` can round-trip through a plain `Result<(), ErrorKind>`
    /// boundary the same way the C ABI's integer status codes do.
    #[error("ok")]
    Ok,
    /// Misuse: null handle, unknown configuration verb, re-configuring an
    /// already-initialized library, and similar host-side programming
    /// errors.
    #[error("corrupt: invalid use of the API")]
    Corrupt,
    /// Allocator failure.
    #[error("out of memory")]
    Nomem,
    /// Virtual filesystem failure or unreadable source file.
    #[error("I/O failure")]
    Io,
    /// Syntactic or semantic error during compilation.
    #[error("compile error")]
    Compile,
    /// The VM could not be prepared for execution.
    #[error("VM preparation failed")]
    Vm,
    /// A host callback requested termination, or (multi-thread mode) the
    /// target engine/VM was released by another thread.
    #[error("aborted")]
    Abort,
    /// Attempt to reconfigure an already-initialized library.
    #[error("library already initialized")]
    Locked,
    /// Internal conditions surfaced only to the code generator.
    #[error("unexpected end of input")]
    Eof,
    #[error("not found")]
    NotFound,
    #[error("syntax error")]
    Syntax,
    #[error("limit exceeded")]
    Limit,
}

impl ErrorKind {
    /// True for every variant other than `Ok`.
    pub fn is_error(self) -> bool {
        !matches!(self, ErrorKind::Ok)
    }
}
