//! Syntax-error reporting. The tree builder never panics or aborts
//! partway through a script on a malformed expression; it reports each
//! problem it finds to a host-installable sink and keeps going with the
//! next statement.

use glyph_util::Span;

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self { message: message.into(), span }
    }
}

/// Receives every syntax error the builder detects. A host embeds this
/// to surface diagnostics its own way; tests use [`CollectingSink`].
pub trait ErrorSink {
    fn report(&mut self, error: SyntaxError);
}

/// Accumulates every reported error in order, for tests and for hosts
/// that just want a batch at the end.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub errors: Vec<SyntaxError>,
}

impl ErrorSink for CollectingSink {
    fn report(&mut self, error: SyntaxError) {
        tracing::debug!(message = %error.message, "syntax error");
        self.errors.push(error);
    }
}
