//! Lexer-side diagnostics.
//!
//! The lexer itself never fails — malformed input always yields a token,
//! falling back to `TokenKind::INVALID` where nothing else applies — so
//! this enum only covers the handful of recoverable situations worth a
//! diagnostic of their own: an unterminated heredoc/nowdoc body and an
//! unterminated block comment.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated heredoc/nowdoc: no line begins with the closing identifier")]
    UnterminatedHeredoc,
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
}

impl From<LexError> for glyph_util::ErrorKind {
    fn from(_: LexError) -> Self {
        glyph_util::ErrorKind::Syntax
    }
}
