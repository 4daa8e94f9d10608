//! Hand-coded lexer: turns a byte slice into a token stream, carrying a
//! kind bitmask, source span, and (for OP/KEYWORD tokens) an attached
//! descriptor. Never fails — malformed input always yields a token, and
//! the handful of genuinely recoverable situations (unterminated
//! heredoc, a comment run off the end of the source) are reported
//! through [`error::LexError`] rather than aborting tokenization.

pub mod cursor;
pub mod error;
pub mod keyword;
mod lexer;
pub mod optable;
pub mod token;

pub use error::LexError;
pub use keyword::KeywordId;
pub use lexer::Lexer;
pub use optable::{Associativity, OperatorDescriptor, OperatorId, OPERATORS};
pub use token::{Token, TokenData, TokenKind};
