//! Token kinds and the token type the lexer produces.

use glyph_util::{Span, Symbol};

use crate::keyword::KeywordId;
use crate::optable::OperatorDescriptor;

bitflags::bitflags! {
    /// Each bit stands on its own so a code generator can query
    /// `token.kind & MASK`; this is a superset of what the lexer itself
    /// produces so downstream layers can define their own combinations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TokenKind: u32 {
        const ID            = 1 << 0;
        const KEYWORD       = 1 << 1;
        const OP            = 1 << 2;
        const INT           = 1 << 3;
        const REAL          = 1 << 4;
        const VARIABLE      = 1 << 5;
        const SINGLE_STR    = 1 << 6;
        const DOUBLE_STR    = 1 << 7;
        const BACKTICK_STR  = 1 << 8;
        const HEREDOC       = 1 << 9;
        const NOWDOC        = 1 << 10;
        const LBRACE        = 1 << 11;
        const RBRACE        = 1 << 12;
        const LPAREN        = 1 << 13;
        const RPAREN        = 1 << 14;
        const LBRACKET      = 1 << 15;
        const RBRACKET      = 1 << 16;
        const NS_SEPARATOR  = 1 << 17;
        const COLON         = 1 << 18;
        const COMMA         = 1 << 19;
        const SEMICOLON     = 1 << 20;
        const ARROW_KV      = 1 << 21;
        const AMPERSAND     = 1 << 22;
        const RAW_TEXT      = 1 << 23;
        const EOF           = 1 << 24;
        const INVALID       = 1 << 25;
    }
}

/// The payload attached to a token, beyond its kind/span/line.
#[derive(Debug, Clone)]
pub enum TokenData {
    None,
    Ident(Symbol),
    Keyword(KeywordId),
    Operator(&'static OperatorDescriptor),
    Int(i64),
    Real(f64),
    /// Raw, unescaped bytes: string-literal bodies, heredoc/nowdoc
    /// payloads, and raw (non-PHP) text segments all carry their bytes
    /// verbatim here — escape decoding and interpolation are a parser
    /// or later concern, not the lexer's.
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub data: TokenData,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, data: TokenData) -> Self {
        Self { kind, span, data }
    }

    pub fn punct(kind: TokenKind, span: Span) -> Self {
        Self { kind, span, data: TokenData::None }
    }

    pub fn is_eof(&self) -> bool {
        self.kind.contains(TokenKind::EOF)
    }

    pub fn as_operator(&self) -> Option<&'static OperatorDescriptor> {
        match self.data {
            TokenData::Operator(descriptor) => Some(descriptor),
            _ => None,
        }
    }

    pub fn as_keyword(&self) -> Option<KeywordId> {
        match self.data {
            TokenData::Keyword(id) => Some(id),
            _ => None,
        }
    }
}
