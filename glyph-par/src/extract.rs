//! Node extraction: the token stream for one expression, turned
//! left-to-right into a flat `Node` sequence. Every token that is
//! already a complete value on its own — a literal, a variable, a bare
//! identifier, or a keyword — collapses into a terminal immediately;
//! everything else (operators and structural punctuation) is carried
//! forward unconsumed for the later passes to attach.

use glyph_lex::{KeywordId, Token, TokenData, TokenKind};

use crate::ast::{Expr, ExprKind};
use crate::node::Node;

pub(crate) fn extract(tokens: &[Token]) -> Vec<Node> {
    tokens.iter().map(extract_one).collect()
}

fn extract_one(token: &Token) -> Node {
    let kind = token.kind;

    // Alphabetic operators (`and`, `new`, `instanceof`, ...) carry both
    // OP and ID bits; checking OP first keeps them Raw like every other
    // operator instead of mistaking them for plain identifiers.
    if kind.contains(TokenKind::OP) {
        return Node::Raw(token.clone());
    }
    if kind.intersects(
        TokenKind::LPAREN
            | TokenKind::RPAREN
            | TokenKind::LBRACKET
            | TokenKind::RBRACKET
            | TokenKind::LBRACE
            | TokenKind::RBRACE
            | TokenKind::COMMA
            | TokenKind::COLON
            | TokenKind::SEMICOLON
            | TokenKind::NS_SEPARATOR,
    ) {
        return Node::Raw(token.clone());
    }

    let expr_kind = if kind.contains(TokenKind::INT) {
        match token.data {
            TokenData::Int(v) => ExprKind::Int(v),
            _ => ExprKind::Invalid,
        }
    } else if kind.contains(TokenKind::REAL) {
        match token.data {
            TokenData::Real(v) => ExprKind::Real(v),
            _ => ExprKind::Invalid,
        }
    } else if kind.contains(TokenKind::VARIABLE) {
        match &token.data {
            TokenData::Ident(sym) => ExprKind::Variable(Some(*sym)),
            _ => ExprKind::Variable(None),
        }
    } else if kind.contains(TokenKind::SINGLE_STR) || kind.contains(TokenKind::NOWDOC) {
        match &token.data {
            TokenData::Bytes(b) => ExprKind::Str(b.clone()),
            _ => ExprKind::Invalid,
        }
    } else if kind.contains(TokenKind::DOUBLE_STR) || kind.contains(TokenKind::BACKTICK_STR) || kind.contains(TokenKind::HEREDOC) {
        match &token.data {
            TokenData::Bytes(b) => ExprKind::InterpolatedStr(b.clone()),
            _ => ExprKind::Invalid,
        }
    } else if kind.contains(TokenKind::KEYWORD) {
        match token.data {
            TokenData::Keyword(id) => ExprKind::Keyword(id),
            _ => ExprKind::Invalid,
        }
    } else if kind.contains(TokenKind::ID) {
        match &token.data {
            TokenData::Ident(sym) => ExprKind::Ident(*sym),
            _ => ExprKind::Invalid,
        }
    } else {
        // Raw text, EOF, invalid-byte tokens: shouldn't reach the parser
        // in a well-formed expression slice, but fall back to an inert
        // terminal rather than panicking on unexpected input.
        ExprKind::Invalid
    };

    Node::Terminal(Expr::new(expr_kind, token.span))
}

/// `list`/`array`-type keywords whose call-paren content is an l-value
/// target list rather than an ordinary call-argument list.
pub(crate) fn is_list_keyword(id: KeywordId) -> bool {
    matches!(id, KeywordId::ListType)
}
