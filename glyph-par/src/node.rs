//! The builder's working representation: a flat sequence where every
//! literal, variable, identifier or keyword token has already collapsed
//! into a terminal `Expr`, and every operator or structural punctuation
//! token (`(`, `)`, `[`, `]`, `{`, `}`, `,`, `:`, `?`, and the rest of
//! the operator table) still sits as a raw, unconsumed token. Each pass
//! in `builder` merges adjacent nodes into new terminals until one node
//! remains.

use glyph_lex::optable::OperatorDescriptor;
use glyph_lex::{Token, TokenKind};
use glyph_util::Span;

use crate::ast::Expr;

#[derive(Debug, Clone)]
pub(crate) enum Node {
    Terminal(Expr),
    Raw(Token),
}

impl Node {
    pub(crate) fn span(&self) -> Span {
        match self {
            Node::Terminal(e) => e.span,
            Node::Raw(t) => t.span,
        }
    }

    pub(crate) fn is_terminal(&self) -> bool {
        matches!(self, Node::Terminal(_))
    }

    /// Converts to an `Expr`, producing `ExprKind::Invalid` for a node
    /// that was never reduced (a stray, unconsumed operator or bracket
    /// left over after the precedence passes ran).
    pub(crate) fn into_expr(self) -> Expr {
        match self {
            Node::Terminal(e) => e,
            Node::Raw(t) => Expr::new(crate::ast::ExprKind::Invalid, t.span),
        }
    }

    pub(crate) fn expr(&self) -> Option<&Expr> {
        match self {
            Node::Terminal(e) => Some(e),
            Node::Raw(_) => None,
        }
    }

    pub(crate) fn raw_kind(&self) -> Option<TokenKind> {
        match self {
            Node::Raw(t) => Some(t.kind),
            Node::Terminal(_) => None,
        }
    }

    pub(crate) fn raw_token(&self) -> Option<&Token> {
        match self {
            Node::Raw(t) => Some(t),
            Node::Terminal(_) => None,
        }
    }

    pub(crate) fn as_operator(&self) -> Option<&'static OperatorDescriptor> {
        match self {
            Node::Raw(t) => t.as_operator(),
            Node::Terminal(_) => None,
        }
    }

    pub(crate) fn is_kind(&self, kind: TokenKind) -> bool {
        matches!(self, Node::Raw(t) if t.kind.contains(kind))
    }
}
