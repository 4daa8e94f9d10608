//! The verification pass: runs once over a freshly extracted node
//! sequence before any precedence reduction, checking bracket balance
//! and rewriting the legacy `$a{'k'}` subscript form to the ordinary
//! `$a['k']` shape the tree builder already knows how to reduce.
//!
//! Two rewrites the reference engine performs at this stage are folded
//! elsewhere instead of duplicated here — see the `glyph-par` entry in
//! `DESIGN.md`: the lone-leading and re-resolved `+`/`-` unary/binary
//! fixups are already handled by `glyph-lex`'s own token-level ambiguity
//! rule, and the function-call-paren determination is made on demand by
//! the postfix pass in `builder`, which needs the same "is the previous
//! node already a terminal" check anyway.

use glyph_lex::{Token, TokenData, TokenKind};
use glyph_util::{ErrorKind, Span};

use crate::error::{ErrorSink, SyntaxError};
use crate::node::Node;

pub(crate) fn verify(nodes: &mut [Node], sink: &mut dyn ErrorSink) -> Result<(), ErrorKind> {
    rewrite_legacy_subscripts(nodes);
    check_balance(nodes, sink)
}

/// `{` immediately following a variable, or a raw `]`, is the legacy
/// string/array-offset form `$a{'k'}`; flip it (and its matching `}`)
/// to look like an ordinary `[`/`]` pair so the postfix pass handles it
/// without needing a second code path.
fn rewrite_legacy_subscripts(nodes: &mut [Node]) {
    let mut i = 0;
    while i < nodes.len() {
        if nodes[i].is_kind(TokenKind::LBRACE) && i > 0 && precedes_legacy_subscript(&nodes[i - 1]) {
            if let Some(close) = find_matching(nodes, i, TokenKind::LBRACE, TokenKind::RBRACE) {
                nodes[i] = Node::Raw(retag(nodes[i].raw_token().unwrap(), TokenKind::LBRACKET));
                nodes[close] = Node::Raw(retag(nodes[close].raw_token().unwrap(), TokenKind::RBRACKET));
            }
        }
        i += 1;
    }
}

fn precedes_legacy_subscript(prev: &Node) -> bool {
    match prev.expr() {
        Some(e) => matches!(e.kind, crate::ast::ExprKind::Variable(_)),
        None => prev.is_kind(TokenKind::RBRACKET),
    }
}

fn retag(token: &Token, kind: TokenKind) -> Token {
    Token::new(kind, token.span, TokenData::None)
}

/// Finds the index of the bracket matching `open_idx`, tracking nesting
/// depth of that same bracket kind only.
pub(crate) fn find_matching(nodes: &[Node], open_idx: usize, open_kind: TokenKind, close_kind: TokenKind) -> Option<usize> {
    let mut depth = 1i32;
    for (offset, node) in nodes.iter().enumerate().skip(open_idx + 1) {
        if node.is_kind(open_kind) {
            depth += 1;
        } else if node.is_kind(close_kind) {
            depth -= 1;
            if depth == 0 {
                return Some(offset);
            }
        }
    }
    None
}

/// A single forward scan counting parens/brackets/braces/`?`; reports a
/// specific "unexpected token" error the moment a closing counter goes
/// negative, and a final "mismatched" error if anything is left open.
fn check_balance(nodes: &[Node], sink: &mut dyn ErrorSink) -> Result<(), ErrorKind> {
    let mut paren = 0i32;
    let mut square = 0i32;
    let mut brace = 0i32;
    let mut questy = 0i32;
    let mut ok = true;

    for node in nodes {
        if node.is_kind(TokenKind::LPAREN) {
            paren += 1;
        } else if node.is_kind(TokenKind::RPAREN) {
            paren -= 1;
            if paren < 0 {
                report_unexpected(sink, "')'", node.span());
                ok = false;
                paren = 0;
            }
        } else if node.is_kind(TokenKind::LBRACKET) {
            square += 1;
        } else if node.is_kind(TokenKind::RBRACKET) {
            square -= 1;
            if square < 0 {
                report_unexpected(sink, "']'", node.span());
                ok = false;
                square = 0;
            }
        } else if node.is_kind(TokenKind::LBRACE) {
            brace += 1;
        } else if node.is_kind(TokenKind::RBRACE) {
            brace -= 1;
            if brace < 0 {
                report_unexpected(sink, "'}'", node.span());
                ok = false;
                brace = 0;
            }
        } else if let Some(d) = node.as_operator() {
            if d.id == glyph_lex::OperatorId::Ternary {
                questy += 1;
            }
        } else if node.is_kind(TokenKind::COLON) && questy > 0 {
            questy -= 1;
        }
    }

    if paren != 0 || square != 0 || brace != 0 || questy != 0 {
        let span = nodes.last().map(Node::span).unwrap_or(Span::DUMMY);
        sink.report(SyntaxError::new("mismatched '(', '[', '{' or '?'", span));
        ok = false;
    }

    if ok {
        Ok(())
    } else {
        Err(ErrorKind::Syntax)
    }
}

fn report_unexpected(sink: &mut dyn ErrorSink, what: &str, span: Span) {
    sink.report(SyntaxError::new(format!("unexpected token {what}"), span));
}
