//! Expression tree builder: turns one expression's token slice into an
//! `Expr`, and splits a whole script's token stream into per-statement
//! expressions at top-level `;` boundaries.
//!
//! A malformed expression reports its errors to the installed
//! [`ErrorSink`] and returns `Err`; the statement splitter does not stop
//! there, it moves on to the next `;`-delimited statement.

mod ast;
mod builder;
mod error;
mod extract;
mod lvalue;
mod node;
mod verify;

pub use ast::{Expr, ExprKind};
pub use error::{CollectingSink, ErrorSink, SyntaxError};

use glyph_lex::{Lexer, Token, TokenKind};
use glyph_util::ErrorKind;

/// Builds one `Expr` from a token slice that has already had its opening
/// `<?php` tag consumed and does not include a trailing `;`.
pub fn parse_expr(tokens: &[Token], sink: &mut dyn ErrorSink) -> Result<Expr, ErrorKind> {
    let mut nodes = extract::extract(tokens);
    verify::verify(&mut nodes, sink)?;
    let expr = builder::build(nodes, sink)?;
    if builder::validate_lvalues(&expr, sink) {
        return Err(ErrorKind::Syntax);
    }
    Ok(expr)
}

/// Splits `tokens` into statements at top-level `;` (bracket nesting is
/// tracked so a `;` inside `(...)`/`[...]`/`{...}` does not split), and
/// parses each one independently. A failing statement does not prevent
/// later ones from being parsed.
pub fn parse_statements(tokens: &[Token], sink: &mut dyn ErrorSink) -> Vec<Result<Expr, ErrorKind>> {
    let mut results = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, tok) in tokens.iter().enumerate() {
        if tok.kind.intersects(TokenKind::LPAREN | TokenKind::LBRACKET | TokenKind::LBRACE) {
            depth += 1;
        } else if tok.kind.intersects(TokenKind::RPAREN | TokenKind::RBRACKET | TokenKind::RBRACE) {
            depth -= 1;
        } else if depth <= 0 && tok.kind.contains(TokenKind::SEMICOLON) {
            if i > start {
                results.push(parse_expr(&tokens[start..i], sink));
            }
            start = i + 1;
        }
    }
    if start < tokens.len() {
        results.push(parse_expr(&tokens[start..], sink));
    }
    results
}

/// Lexes `src` (a full `<?php ... ?>` source buffer) and parses every
/// top-level statement it contains. Convenience wrapper for callers that
/// have raw source rather than an already-lexed token slice.
pub fn parse_source(src: &[u8], line: u32, sink: &mut dyn ErrorSink) -> Vec<Result<Expr, ErrorKind>> {
    let mut lexer = Lexer::new(src, line);
    let tokens = drain_body(&mut lexer);
    parse_statements(&tokens, sink)
}

/// Drains `lexer` into the token slice a parser should see: the leading
/// `<?php` tag consumes silently when it opens the source directly, but
/// when raw text precedes it the lexer emits that prologue as one
/// `RAW_TEXT` token first, which also needs dropping rather than fed to
/// the parser.
pub(crate) fn drain_body(lexer: &mut Lexer<'_>) -> Vec<Token> {
    let mut tokens = Vec::new();
    let first = lexer.next_token();
    if !first.is_eof() && !first.kind.contains(TokenKind::RAW_TEXT) {
        tokens.push(first);
    }
    loop {
        let tok = lexer.next_token();
        if tok.is_eof() {
            break;
        }
        tokens.push(tok);
    }
    tokens
}
