//! Property tests for the lexer: it never panics on arbitrary input,
//! always terminates, and a few documented token-folding scenarios
//! hold for every input that matches their shape, not just the literal
//! examples.

use glyph_lex::{Lexer, TokenKind};
use proptest::prelude::*;

/// Runs the lexer to completion, bailing out after a generous token
/// budget so a hypothetical infinite loop fails the test instead of
/// hanging the suite.
fn drain(source: &[u8]) -> Vec<glyph_lex::Token> {
    let mut lexer = Lexer::new(source, 1);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token();
        let is_eof = tok.is_eof();
        tokens.push(tok);
        if is_eof || tokens.len() > 100_000 {
            break;
        }
    }
    tokens
}

proptest! {
    /// Any byte string, PHP-tagged or not, lexes to completion: the
    /// lexer never panics and always reaches EOF.
    #[test]
    fn never_panics_and_always_reaches_eof(bytes: Vec<u8>) {
        let tokens = drain(&bytes);
        prop_assert!(tokens.last().map(|t| t.is_eof()).unwrap_or(false));
    }

    /// Token spans never run past the end of the source buffer and
    /// never start before the position of the token before them.
    #[test]
    fn spans_stay_in_bounds_and_monotonic(bytes: Vec<u8>) {
        let tokens = drain(&bytes);
        let mut last_start = 0u32;
        for tok in &tokens {
            prop_assert!(tok.span.start >= last_start);
            prop_assert!((tok.span.end as usize) <= bytes.len());
            last_start = tok.span.start;
        }
    }

    /// Lexing the same source twice yields the same sequence of token
    /// kinds: tokenization is a pure function of its input.
    #[test]
    fn lexing_is_deterministic(bytes: Vec<u8>) {
        let a: Vec<TokenKind> = drain(&bytes).iter().map(|t| t.kind).collect();
        let b: Vec<TokenKind> = drain(&bytes).iter().map(|t| t.kind).collect();
        prop_assert_eq!(a, b);
    }

    /// `(int)`, `(bool)`, `(string)`, `(float)`, `(array)`, `(object)`,
    /// and `(unset)` immediately followed by a variable always fold to
    /// exactly one OP token for the cast, then one VARIABLE token —
    /// never a standalone `(`/keyword/`)` triple.
    #[test]
    fn cast_fold_holds_for_every_cast_keyword(
        cast in prop::sample::select(vec!["int", "bool", "string", "float", "array", "object", "unset"]),
        name in "[a-zA-Z_][a-zA-Z0-9_]{0,8}",
    ) {
        let source = format!("<?php ({cast})${name};");
        let tokens = drain(source.as_bytes());
        let non_eof: Vec<_> = tokens.iter().filter(|t| !t.is_eof()).collect();
        prop_assert_eq!(non_eof.len(), 3);
        prop_assert_eq!(non_eof[0].kind, TokenKind::OP);
        prop_assert_eq!(non_eof[1].kind, TokenKind::VARIABLE);
        prop_assert_eq!(non_eof[2].kind, TokenKind::SEMICOLON);
    }
}
