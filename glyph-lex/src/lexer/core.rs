//! Core lexer: the `Lexer` struct, the raw-text/PHP-segment pre-pass,
//! and the main per-token dispatch.

use glyph_util::Span;

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenData, TokenKind};

const OPEN_TAGS: &[&[u8]] = &[b"<?php", b"<?=", b"<?"];
const SCRIPT_OPEN: &[u8] = b"<script language=\"php\">";
const SCRIPT_CLOSE: &[u8] = b"</script>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Raw,
    Php,
}

/// Lexer over a byte slice of PHP-like source.
///
/// `tokens` holds every token emitted so far; the unary/binary `+`/`-`
/// ambiguity rule needs to see the *previous emitted token*, not just
/// the previous byte, so the buffer is kept around rather than threaded
/// through as extra state.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) mode: Mode,
    pub(crate) tokens: Vec<Token>,
    pub(crate) diagnostics: Vec<LexError>,
    pub(crate) token_start: usize,
    pub(crate) token_start_line: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a [u8], start_line: u32) -> Self {
        Self {
            cursor: Cursor::new(source, start_line),
            mode: Mode::Raw,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
            token_start: 0,
            token_start_line: start_line,
        }
    }

    pub fn diagnostics(&self) -> &[LexError] {
        &self.diagnostics
    }

    pub(crate) fn report(&mut self, err: LexError) {
        self.diagnostics.push(err);
    }

    pub(crate) fn start_span(&self) -> Span {
        Span::new(self.token_start as u32, self.cursor.position() as u32, self.token_start_line)
    }

    pub(crate) fn last_operator_id(&self) -> Option<crate::optable::OperatorId> {
        self.tokens.last().and_then(|t| t.as_operator()).map(|d| d.id)
    }

    pub(crate) fn last_kind(&self) -> Option<TokenKind> {
        self.tokens.last().map(|t| t.kind)
    }

    /// Returns the next token, recording it in the emitted-token buffer
    /// so later tokens can look back at it.
    pub fn next_token(&mut self) -> Token {
        let token = self.scan_one();
        self.tokens.push(token.clone());
        token
    }

    fn scan_one(&mut self) -> Token {
        match self.mode {
            Mode::Raw => self.scan_raw_segment(),
            Mode::Php => self.scan_php_token(),
        }
    }

    /// Emits the raw (non-PHP) text up to the next open tag as one
    /// `RAW_TEXT` token, or to end-of-source if no tag follows.
    fn scan_raw_segment(&mut self) -> Token {
        self.mark_start();
        if self.cursor.is_at_end() {
            return self.eof_token();
        }
        let start = self.cursor.position();
        loop {
            if self.cursor.is_at_end() {
                break;
            }
            if let Some(skip) = self.matching_open_tag_len() {
                if self.cursor.position() > start {
                    break;
                }
                self.cursor.advance_n(skip);
                self.mode = Mode::Php;
                return self.next_token();
            }
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start).to_vec();
        Token::new(TokenKind::RAW_TEXT, self.start_span(), TokenData::Bytes(text))
    }

    fn matching_open_tag_len(&self) -> Option<usize> {
        if self.cursor.starts_with_ignore_case(SCRIPT_OPEN) {
            return Some(SCRIPT_OPEN.len());
        }
        for tag in OPEN_TAGS {
            if self.cursor.starts_with_ignore_case(tag) {
                return Some(tag.len());
            }
        }
        None
    }

    fn scan_php_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.mark_start();

        if self.cursor.is_at_end() {
            return self.eof_token();
        }

        if self.cursor.starts_with(b"?>") {
            self.cursor.advance_n(2);
            if self.cursor.current() == b'\n' {
                self.cursor.advance();
            }
            self.mode = Mode::Raw;
            return Token::punct(TokenKind::SEMICOLON, self.start_span());
        }
        if self.cursor.starts_with_ignore_case(SCRIPT_CLOSE) {
            self.cursor.advance_n(SCRIPT_CLOSE.len());
            self.mode = Mode::Raw;
            return Token::punct(TokenKind::SEMICOLON, self.start_span());
        }

        let c = self.cursor.current();
        match c {
            b'(' | b')' | b'[' | b']' | b'{' | b'}' | b':' | b',' | b';' | b'\\' => self.lex_punctuation(),
            b'$' => self.lex_variable(),
            b'\'' => self.lex_single_quoted(),
            b'"' => self.lex_double_quoted(),
            b'`' => self.lex_backtick(),
            b'<' if self.cursor.starts_with(b"<<<") => self.lex_heredoc_or_nowdoc(),
            _ if c.is_ascii_digit() => self.lex_number(),
            _ if is_ident_start(c) => self.lex_identifier_or_keyword(),
            _ => self.lex_operator(),
        }
    }

    fn mark_start(&mut self) {
        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
    }

    fn eof_token(&self) -> Token {
        Token::punct(TokenKind::EOF, self.start_span())
    }

    pub(crate) fn invalid_token(&mut self, byte: u8) -> Token {
        self.cursor.advance();
        Token::new(TokenKind::INVALID, self.start_span(), TokenData::Bytes(vec![byte]))
    }
}

pub(crate) fn is_ident_start(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphabetic() || b >= 0x80
}

pub(crate) fn is_ident_continue(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphanumeric() || b >= 0x80
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_text_before_open_tag_is_one_token() {
        let mut lexer = Lexer::new(b"hello <?php echo 1;", 1);
        let raw = lexer.next_token();
        assert_eq!(raw.kind, TokenKind::RAW_TEXT);
        match raw.data {
            TokenData::Bytes(b) => assert_eq!(b, b"hello "),
            _ => panic!("expected raw text"),
        }
    }

    #[test]
    fn pure_php_source_with_no_tag_starts_in_raw_mode() {
        let mut lexer = Lexer::new(b"plain text, no php here", 1);
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::RAW_TEXT);
    }

    #[test]
    fn close_tag_emits_implicit_semicolon_and_returns_to_raw() {
        let mut lexer = Lexer::new(b"<?php echo 1 ?>after", 1);
        let _raw_empty = (); // open tag consumed silently, nothing before it
        let echo = lexer.next_token();
        assert_eq!(echo.kind, TokenKind::KEYWORD);
        let _one = lexer.next_token();
        let semi = lexer.next_token();
        assert_eq!(semi.kind, TokenKind::SEMICOLON);
        let after = lexer.next_token();
        assert_eq!(after.kind, TokenKind::RAW_TEXT);
    }

    #[test]
    fn eof_on_empty_source() {
        let mut lexer = Lexer::new(b"", 1);
        assert!(lexer.next_token().is_eof());
    }

    // ------------------------------------------------------------------
    // Property-based tests over arbitrary inputs
    // ------------------------------------------------------------------

    use crate::token::TokenKind;
    use proptest::prelude::*;

    fn php_tokens(body: &str) -> Vec<Token> {
        let source = format!("<?php {}", body);
        let mut lexer = Lexer::new(source.as_bytes(), 1);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token();
            if tok.is_eof() {
                break;
            }
            tokens.push(tok);
        }
        tokens
    }

    proptest! {
        #[test]
        fn arbitrary_identifier_lexes_as_exactly_one_token(input in "[a-zA-Z_][a-zA-Z0-9_]{0,40}") {
            let tokens = php_tokens(&input);
            prop_assert_eq!(tokens.len(), 1);
            prop_assert!(tokens[0].kind.intersects(TokenKind::ID | TokenKind::KEYWORD | TokenKind::OP));
        }

        #[test]
        fn arbitrary_decimal_literal_lexes_as_exactly_one_number_token(input in "[0-9]{1,18}") {
            let tokens = php_tokens(&input);
            prop_assert_eq!(tokens.len(), 1);
            prop_assert!(tokens[0].kind.intersects(TokenKind::INT | TokenKind::REAL));
        }

        #[test]
        fn arbitrary_single_quoted_body_never_panics_the_lexer(input in "[ -&(-~]{0,60}") {
            let source = format!("'{}'", input);
            let tokens = php_tokens(&source);
            prop_assert_eq!(tokens.len(), 1);
            prop_assert_eq!(tokens[0].kind, TokenKind::SINGLE_STR);
        }

        #[test]
        fn lexer_never_panics_on_arbitrary_bytes(input in proptest::collection::vec(any::<u8>(), 0..200)) {
            let mut lexer = Lexer::new(&input, 1);
            loop {
                let tok = lexer.next_token();
                if tok.is_eof() {
                    break;
                }
            }
        }
    }
}
