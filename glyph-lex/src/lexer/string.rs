//! String literal lexing: single/double-quoted, backtick, and
//! heredoc/nowdoc extraction. Every variant stores its raw, unescaped
//! bytes — decoding escapes and expanding `{$...}` interpolation is a
//! parser-level concern, not the lexer's.

use crate::error::LexError;
use crate::lexer::core::is_ident_continue;
use crate::token::{Token, TokenData, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn lex_single_quoted(&mut self) -> Token {
        self.cursor.advance();
        let start = self.cursor.position();
        let mut escaped = false;
        while !self.cursor.is_at_end() {
            let c = self.cursor.current();
            if escaped {
                escaped = false;
            } else if c == b'\\' {
                escaped = true;
            } else if c == b'\'' {
                break;
            }
            self.cursor.advance();
        }
        let body = self.cursor.slice_from(start).to_vec();
        if !self.cursor.is_at_end() {
            self.cursor.advance();
        }
        Token::new(TokenKind::SINGLE_STR, self.start_span(), TokenData::Bytes(body))
    }

    pub(crate) fn lex_double_quoted(&mut self) -> Token {
        self.cursor.advance();
        let body = self.scan_interpolated_body(b'"');
        if !self.cursor.is_at_end() {
            self.cursor.advance();
        }
        Token::new(TokenKind::DOUBLE_STR, self.start_span(), TokenData::Bytes(body))
    }

    pub(crate) fn lex_backtick(&mut self) -> Token {
        self.cursor.advance();
        let body = self.scan_interpolated_body(b'`');
        if !self.cursor.is_at_end() {
            self.cursor.advance();
        }
        Token::new(TokenKind::BACKTICK_STR, self.start_span(), TokenData::Bytes(body))
    }

    /// Shared double-quote/backtick scan: stops at an unescaped
    /// `terminator`, except while inside a `{$...}` interpolation span,
    /// where nested `{`/`}` are counted so an inner quote doesn't end
    /// the outer string early.
    fn scan_interpolated_body(&mut self, terminator: u8) -> Vec<u8> {
        let start = self.cursor.position();
        let mut escaped = false;
        let mut brace_depth = 0u32;
        while !self.cursor.is_at_end() {
            let c = self.cursor.current();
            if escaped {
                escaped = false;
                self.cursor.advance();
                continue;
            }
            if c == b'\\' {
                escaped = true;
                self.cursor.advance();
                continue;
            }
            if brace_depth == 0 && c == terminator {
                break;
            }
            if c == b'{' && self.cursor.peek(1) == b'$' {
                brace_depth += 1;
            } else if c == b'{' && brace_depth > 0 {
                brace_depth += 1;
            } else if c == b'}' && brace_depth > 0 {
                brace_depth -= 1;
            }
            self.cursor.advance();
        }
        self.cursor.slice_from(start).to_vec()
    }

    /// `<<<ID` (heredoc) or `<<<'ID'` (nowdoc). The body runs until a
    /// line that begins with `ID` followed only by an optional `;` and
    /// end-of-line; that terminator line is consumed up through `ID`
    /// only, so the trailing `;` (if present) is lexed as its own token
    /// afterward.
    pub(crate) fn lex_heredoc_or_nowdoc(&mut self) -> Token {
        self.cursor.advance_n(3);
        while matches!(self.cursor.current(), b' ' | b'\t') {
            self.cursor.advance();
        }
        let is_nowdoc = self.cursor.current() == b'\'';
        let quote = if is_nowdoc {
            Some(b'\'')
        } else if self.cursor.current() == b'"' {
            Some(b'"')
        } else {
            None
        };
        if let Some(q) = quote {
            self.cursor.advance();
            let id_start = self.cursor.position();
            while is_ident_continue(self.cursor.current()) {
                self.cursor.advance();
            }
            let ident = self.cursor.slice_from(id_start).to_vec();
            if self.cursor.current() == q {
                self.cursor.advance();
            }
            self.finish_heredoc_body(ident, is_nowdoc)
        } else {
            let id_start = self.cursor.position();
            while is_ident_continue(self.cursor.current()) {
                self.cursor.advance();
            }
            let ident = self.cursor.slice_from(id_start).to_vec();
            self.finish_heredoc_body(ident, false)
        }
    }

    fn finish_heredoc_body(&mut self, ident: Vec<u8>, is_nowdoc: bool) -> Token {
        while !self.cursor.is_at_end() && self.cursor.current() != b'\n' {
            self.cursor.advance();
        }
        if !self.cursor.is_at_end() {
            self.cursor.advance();
        }

        let body_start = self.cursor.position();
        loop {
            if self.cursor.starts_with(&ident) {
                let after = self.cursor.position() + ident.len();
                let next = self.cursor.source().get(after).copied().unwrap_or(0);
                if !is_ident_continue(next) {
                    break;
                }
            }
            while !self.cursor.is_at_end() && self.cursor.current() != b'\n' {
                self.cursor.advance();
            }
            if self.cursor.is_at_end() {
                self.report(LexError::UnterminatedHeredoc);
                break;
            }
            self.cursor.advance();
        }

        let mut end = self.cursor.position();
        let source = self.cursor.source();
        if end > body_start && source[end - 1] == b'\n' {
            end -= 1;
            if end > body_start && source[end - 1] == b'\r' {
                end -= 1;
            }
        }
        let body = source[body_start..end].to_vec();
        self.cursor.advance_n(ident.len());

        let kind = if is_nowdoc { TokenKind::NOWDOC } else { TokenKind::HEREDOC };
        Token::new(kind, self.start_span(), TokenData::Bytes(body))
    }
}
