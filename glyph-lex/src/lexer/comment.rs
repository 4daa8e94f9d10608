//! Comment and whitespace skipping inside a PHP segment.

use crate::error::LexError;
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn skip_whitespace_and_comments(&mut self) {
        loop {
            if self.cursor.is_at_end() {
                return;
            }
            match self.cursor.current() {
                b' ' | b'\t' | b'\r' | b'\n' => self.cursor.advance(),
                b'#' => self.skip_line_comment(),
                b'/' if self.cursor.peek(1) == b'/' => self.skip_line_comment(),
                b'/' if self.cursor.peek(1) == b'*' => self.skip_block_comment(),
                _ => return,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current() != b'\n' {
            if self.cursor.starts_with(b"?>") {
                return;
            }
            self.cursor.advance();
        }
    }

    /// PHP block comments do not nest: the first `*/` closes them.
    fn skip_block_comment(&mut self) {
        self.cursor.advance_n(2);
        loop {
            if self.cursor.is_at_end() {
                self.report(LexError::UnterminatedBlockComment);
                return;
            }
            if self.cursor.starts_with(b"*/") {
                self.cursor.advance_n(2);
                return;
            }
            self.cursor.advance();
        }
    }
}
