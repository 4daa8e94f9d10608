//! Integer and real literal lexing: decimal, `0x` hex, `0b` binary,
//! leading-zero octal, and float forms with a fractional part and/or
//! exponent.

use crate::token::{Token, TokenData, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn lex_number(&mut self) -> Token {
        let start = self.cursor.position();

        if self.cursor.current() == b'0' {
            match self.cursor.peek(1) {
                b'x' | b'X' => {
                    self.cursor.advance_n(2);
                    return self.finish_radix_int(start, 16, |b| b.is_ascii_hexdigit());
                }
                b'b' | b'B' => {
                    self.cursor.advance_n(2);
                    return self.finish_radix_int(start, 2, |b| b == b'0' || b == b'1');
                }
                b'0'..=b'9' if self.leading_zero_run_is_octal() => {
                    self.cursor.advance();
                    return self.finish_radix_int(start, 8, |b| (b'0'..=b'7').contains(&b));
                }
                _ => {}
            }
        }

        while self.cursor.current().is_ascii_digit() {
            self.cursor.advance();
        }

        let mut is_float = false;
        if self.cursor.current() == b'.' && self.cursor.peek(1).is_ascii_digit() {
            is_float = true;
            self.cursor.advance();
            while self.cursor.current().is_ascii_digit() {
                self.cursor.advance();
            }
        }
        if matches!(self.cursor.current(), b'e' | b'E') {
            let mark = self.cursor.snapshot();
            self.cursor.advance();
            if matches!(self.cursor.current(), b'+' | b'-') {
                self.cursor.advance();
            }
            if self.cursor.current().is_ascii_digit() {
                is_float = true;
                while self.cursor.current().is_ascii_digit() {
                    self.cursor.advance();
                }
            } else {
                self.cursor.restore(mark);
            }
        }

        let text = std::str::from_utf8(self.cursor.slice_from(start)).unwrap_or("0");
        if is_float {
            let value: f64 = text.parse().unwrap_or(0.0);
            Token::new(TokenKind::REAL, self.start_span(), TokenData::Real(value))
        } else {
            match text.parse::<i64>() {
                Ok(value) => Token::new(TokenKind::INT, self.start_span(), TokenData::Int(value)),
                Err(_) => {
                    let value: f64 = text.parse().unwrap_or(f64::INFINITY);
                    Token::new(TokenKind::REAL, self.start_span(), TokenData::Real(value))
                }
            }
        }
    }

    /// A leading `0` followed by at least one more digit is octal only if
    /// the whole contiguous digit run is within `0..=7` and isn't itself
    /// the integer part of a float (`.`/`e` immediately after the digit
    /// run would make it one) — `089` and `07.5` both fall through to
    /// the decimal/float path below instead of being split into an
    /// octal token plus a stray leftover token.
    fn leading_zero_run_is_octal(&self) -> bool {
        let mut offset = 1;
        let mut all_octal = true;
        while self.cursor.peek(offset).is_ascii_digit() {
            if !(b'0'..=b'7').contains(&self.cursor.peek(offset)) {
                all_octal = false;
            }
            offset += 1;
        }
        all_octal && !matches!(self.cursor.peek(offset), b'.' | b'e' | b'E')
    }

    /// Consumes digits of `radix` starting right after the prefix, then
    /// parses as `i64`, promoting to `REAL` on overflow the same way
    /// decimal literals do (PHP never wraps an integer literal).
    fn finish_radix_int(&mut self, start: usize, radix: u32, is_digit: fn(u8) -> bool) -> Token {
        let digits_start = self.cursor.position();
        while is_digit(self.cursor.current()) {
            self.cursor.advance();
        }
        let digits = std::str::from_utf8(self.cursor.slice_from(digits_start)).unwrap_or("0");
        match i64::from_str_radix(digits, radix) {
            Ok(value) => Token::new(TokenKind::INT, self.start_span(), TokenData::Int(value)),
            Err(_) => {
                let value = u64::from_str_radix(digits, radix).map(|v| v as f64).unwrap_or(f64::INFINITY);
                Token::new(TokenKind::REAL, self.start_span(), TokenData::Real(value))
            }
        }
        .with_start(start)
    }
}

impl Token {
    fn with_start(mut self, start: usize) -> Token {
        self.span.start = start as u32;
        self
    }
}
