//! Identifiers, keywords, alphabetic operators, and `$`-variables.

use glyph_util::Symbol;

use crate::keyword;
use crate::lexer::core::{is_ident_continue, is_ident_start};
use crate::optable;
use crate::token::{Token, TokenData, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Reads an identifier-shaped run of bytes, then classifies it: a
    /// reserved keyword, one of the case-insensitive alphabetic
    /// operators (`and`, `or`, `xor`, `new`, `clone`, `instanceof`,
    /// `eq`, `ne`), or a plain identifier.
    pub(crate) fn lex_identifier_or_keyword(&mut self) -> Token {
        let start = self.cursor.position();
        while is_ident_continue(self.cursor.current()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start);
        let lower: Vec<u8> = text.iter().map(u8::to_ascii_lowercase).collect();

        if let Some(id) = keyword::lookup(&lower) {
            return Token::new(TokenKind::KEYWORD, self.start_span(), TokenData::Keyword(id));
        }
        if let Some(descriptor) = optable::lookup_alphabetic(text) {
            return Token::new(TokenKind::OP | TokenKind::ID, self.start_span(), TokenData::Operator(descriptor));
        }
        let symbol = Symbol::intern(std::str::from_utf8(text).unwrap_or(""));
        Token::new(TokenKind::ID, self.start_span(), TokenData::Ident(symbol))
    }

    /// `$name`, or a bare `$` when what follows isn't a plain
    /// identifier (`${...}`, `$$x`) — those complex forms are built
    /// from the bare-`$` token plus whatever follows it, at the parser
    /// level.
    pub(crate) fn lex_variable(&mut self) -> Token {
        debug_assert_eq!(self.cursor.current(), b'$');
        self.cursor.advance();
        if !is_ident_start(self.cursor.current()) {
            return Token::new(TokenKind::VARIABLE, self.start_span(), TokenData::None);
        }
        let start = self.cursor.position();
        while is_ident_continue(self.cursor.current()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start);
        let symbol = Symbol::intern(std::str::from_utf8(text).unwrap_or(""));
        Token::new(TokenKind::VARIABLE, self.start_span(), TokenData::Ident(symbol))
    }
}
