//! Punctuation and symbolic operator lexing, plus type-cast
//! recognition: `(` looks ahead past one cast keyword and a matching
//! `)` before committing to a plain `LPAREN`, so `(int)`, `(array)`,
//! `(unset)` and the rest lex as a single cast OP token rather than a
//! `( KEYWORD )` triple a caller would have to reassemble itself.

use glyph_util::Span;

use crate::lexer::core::is_ident_continue;
use crate::optable::{self, OperatorId};
use crate::token::{Token, TokenData, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn lex_punctuation(&mut self) -> Token {
        let c = self.cursor.current();
        self.cursor.advance();
        match c {
            b'(' => self.open_paren_or_cast(),
            b')' => Token::punct(TokenKind::RPAREN, self.start_span()),
            b'[' => Token::punct(TokenKind::LBRACKET, self.start_span()),
            b']' => Token::punct(TokenKind::RBRACKET, self.start_span()),
            b'{' => Token::punct(TokenKind::LBRACE, self.start_span()),
            b'}' => Token::punct(TokenKind::RBRACE, self.start_span()),
            b':' => Token::punct(TokenKind::COLON, self.start_span()),
            b',' => Token::punct(TokenKind::COMMA, self.start_span()),
            b';' => Token::punct(TokenKind::SEMICOLON, self.start_span()),
            b'\\' => Token::punct(TokenKind::NS_SEPARATOR, self.start_span()),
            _ => unreachable!("lex_punctuation only called for known punctuation bytes"),
        }
    }

    /// `(` has just been consumed. Peeks past whitespace/comments for an
    /// identifier-shaped word; if it resolves to one of the seven cast
    /// keywords and is itself followed (past more whitespace/comments)
    /// by `)`, consumes all of it and emits one cast OP token. Anything
    /// else rewinds the cursor back to right after `(` and emits a
    /// plain `LPAREN`, leaving the word to lex normally on the next call.
    fn open_paren_or_cast(&mut self) -> Token {
        let lparen_span = self.start_span();
        let rewind = self.cursor.snapshot();

        self.skip_whitespace_and_comments();
        let word_start = self.cursor.position();
        while is_ident_continue(self.cursor.current()) {
            self.cursor.advance();
        }
        let word = self.cursor.slice_from(word_start);
        let lower: Vec<u8> = word.iter().map(u8::to_ascii_lowercase).collect();
        let keyword = (!word.is_empty()).then(|| crate::keyword::lookup(&lower)).flatten().filter(|k| k.is_cast_keyword());

        let Some(keyword) = keyword else {
            self.cursor.restore(rewind);
            return Token::punct(TokenKind::LPAREN, lparen_span);
        };

        self.skip_whitespace_and_comments();
        if self.cursor.current() != b')' {
            self.cursor.restore(rewind);
            return Token::punct(TokenKind::LPAREN, lparen_span);
        }
        self.cursor.advance();

        let id = match keyword {
            crate::KeywordId::IntType => OperatorId::CastInt,
            crate::KeywordId::FloatType => OperatorId::CastFloat,
            crate::KeywordId::Bool => OperatorId::CastBool,
            crate::KeywordId::StringType => OperatorId::CastString,
            crate::KeywordId::ArrayType => OperatorId::CastArray,
            crate::KeywordId::ObjectType => OperatorId::CastObject,
            crate::KeywordId::Unset => OperatorId::CastUnset,
            _ => unreachable!("is_cast_keyword guarantees one of the seven cast keywords"),
        };
        let span = Span::new(lparen_span.start, self.cursor.position() as u32, lparen_span.line);
        Token::new(TokenKind::OP, span, TokenData::Operator(optable::descriptor(id)))
    }

    /// Resolves the single-character `+`/`-` unary-vs-binary ambiguity
    /// from the previously emitted token, then dispatches the general
    /// operator lexing for everything else.
    pub(crate) fn lex_operator(&mut self) -> Token {
        match self.cursor.current() {
            b'+' => self.lex_plus(),
            b'-' => self.lex_minus(),
            b'*' => self.lex_two_char(b'*', OperatorId::Mul, b'=', OperatorId::MulAssign),
            b'/' => self.lex_two_char(b'/', OperatorId::Div, b'=', OperatorId::DivAssign),
            b'%' => self.lex_two_char(b'%', OperatorId::Mod, b'=', OperatorId::ModAssign),
            b'.' => self.lex_two_char(b'.', OperatorId::Concat, b'=', OperatorId::ConcatAssign),
            b'=' => self.lex_equals(),
            b'!' => self.lex_bang(),
            b'<' => self.lex_less(),
            b'>' => self.lex_greater(),
            b'&' => self.lex_ampersand(),
            b'|' => self.lex_pipe(),
            b'^' => self.lex_two_char(b'^', OperatorId::BitXor, b'=', OperatorId::XorAssign),
            b'~' => self.single(OperatorId::BitNot),
            b'?' => self.single(OperatorId::Ternary),
            b'@' => self.single(OperatorId::Suppress),
            other => self.invalid_token(other),
        }
    }

    fn single(&mut self, id: OperatorId) -> Token {
        self.cursor.advance();
        self.emit(id)
    }

    fn emit(&mut self, id: OperatorId) -> Token {
        Token::new(TokenKind::OP, self.start_span(), TokenData::Operator(optable::descriptor(id)))
    }

    /// `ch` then optional `follow` producing `follow_id`, else `plain_id`.
    fn lex_two_char(&mut self, ch: u8, plain_id: OperatorId, follow: u8, follow_id: OperatorId) -> Token {
        debug_assert_eq!(self.cursor.current(), ch);
        self.cursor.advance();
        if self.cursor.match_byte(follow) {
            self.emit(follow_id)
        } else {
            self.emit(plain_id)
        }
    }

    fn lex_plus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'+') {
            return self.emit(OperatorId::Incr);
        }
        if self.cursor.match_byte(b'=') {
            return self.emit(OperatorId::AddAssign);
        }
        if self.is_unary_context() {
            self.emit(OperatorId::UnaryPlus)
        } else {
            self.emit(OperatorId::Add)
        }
    }

    fn lex_minus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'-') {
            return self.emit(OperatorId::Decr);
        }
        if self.cursor.match_byte(b'>') {
            return self.emit(OperatorId::MemberAccess);
        }
        if self.cursor.match_byte(b'=') {
            return self.emit(OperatorId::SubAssign);
        }
        if self.is_unary_context() {
            self.emit(OperatorId::UnaryMinus)
        } else {
            self.emit(OperatorId::Sub)
        }
    }

    /// Per the ambiguity rule: unary if the previous token is one of
    /// LPAREN/OCB/OSB/COLON/COMMA, or is an OP other than `++`/`--`;
    /// binary otherwise (including no previous token at all, which
    /// reads as a fresh expression start and so is also unary).
    fn is_unary_context(&self) -> bool {
        match self.last_kind() {
            None => true,
            Some(kind) => {
                if kind.intersects(TokenKind::LPAREN | TokenKind::LBRACE | TokenKind::LBRACKET | TokenKind::COLON | TokenKind::COMMA) {
                    return true;
                }
                if kind.contains(TokenKind::OP) {
                    return !matches!(self.last_operator_id(), Some(OperatorId::Incr) | Some(OperatorId::Decr));
                }
                false
            }
        }
    }

    fn lex_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            if self.cursor.match_byte(b'=') {
                return self.emit(OperatorId::IdentEq);
            }
            return self.emit(OperatorId::Eq);
        }
        if self.cursor.match_byte(b'&') {
            return self.emit(OperatorId::RefAssign);
        }
        if self.cursor.match_byte(b'>') {
            return Token::punct(TokenKind::ARROW_KV, self.start_span());
        }
        self.emit(OperatorId::Assign)
    }

    fn lex_bang(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            if self.cursor.match_byte(b'=') {
                return self.emit(OperatorId::IdentNotEq);
            }
            return self.emit(OperatorId::NotEq);
        }
        self.emit(OperatorId::LogicalNot)
    }

    fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            return self.emit(OperatorId::Le);
        }
        if self.cursor.match_byte(b'>') {
            return self.emit(OperatorId::Diamond);
        }
        if self.cursor.match_byte(b'<') {
            if self.cursor.match_byte(b'=') {
                return self.emit(OperatorId::ShlAssign);
            }
            return self.emit(OperatorId::Shl);
        }
        self.emit(OperatorId::Lt)
    }

    fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            return self.emit(OperatorId::Ge);
        }
        if self.cursor.match_byte(b'>') {
            if self.cursor.match_byte(b'=') {
                return self.emit(OperatorId::ShrAssign);
            }
            return self.emit(OperatorId::Shr);
        }
        self.emit(OperatorId::Gt)
    }

    fn lex_ampersand(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'&') {
            return self.emit(OperatorId::LogicalAnd);
        }
        if self.cursor.match_byte(b'=') {
            return self.emit(OperatorId::AndAssign);
        }
        Token::punct(TokenKind::AMPERSAND, self.start_span())
    }

    fn lex_pipe(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'|') {
            return self.emit(OperatorId::LogicalOr);
        }
        if self.cursor.match_byte(b'=') {
            return self.emit(OperatorId::OrAssign);
        }
        self.emit(OperatorId::BitOr)
    }
}
