//! Expression tree types. One node type, `Expr`, covers every terminal
//! and composite form the tree builder produces — literals, variables,
//! the postfix-access chain, and every operator from the precedence
//! table.

use glyph_lex::{KeywordId, OperatorId};
use glyph_util::{Span, Symbol};

/// One built expression, paired with the source span it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub span: Span,
    pub kind: ExprKind,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { span, kind }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Int(i64),
    Real(f64),
    /// Single-quoted or nowdoc body: no interpolation, raw bytes.
    Str(Vec<u8>),
    /// Double-quoted, backtick, or heredoc body: may contain `{$...}`
    /// interpolation spans, left unexpanded — splitting those out is a
    /// later compilation stage, not tree building.
    InterpolatedStr(Vec<u8>),
    /// A bare keyword used as an expression atom (`true`, `null`,
    /// `array`, `list`, `isset`, ...): which of these resolve to a
    /// constant value and which only make sense as a call head is a
    /// concern of the stage that consumes this tree, not of the builder.
    Keyword(KeywordId),
    /// A bare, unqualified name: a constant or function reference.
    Ident(Symbol),
    /// `$name`. `None` is the bare `$` marker the lexer emits for
    /// `${...}`/`$$x` dynamic-variable forms; the builder does not
    /// resolve those further (see `glyph-par` open questions).
    Variable(Option<Symbol>),
    /// A parenthesized or (non-rewritten) braced sub-expression. Kept as
    /// an explicit wrapper rather than unwrapped, so re-printing or
    /// re-analysis can tell `($a)` apart from `$a`.
    Group(Box<Expr>),
    Unary {
        op: OperatorId,
        operand: Box<Expr>,
    },
    Cast {
        op: OperatorId,
        operand: Box<Expr>,
    },
    IncrDecr {
        op: OperatorId,
        operand: Box<Expr>,
        prefix: bool,
    },
    Binary {
        op: OperatorId,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `$a =& $b`: kept distinct from a plain `Assign` since its left
    /// operand is an l-value by construction and it never takes a
    /// compound form.
    RefAssign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Assign {
        op: OperatorId,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Ternary {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    MemberAccess {
        object: Box<Expr>,
        member: Box<Expr>,
    },
    StaticAccess {
        class: Box<Expr>,
        member: Box<Expr>,
    },
    /// `base[index]`. `index` is `None` for the append form `base[]`.
    Subscript {
        base: Box<Expr>,
        index: Option<Box<Expr>>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// `list($a, , $b)`: an assignment-only l-value. A `None` entry is a
    /// skipped slot (`list($a, , $c)`).
    ListTarget(Vec<Option<Expr>>),
    /// A node the builder could not resolve after an error was already
    /// reported for it; lets surrounding structure stay intact for
    /// further (best-effort) processing instead of aborting outright.
    Invalid,
}
