//! The operator descriptor table: every operator's textual form,
//! precedence, associativity, and symbolic opcode. Token attachment at
//! lex time and the expression-tree builder's precedence climbing both
//! read from the same table, so the two passes can never disagree about
//! what an operator means.

/// How an operator's operands combine when several of the same
/// precedence appear in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
    /// Chaining is rejected rather than silently nested (comparisons,
    /// `new`/`clone`, postfix `++`/`--`).
    Nonassoc,
}

/// Identity of one entry in the operator table. Casts and the pre/post
/// increment pair get distinct ids even though they share surface text
/// or precedence, since the tree builder dispatches on identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    New,
    Clone,
    MemberAccess,
    StaticAccess,
    Subscript,
    Call,
    /// `++`. Lexed as one neutral token; whether a given occurrence
    /// reads as prefix or postfix is decided during tree building by
    /// its position relative to an l-value, not at lex time.
    Incr,
    Decr,
    UnaryMinus,
    UnaryPlus,
    BitNot,
    LogicalNot,
    Suppress,
    CastInt,
    CastFloat,
    CastBool,
    CastString,
    CastArray,
    CastObject,
    CastUnset,
    InstanceOf,
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Concat,
    Shl,
    Shr,
    Lt,
    Gt,
    Le,
    Ge,
    Diamond,
    Eq,
    NotEq,
    AlphaEq,
    AlphaNotEq,
    IdentEq,
    IdentNotEq,
    BitAnd,
    RefAssign,
    BitXor,
    BitOr,
    LogicalAnd,
    LogicalOr,
    Ternary,
    Assign,
    AddAssign,
    SubAssign,
    ConcatAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    And,
    Xor,
    Or,
    Comma,
}

/// One row of the operator table: everything the lexer attaches to an
/// OP token and everything the tree builder needs to place it.
#[derive(Debug, Clone, Copy)]
pub struct OperatorDescriptor {
    pub id: OperatorId,
    pub text: &'static str,
    pub precedence: u8,
    pub assoc: Associativity,
    /// The symbolic opcode a future code generator would emit for this
    /// operator; carried here rather than invented at codegen time since
    /// it is a property of the operator, not of any one use site.
    pub opcode: &'static str,
    /// `and`/`or`/`xor`/`new`/`clone`/`instanceof`/`eq`/`ne`: matched
    /// case-insensitively against an identifier-shaped lexeme rather
    /// than byte-for-byte against punctuation.
    pub alphabetic: bool,
}

use Associativity::*;

macro_rules! op {
    ($id:ident, $text:expr, $prec:expr, $assoc:expr, $opcode:expr) => {
        OperatorDescriptor { id: OperatorId::$id, text: $text, precedence: $prec, assoc: $assoc, opcode: $opcode, alphabetic: false }
    };
}

macro_rules! alpha_op {
    ($id:ident, $text:expr, $prec:expr, $assoc:expr, $opcode:expr) => {
        OperatorDescriptor { id: OperatorId::$id, text: $text, precedence: $prec, assoc: $assoc, opcode: $opcode, alphabetic: true }
    };
}

/// The full table, ordered by precedence as in the reference table
/// (1 highest through 22 lowest). Lookup helpers below scan it linearly;
/// it is small and consulted a handful of times per token, so a perfect
/// hash would be effort spent on a non-hot path.
pub static OPERATORS: &[OperatorDescriptor] = &[
    alpha_op!(New, "new", 1, Nonassoc, "OP_NEW"),
    alpha_op!(Clone, "clone", 1, Nonassoc, "OP_CLONE"),
    op!(MemberAccess, "->", 2, Left, "OP_MEMBER"),
    op!(StaticAccess, "::", 2, Left, "OP_STATIC_MEMBER"),
    op!(Subscript, "[", 2, Left, "OP_LOAD_IDX"),
    op!(Call, "(", 2, Left, "OP_CALL"),
    op!(Incr, "++", 3, Nonassoc, "OP_INCR"),
    op!(Decr, "--", 3, Nonassoc, "OP_DECR"),
    op!(UnaryMinus, "-", 4, Right, "OP_NEG"),
    op!(UnaryPlus, "+", 4, Right, "OP_UPLUS"),
    op!(BitNot, "~", 4, Right, "OP_BITNOT"),
    op!(LogicalNot, "!", 4, Right, "OP_LNOT"),
    op!(Suppress, "@", 4, Right, "OP_SUPPRESS_ERR"),
    op!(CastInt, "(int)", 4, Right, "OP_TO_INT"),
    op!(CastFloat, "(float)", 4, Right, "OP_TO_FLOAT"),
    op!(CastBool, "(bool)", 4, Right, "OP_TO_BOOL"),
    op!(CastString, "(string)", 4, Right, "OP_TO_STRING"),
    op!(CastArray, "(array)", 4, Right, "OP_TO_ARRAY"),
    op!(CastObject, "(object)", 4, Right, "OP_TO_OBJECT"),
    op!(CastUnset, "(unset)", 4, Right, "OP_TO_NULL"),
    alpha_op!(InstanceOf, "instanceof", 7, Left, "OP_INSTANCEOF"),
    op!(Mul, "*", 7, Left, "OP_MUL"),
    op!(Div, "/", 7, Left, "OP_DIV"),
    op!(Mod, "%", 7, Left, "OP_MOD"),
    op!(Add, "+", 8, Left, "OP_ADD"),
    op!(Sub, "-", 8, Left, "OP_SUB"),
    op!(Concat, ".", 8, Left, "OP_CAT"),
    op!(Shl, "<<", 9, Left, "OP_SHL"),
    op!(Shr, ">>", 9, Left, "OP_SHR"),
    op!(Lt, "<", 10, Nonassoc, "OP_LT"),
    op!(Gt, ">", 10, Nonassoc, "OP_GT"),
    op!(Le, "<=", 10, Nonassoc, "OP_LE"),
    op!(Ge, ">=", 10, Nonassoc, "OP_GE"),
    op!(Diamond, "<>", 10, Nonassoc, "OP_NEQ"),
    op!(Eq, "==", 11, Nonassoc, "OP_EQ"),
    op!(NotEq, "!=", 11, Nonassoc, "OP_NEQ"),
    alpha_op!(AlphaEq, "eq", 11, Nonassoc, "OP_EQ"),
    alpha_op!(AlphaNotEq, "ne", 11, Nonassoc, "OP_NEQ"),
    op!(IdentEq, "===", 11, Nonassoc, "OP_TEQ"),
    op!(IdentNotEq, "!==", 11, Nonassoc, "OP_TNEQ"),
    op!(BitAnd, "&", 12, Left, "OP_BAND"),
    op!(RefAssign, "=&", 12, Left, "OP_STORE_REF"),
    op!(BitXor, "^", 13, Left, "OP_BXOR"),
    op!(BitOr, "|", 14, Left, "OP_BOR"),
    op!(LogicalAnd, "&&", 15, Left, "OP_LAND"),
    op!(LogicalOr, "||", 16, Left, "OP_LOR"),
    op!(Ternary, "?", 17, Left, "OP_TERNARY"),
    op!(Assign, "=", 18, Right, "OP_STORE"),
    op!(AddAssign, "+=", 18, Right, "OP_ADD_STORE"),
    op!(SubAssign, "-=", 18, Right, "OP_SUB_STORE"),
    op!(ConcatAssign, ".=", 18, Right, "OP_CAT_STORE"),
    op!(MulAssign, "*=", 18, Right, "OP_MUL_STORE"),
    op!(DivAssign, "/=", 18, Right, "OP_DIV_STORE"),
    op!(ModAssign, "%=", 18, Right, "OP_MOD_STORE"),
    op!(AndAssign, "&=", 18, Right, "OP_BAND_STORE"),
    op!(OrAssign, "|=", 18, Right, "OP_BOR_STORE"),
    op!(XorAssign, "^=", 18, Right, "OP_BXOR_STORE"),
    op!(ShlAssign, "<<=", 18, Right, "OP_SHL_STORE"),
    op!(ShrAssign, ">>=", 18, Right, "OP_SHR_STORE"),
    alpha_op!(And, "and", 19, Left, "OP_LAND"),
    alpha_op!(Xor, "xor", 20, Left, "OP_LXOR"),
    alpha_op!(Or, "or", 21, Left, "OP_LOR"),
    op!(Comma, ",", 22, Left, "OP_SEQ"),
];

/// Looks up the (first, by table order) descriptor matching an
/// alphabetic lexeme — `and`, `or`, `xor`, `new`, `clone`, `instanceof`,
/// `eq`, `ne` — case-insensitively, as PHP-style grammars treat these as
/// case-insensitive keywords rather than ordinary identifiers.
pub fn lookup_alphabetic(text: &[u8]) -> Option<&'static OperatorDescriptor> {
    OPERATORS.iter().find(|op| op.alphabetic && text.eq_ignore_ascii_case(op.text.as_bytes()))
}

/// Looks up a punctuation operator by its id, used once the lexer has
/// already decided which punctuation form it saw (e.g. `+=` vs `+`).
pub fn descriptor(id: OperatorId) -> &'static OperatorDescriptor {
    OPERATORS.iter().find(|op| op.id == id).expect("every OperatorId has exactly one table row")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabetic_lookup_is_case_insensitive() {
        let found = lookup_alphabetic(b"AND").unwrap();
        assert_eq!(found.id, OperatorId::And);
        assert_eq!(found.precedence, 19);
    }

    #[test]
    fn punctuation_is_not_found_alphabetically() {
        assert!(lookup_alphabetic(b"+").is_none());
    }

    #[test]
    fn descriptor_resolves_precedence() {
        assert_eq!(descriptor(OperatorId::Assign).precedence, 18);
        assert_eq!(descriptor(OperatorId::Assign).assoc, Associativity::Right);
    }
}
