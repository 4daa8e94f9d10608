//! L-value validation: assignment and reference-assign require a
//! modifiable left operand — a variable, a postfix chain of `[`, `->`,
//! `::` that bottoms out at a variable, or (assignment only) a
//! `list(...)` target.

use crate::ast::ExprKind;
use crate::Expr;

/// True for a variable or a postfix-access chain rooted at one. Used for
/// both assignment targets and the pre/post increment-decrement operand.
pub(crate) fn is_modifiable(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Variable(_) => true,
        ExprKind::Subscript { base, .. } => is_modifiable(base),
        ExprKind::MemberAccess { object, .. } => is_modifiable(object),
        ExprKind::StaticAccess { class, .. } => is_modifiable(class),
        ExprKind::Group(inner) => is_modifiable(inner),
        _ => false,
    }
}

/// True for anything `is_modifiable` accepts, plus a `list(...)` target
/// — valid only on the left of a plain assignment, never reference-assign
/// or increment/decrement.
pub(crate) fn is_assignable(expr: &Expr) -> bool {
    matches!(expr.kind, ExprKind::ListTarget(_)) || is_modifiable(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_util::Span;

    fn var(name: &str) -> Expr {
        Expr::new(ExprKind::Variable(Some(glyph_util::Symbol::intern(name))), Span::DUMMY)
    }

    #[test]
    fn bare_variable_is_modifiable() {
        assert!(is_modifiable(&var("a")));
    }

    #[test]
    fn subscript_of_variable_is_modifiable() {
        let base = var("a");
        let expr = Expr::new(ExprKind::Subscript { base: Box::new(base), index: None }, Span::DUMMY);
        assert!(is_modifiable(&expr));
    }

    #[test]
    fn literal_is_not_modifiable() {
        let expr = Expr::new(ExprKind::Int(1), Span::DUMMY);
        assert!(!is_modifiable(&expr));
    }

    #[test]
    fn list_target_is_assignable_but_not_modifiable() {
        let expr = Expr::new(ExprKind::ListTarget(vec![Some(var("a"))]), Span::DUMMY);
        assert!(is_assignable(&expr));
        assert!(!is_modifiable(&expr));
    }
}
