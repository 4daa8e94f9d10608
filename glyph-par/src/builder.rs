//! Tree building: one precedence level at a time, highest to lowest, each
//! pass merging adjacent nodes into a single terminal until one node
//! remains. Parenthesized/braced spans and the postfix-access chain
//! recurse into this same entry point for their own sub-expressions, so
//! nesting at any depth is handled by the same code path.

use glyph_lex::{OperatorId, TokenKind};
use glyph_util::{ErrorKind, Span};

use crate::ast::{Expr, ExprKind};
use crate::error::{ErrorSink, SyntaxError};
use crate::extract::is_list_keyword;
use crate::lvalue;
use crate::node::Node;
use crate::verify::find_matching;

pub(crate) fn build(mut nodes: Vec<Node>, sink: &mut dyn ErrorSink) -> Result<Expr, ErrorKind> {
    if nodes.is_empty() {
        return Ok(Expr::new(ExprKind::Invalid, Span::DUMMY));
    }
    reduce_groups(&mut nodes, sink)?;
    reduce_postfix_chain(&mut nodes, sink)?;
    reduce_new_clone(&mut nodes);
    reduce_incr_decr(&mut nodes);
    reduce_unary(&mut nodes);
    for level in [7, 8, 9, 10, 11, 12, 13, 14, 15, 16] {
        reduce_left_assoc(&mut nodes, level);
    }
    reduce_ternary(&mut nodes, sink)?;
    reduce_assign(&mut nodes, sink)?;
    for level in [19, 20, 21, 22] {
        reduce_left_assoc(&mut nodes, level);
    }
    finalize(nodes, sink)
}

fn finalize(mut nodes: Vec<Node>, sink: &mut dyn ErrorSink) -> Result<Expr, ErrorKind> {
    if nodes.len() == 1 {
        let node = nodes.pop().unwrap();
        return if node.is_terminal() {
            Ok(node.into_expr())
        } else {
            let span = node.span();
            sink.report(SyntaxError::new("incomplete expression", span));
            Err(ErrorKind::Syntax)
        };
    }
    let span = nodes.first().map(Node::span).unwrap_or(Span::DUMMY);
    sink.report(SyntaxError::new("incomplete expression", span));
    Err(ErrorKind::Syntax)
}

/// Parenthesized and (non-rewritten) braced spans reduce first, by
/// recursing into `build` over their contents. A `(` immediately
/// preceded by a terminal is a call, not a grouping, and is left for
/// `reduce_postfix_chain`.
fn reduce_groups(nodes: &mut Vec<Node>, sink: &mut dyn ErrorSink) -> Result<(), ErrorKind> {
    let mut i = 0;
    while i < nodes.len() {
        let is_paren = nodes[i].is_kind(TokenKind::LPAREN);
        let is_brace = nodes[i].is_kind(TokenKind::LBRACE);
        if !is_paren && !is_brace {
            i += 1;
            continue;
        }
        if is_paren && i > 0 && nodes[i - 1].is_terminal() {
            i += 1;
            continue;
        }
        let (open_kind, close_kind) = if is_paren { (TokenKind::LPAREN, TokenKind::RPAREN) } else { (TokenKind::LBRACE, TokenKind::RBRACE) };
        match find_matching(nodes, i, open_kind, close_kind) {
            Some(close) => {
                let inner: Vec<Node> = nodes.drain((i + 1)..close).collect();
                nodes.remove(i + 1);
                let open_span = nodes[i].span();
                let built = build(inner, sink)?;
                let span = open_span.to(built.span);
                nodes[i] = Node::Terminal(Expr::new(ExprKind::Group(Box::new(built)), span));
                i += 1;
            }
            None => i += 1,
        }
    }
    Ok(())
}

/// Precedence 2: `->`, `::`, `[`, and function-call `(`, all left
/// associative and chaining (`$a->b[0]()`).
fn reduce_postfix_chain(nodes: &mut Vec<Node>, sink: &mut dyn ErrorSink) -> Result<(), ErrorKind> {
    let mut i = 0;
    let mut had_error = false;
    while i < nodes.len() {
        if !nodes[i].is_terminal() || i + 1 >= nodes.len() {
            i += 1;
            continue;
        }

        let member_op = nodes[i + 1].as_operator().filter(|d| d.id == OperatorId::MemberAccess || d.id == OperatorId::StaticAccess);
        if let Some(d) = member_op {
            let is_static = d.id == OperatorId::StaticAccess;
            if i + 2 >= nodes.len() || !nodes[i + 2].is_terminal() {
                sink.report(SyntaxError::new("expected member name", nodes[i + 1].span()));
                had_error = true;
                i += 1;
                continue;
            }
            let member = nodes.remove(i + 2).into_expr();
            nodes.remove(i + 1);
            let object = nodes.remove(i).into_expr();
            let span = object.span.to(member.span);
            let kind = if is_static {
                ExprKind::StaticAccess { class: Box::new(object), member: Box::new(member) }
            } else {
                ExprKind::MemberAccess { object: Box::new(object), member: Box::new(member) }
            };
            nodes.insert(i, Node::Terminal(Expr::new(kind, span)));
            continue;
        }

        if nodes[i + 1].is_kind(TokenKind::LBRACKET) {
            match find_matching(nodes, i + 1, TokenKind::LBRACKET, TokenKind::RBRACKET) {
                Some(close) => {
                    let inner: Vec<Node> = nodes.drain((i + 2)..close).collect();
                    nodes.remove(i + 1);
                    let index = if inner.is_empty() { None } else { Some(Box::new(build(inner, sink)?)) };
                    let close_span = nodes[i + 1].span();
                    nodes.remove(i + 1);
                    let base = nodes.remove(i).into_expr();
                    let span = base.span.to(close_span);
                    nodes.insert(i, Node::Terminal(Expr::new(ExprKind::Subscript { base: Box::new(base), index }, span)));
                    continue;
                }
                None => {
                    i += 1;
                    continue;
                }
            }
        }

        if nodes[i + 1].is_kind(TokenKind::LPAREN) {
            match find_matching(nodes, i + 1, TokenKind::LPAREN, TokenKind::RPAREN) {
                Some(close) => {
                    let inner: Vec<Node> = nodes.drain((i + 2)..close).collect();
                    let close_span = nodes[i + 2].span();
                    nodes.remove(i + 2); // close paren, shifted down to i+2 after drain
                    nodes.remove(i + 1); // open paren
                    let callee = nodes.remove(i).into_expr();
                    let span = callee.span.to(close_span);
                    let kind = if is_list_callee(&callee) {
                        let targets = split_list_targets(inner, sink)?;
                        ExprKind::ListTarget(targets)
                    } else {
                        let args = split_args(inner, sink)?;
                        ExprKind::Call { callee: Box::new(callee), args }
                    };
                    nodes.insert(i, Node::Terminal(Expr::new(kind, span)));
                    continue;
                }
                None => {
                    i += 1;
                    continue;
                }
            }
        }

        i += 1;
    }
    if had_error {
        Err(ErrorKind::Syntax)
    } else {
        Ok(())
    }
}

fn is_list_callee(expr: &Expr) -> bool {
    matches!(expr.kind, ExprKind::Keyword(id) if is_list_keyword(id))
}

fn split_top_level_commas(nodes: Vec<Node>) -> Vec<Vec<Node>> {
    let mut groups = Vec::new();
    let mut current = Vec::new();
    let mut depth = 0i32;
    for node in nodes {
        if node.is_kind(TokenKind::LPAREN) || node.is_kind(TokenKind::LBRACKET) || node.is_kind(TokenKind::LBRACE) {
            depth += 1;
            current.push(node);
        } else if node.is_kind(TokenKind::RPAREN) || node.is_kind(TokenKind::RBRACKET) || node.is_kind(TokenKind::RBRACE) {
            depth -= 1;
            current.push(node);
        } else if depth == 0 && node.is_kind(TokenKind::COMMA) {
            groups.push(std::mem::take(&mut current));
        } else {
            current.push(node);
        }
    }
    if !current.is_empty() || !groups.is_empty() {
        groups.push(current);
    }
    groups
}

fn split_args(nodes: Vec<Node>, sink: &mut dyn ErrorSink) -> Result<Vec<Expr>, ErrorKind> {
    if nodes.is_empty() {
        return Ok(Vec::new());
    }
    split_top_level_commas(nodes).into_iter().map(|g| build(g, sink)).collect()
}

fn split_list_targets(nodes: Vec<Node>, sink: &mut dyn ErrorSink) -> Result<Vec<Option<Expr>>, ErrorKind> {
    if nodes.is_empty() {
        return Ok(Vec::new());
    }
    split_top_level_commas(nodes)
        .into_iter()
        .map(|g| if g.is_empty() { Ok(None) } else { build(g, sink).map(Some) })
        .collect()
}

/// `new`/`clone` attach to the next already-built terminal. Running
/// this after `reduce_postfix_chain` (rather than strictly first, as
/// the numeric precedence table would suggest) means `new Foo(1, 2)`
/// picks up the constructor call as one unit automatically, since
/// `Foo(1, 2)` is already a `Call` terminal by this point — see the
/// `glyph-par` entry in DESIGN.md.
fn reduce_new_clone(nodes: &mut Vec<Node>) {
    let mut i = 0;
    while i < nodes.len() {
        let matches_new_clone = matches!(nodes[i].as_operator(), Some(d) if d.id == OperatorId::New || d.id == OperatorId::Clone);
        if matches_new_clone && i + 1 < nodes.len() && nodes[i + 1].is_terminal() {
            let op = nodes[i].as_operator().unwrap().id;
            let op_span = nodes[i].span();
            let operand = nodes.remove(i + 1).into_expr();
            nodes.remove(i);
            let span = op_span.to(operand.span);
            nodes.insert(i, Node::Terminal(Expr::new(ExprKind::Unary { op, operand: Box::new(operand) }, span)));
            continue;
        }
        i += 1;
    }
}

/// Precedence 3, non-associative: a right-to-left pass attaches `++`/`--`
/// to a preceding l-value as postfix, then a left-to-right pass attaches
/// any left over to a following l-value as prefix.
fn reduce_incr_decr(nodes: &mut Vec<Node>) {
    loop {
        let mut found = None;
        for i in (1..nodes.len()).rev() {
            if matches!(nodes[i].as_operator(), Some(d) if d.precedence == 3) && nodes[i - 1].expr().is_some_and(|e| lvalue::is_modifiable(e)) {
                found = Some(i);
                break;
            }
        }
        let Some(i) = found else { break };
        let op = nodes[i].as_operator().unwrap().id;
        let op_span = nodes[i].span();
        nodes.remove(i);
        let operand = nodes.remove(i - 1).into_expr();
        let span = operand.span.to(op_span);
        nodes.insert(i - 1, Node::Terminal(Expr::new(ExprKind::IncrDecr { op, operand: Box::new(operand), prefix: false }, span)));
    }

    loop {
        let mut found = None;
        for i in 0..nodes.len().saturating_sub(1) {
            if matches!(nodes[i].as_operator(), Some(d) if d.precedence == 3) && nodes[i + 1].expr().is_some_and(|e| lvalue::is_modifiable(e)) {
                found = Some(i);
                break;
            }
        }
        let Some(i) = found else { break };
        let op = nodes[i].as_operator().unwrap().id;
        let op_span = nodes[i].span();
        let operand = nodes.remove(i + 1).into_expr();
        nodes.remove(i);
        let span = op_span.to(operand.span);
        nodes.insert(i, Node::Terminal(Expr::new(ExprKind::IncrDecr { op, operand: Box::new(operand), prefix: true }, span)));
    }
}

/// Precedence 4, right associative: unary `-`/`+`/`~`/`!`/`@` and every
/// type cast, attaching the next terminal on a right-to-left pass.
fn reduce_unary(nodes: &mut Vec<Node>) {
    loop {
        let mut found = None;
        let mut i = nodes.len() as isize - 2;
        while i >= 0 {
            let idx = i as usize;
            if matches!(nodes[idx].as_operator(), Some(d) if d.precedence == 4) && nodes[idx + 1].is_terminal() {
                found = Some(idx);
                break;
            }
            i -= 1;
        }
        let Some(idx) = found else { break };
        let op = nodes[idx].as_operator().unwrap().id;
        let op_span = nodes[idx].span();
        let operand = nodes.remove(idx + 1).into_expr();
        nodes.remove(idx);
        let span = op_span.to(operand.span);
        let is_cast = matches!(
            op,
            OperatorId::CastInt | OperatorId::CastFloat | OperatorId::CastBool | OperatorId::CastString | OperatorId::CastArray | OperatorId::CastObject | OperatorId::CastUnset
        );
        let kind = if is_cast {
            ExprKind::Cast { op, operand: Box::new(operand) }
        } else {
            ExprKind::Unary { op, operand: Box::new(operand) }
        };
        nodes.insert(idx, Node::Terminal(Expr::new(kind, span)));
    }
}

/// Left-associative binaries (precedences 7–16, 19–22): repeatedly
/// merge the leftmost eligible operator at `level`, so chained operators
/// nest left (`a + b + c` becomes `(a + b) + c`). The reference-assign
/// operator swaps into `RefAssign` rather than a generic `Binary` since
/// its left side carries the l-value rule, not its right.
fn reduce_left_assoc(nodes: &mut Vec<Node>, level: u8) {
    loop {
        let mut found = None;
        for i in 1..nodes.len().saturating_sub(1) {
            if matches!(nodes[i].as_operator(), Some(d) if d.precedence == level) && nodes[i - 1].is_terminal() && nodes[i + 1].is_terminal() {
                found = Some(i);
                break;
            }
        }
        let Some(i) = found else { break };
        merge_binary_at(nodes, i);
    }
}

/// Right-associative binaries at precedence 18 (`=`, `+=`, ...):
/// l-value checked and wrapped in `Assign` rather than `Binary`.
fn reduce_assign(nodes: &mut Vec<Node>, sink: &mut dyn ErrorSink) -> Result<(), ErrorKind> {
    let mut had_error = false;
    loop {
        let mut found = None;
        let mut i = nodes.len() as isize - 2;
        while i >= 1 {
            let idx = i as usize;
            if matches!(nodes[idx].as_operator(), Some(d) if d.precedence == 18) && nodes[idx - 1].is_terminal() && nodes[idx + 1].is_terminal() {
                found = Some(idx);
                break;
            }
            i -= 1;
        }
        let Some(idx) = found else { break };
        let op = nodes[idx].as_operator().unwrap().id;
        let right = nodes.remove(idx + 1).into_expr();
        nodes.remove(idx);
        let left = nodes.remove(idx - 1).into_expr();
        if !lvalue::is_assignable(&left) {
            sink.report(SyntaxError::new("left-hand side of assignment is not a modifiable value", left.span));
            had_error = true;
        }
        let span = left.span.to(right.span);
        nodes.insert(idx - 1, Node::Terminal(Expr::new(ExprKind::Assign { op, target: Box::new(left), value: Box::new(right) }, span)));
    }
    if had_error {
        Err(ErrorKind::Syntax)
    } else {
        Ok(())
    }
}

fn merge_binary_at(nodes: &mut Vec<Node>, i: usize) {
    let op = nodes[i].as_operator().unwrap().id;
    let right = nodes.remove(i + 1).into_expr();
    nodes.remove(i);
    let left = nodes.remove(i - 1).into_expr();
    let span = left.span.to(right.span);
    let kind = if op == OperatorId::RefAssign {
        ExprKind::RefAssign { target: Box::new(left), value: Box::new(right) }
    } else {
        ExprKind::Binary { op, left: Box::new(left), right: Box::new(right) }
    };
    nodes.insert(i - 1, Node::Terminal(Expr::new(kind, span)));
}

/// Precedence 17: finds the leftmost unconsumed `?`, locates its
/// matching `:` by counting nested ternaries, takes the else-branch up
/// to the next top-level `,` (or end), and recurses into `build` for
/// both branches.
fn reduce_ternary(nodes: &mut Vec<Node>, sink: &mut dyn ErrorSink) -> Result<(), ErrorKind> {
    loop {
        let q_idx = nodes.iter().position(|n| matches!(n.as_operator(), Some(d) if d.id == OperatorId::Ternary));
        let Some(idx) = q_idx else { return Ok(()) };

        if idx == 0 || !nodes[idx - 1].is_terminal() {
            sink.report(SyntaxError::new("unexpected '?'", nodes[idx].span()));
            nodes.remove(idx);
            continue;
        }

        let mut depth = 1i32;
        let mut colon_idx = None;
        for j in (idx + 1)..nodes.len() {
            if matches!(nodes[j].as_operator(), Some(d) if d.id == OperatorId::Ternary) {
                depth += 1;
            } else if nodes[j].is_kind(TokenKind::COLON) {
                depth -= 1;
                if depth == 0 {
                    colon_idx = Some(j);
                    break;
                }
            }
        }
        let Some(colon_idx) = colon_idx else {
            sink.report(SyntaxError::new("mismatched '?'", nodes[idx].span()));
            nodes.remove(idx);
            continue;
        };

        let mut else_end = nodes.len();
        for j in (colon_idx + 1)..nodes.len() {
            if nodes[j].is_kind(TokenKind::COMMA) {
                else_end = j;
                break;
            }
        }

        let cond = nodes[idx - 1].clone().into_expr();
        let then_nodes: Vec<Node> = nodes[(idx + 1)..colon_idx].to_vec();
        let else_nodes: Vec<Node> = nodes[(colon_idx + 1)..else_end].to_vec();
        let then_branch = build(then_nodes, sink)?;
        let else_branch = build(else_nodes, sink)?;
        let span = cond.span.to(then_branch.span).to(else_branch.span);
        let new_node = Node::Terminal(Expr::new(
            ExprKind::Ternary { cond: Box::new(cond), then_branch: Box::new(then_branch), else_branch: Box::new(else_branch) },
            span,
        ));
        nodes.splice((idx - 1)..else_end, std::iter::once(new_node));
    }
}

/// Recursively checks every assignment, reference-assign and
/// increment/decrement operand for the l-value rule, reporting each
/// violation without stopping at the first one. Returns `true` if any
/// error was reported.
pub(crate) fn validate_lvalues(expr: &Expr, sink: &mut dyn ErrorSink) -> bool {
    let mut had_error = false;
    match &expr.kind {
        ExprKind::Assign { target, value, .. } => {
            if !lvalue::is_assignable(target) {
                sink.report(SyntaxError::new("left-hand side of assignment is not a modifiable value", target.span));
                had_error = true;
            }
            had_error |= validate_lvalues(target, sink);
            had_error |= validate_lvalues(value, sink);
        }
        ExprKind::RefAssign { target, value } => {
            if !lvalue::is_modifiable(target) {
                sink.report(SyntaxError::new("left-hand side of reference assignment is not a modifiable value", target.span));
                had_error = true;
            }
            had_error |= validate_lvalues(target, sink);
            had_error |= validate_lvalues(value, sink);
        }
        ExprKind::IncrDecr { operand, .. } => {
            if !lvalue::is_modifiable(operand) {
                sink.report(SyntaxError::new("increment/decrement operand is not a modifiable value", operand.span));
                had_error = true;
            }
            had_error |= validate_lvalues(operand, sink);
        }
        ExprKind::Unary { operand, .. } | ExprKind::Cast { operand, .. } => had_error |= validate_lvalues(operand, sink),
        ExprKind::Binary { left, right, .. } => {
            had_error |= validate_lvalues(left, sink);
            had_error |= validate_lvalues(right, sink);
        }
        ExprKind::Ternary { cond, then_branch, else_branch } => {
            had_error |= validate_lvalues(cond, sink);
            had_error |= validate_lvalues(then_branch, sink);
            had_error |= validate_lvalues(else_branch, sink);
        }
        ExprKind::MemberAccess { object, member } => {
            had_error |= validate_lvalues(object, sink);
            had_error |= validate_lvalues(member, sink);
        }
        ExprKind::StaticAccess { class, member } => {
            had_error |= validate_lvalues(class, sink);
            had_error |= validate_lvalues(member, sink);
        }
        ExprKind::Subscript { base, index } => {
            had_error |= validate_lvalues(base, sink);
            if let Some(index) = index {
                had_error |= validate_lvalues(index, sink);
            }
        }
        ExprKind::Call { callee, args } => {
            had_error |= validate_lvalues(callee, sink);
            for arg in args {
                had_error |= validate_lvalues(arg, sink);
            }
        }
        ExprKind::ListTarget(items) => {
            for item in items.iter().flatten() {
                had_error |= validate_lvalues(item, sink);
            }
        }
        ExprKind::Group(inner) => had_error |= validate_lvalues(inner, sink),
        _ => {}
    }
    had_error
}
