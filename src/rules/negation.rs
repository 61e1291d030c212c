//! Double negation and De Morgan's laws.
//!
//! De Morgan pushes a negation one level inward per application; the driver's
//! repeated passes carry it down to the literals.

use std::rc::Rc;

use crate::ast::{Expr, Op};

use super::chain;
use super::Rule;

pub const DOUBLE_NEGATION: &[Rule] = &[Rule::new("double-negation", "¬¬X = X", double_negation)];

pub const DE_MORGAN: &[Rule] = &[
    Rule::new("de-morgan-and", "¬(X∧Y) = ¬X∨¬Y", de_morgan_and),
    Rule::new("de-morgan-or", "¬(X∨Y) = ¬X∧¬Y", de_morgan_or),
    Rule::new("not-nand", "¬(X↑Y) = X∧Y", not_nand),
    Rule::new("not-nor", "¬(X↓Y) = X∨Y", not_nor),
];

fn double_negation(expr: &Expr) -> Option<Expr> {
    match expr {
        Expr::Not(inner) => match &**inner {
            Expr::Not(x) => Some((**x).clone()),
            _ => None,
        },
        _ => None,
    }
}

/// `¬(a op b op ...)` into the `dual` chain of complemented operands.
fn push_negation(expr: &Expr, op: Op, dual: Op) -> Option<Expr> {
    let Expr::Not(inner) = expr else {
        return None;
    };
    if !inner.is_op(op) {
        return None;
    }
    let complemented = chain::operands(inner, op)
        .into_iter()
        .map(|operand| operand.complement())
        .map(Rc::new)
        .collect();
    Some(chain::rebuild(dual, complemented))
}

fn de_morgan_and(expr: &Expr) -> Option<Expr> {
    push_negation(expr, Op::And, Op::Or)
}

fn de_morgan_or(expr: &Expr) -> Option<Expr> {
    push_negation(expr, Op::Or, Op::And)
}

/// `¬(l op r)` into `l op.negated() r`.
fn strip_negated(expr: &Expr, op: Op) -> Option<Expr> {
    match expr {
        Expr::Not(inner) => match &**inner {
            Expr::Binary(o, l, r) if *o == op => Some(Expr::binary(op.negated(), l.clone(), r.clone())),
            _ => None,
        },
        _ => None,
    }
}

fn not_nand(expr: &Expr) -> Option<Expr> {
    strip_negated(expr, Op::Nand)
}

fn not_nor(expr: &Expr) -> Option<Expr> {
    strip_negated(expr, Op::Nor)
}
