//! Idempotence: repeated operands of an AND/OR chain collapse.

use crate::ast::{Expr, Op};

use super::chain;
use super::Rule;

pub const RULES: &[Rule] = &[
    Rule::new("and-idempotence", "X∧X = X", and_idempotence),
    Rule::new("or-idempotence", "X∨X = X", or_idempotence),
];

fn dedup(expr: &Expr, op: Op) -> Option<Expr> {
    if !expr.is_op(op) {
        return None;
    }
    let operands = chain::operands(expr, op);
    let count = operands.len();
    let unique = chain::unique(operands);
    if unique.len() == count {
        return None;
    }
    Some(chain::rebuild(op, unique))
}

fn and_idempotence(expr: &Expr) -> Option<Expr> {
    dedup(expr, Op::And)
}

fn or_idempotence(expr: &Expr) -> Option<Expr> {
    dedup(expr, Op::Or)
}
