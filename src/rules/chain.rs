//! Helpers for n-ary views of binary chains.
//!
//! `A*B*C` is stored as `(A*B)*C`; rules that reason about "the operands of an
//! AND" flatten the maximal chain first and rebuild a left-folded chain after.

use std::collections::HashSet;
use std::rc::Rc;

use crate::ast::{Expr, Op};

/// Operands of the maximal `op` chain rooted at `expr`, left to right.
///
/// A non-`op` expression is a chain of one.
pub fn operands(expr: &Expr, op: Op) -> Vec<Rc<Expr>> {
    let mut out = Vec::new();
    match expr {
        Expr::Binary(o, l, r) if *o == op => {
            collect(l, op, &mut out);
            collect(r, op, &mut out);
        }
        _ => out.push(Rc::new(expr.clone())),
    }
    out
}

fn collect(expr: &Rc<Expr>, op: Op, out: &mut Vec<Rc<Expr>>) {
    match &**expr {
        Expr::Binary(o, l, r) if *o == op => {
            collect(l, op, out);
            collect(r, op, out);
        }
        _ => out.push(Rc::clone(expr)),
    }
}

/// Left-folded `op` chain; the identity element of `op` when empty.
pub fn rebuild(op: Op, operands: Vec<Rc<Expr>>) -> Expr {
    match op {
        Op::And => Expr::and_all(operands),
        Op::Or => Expr::or_all(operands),
        _ => Expr::chain(op, operands).unwrap_or_else(Expr::zero),
    }
}

/// Operands with duplicates removed, first occurrence kept.
pub fn unique(operands: Vec<Rc<Expr>>) -> Vec<Rc<Expr>> {
    let mut out: Vec<Rc<Expr>> = Vec::with_capacity(operands.len());
    for operand in operands {
        if !out.contains(&operand) {
            out.push(operand);
        }
    }
    out
}

/// Whether every element of `a` occurs in `b`.
pub fn is_subset(a: &[Rc<Expr>], b: &[Rc<Expr>]) -> bool {
    a.iter().all(|x| b.contains(x))
}

/// Whether some operand occurs both plainly and negated.
///
/// Tracks each operand in a "seen" set and each negated operand's body in a
/// "seen negated" set; a hit in the opposite set is a complementary pair.
pub fn has_complementary_pair(operands: &[Rc<Expr>]) -> bool {
    let mut seen: HashSet<&Expr> = HashSet::new();
    let mut seen_negated: HashSet<&Expr> = HashSet::new();
    for operand in operands {
        match &**operand {
            Expr::Not(inner) => {
                if seen.contains(&**inner) {
                    return true;
                }
                seen_negated.insert(&**inner);
            }
            other => {
                if seen_negated.contains(other) {
                    return true;
                }
                seen.insert(other);
            }
        }
    }
    false
}

/// Merge two operand sets that agree everywhere except on one complementary pair.
///
/// `{X, Y}` and `{X, ¬Y}` merge into `{X}`. Both inputs are treated as sets.
pub fn merge_complementary(a: &[Rc<Expr>], b: &[Rc<Expr>]) -> Option<Vec<Rc<Expr>>> {
    let a = unique(a.to_vec());
    let b = unique(b.to_vec());
    if a.len() != b.len() {
        return None;
    }
    let (x, y) = {
        let only_a: Vec<&Rc<Expr>> = a.iter().filter(|x| !b.contains(x)).collect();
        let only_b: Vec<&Rc<Expr>> = b.iter().filter(|x| !a.contains(x)).collect();
        match (only_a.as_slice(), only_b.as_slice()) {
            ([x], [y]) => (Rc::clone(x), Rc::clone(y)),
            _ => return None,
        }
    };
    if !x.is_complement_of(&y) {
        return None;
    }
    Some(a.into_iter().filter(|e| *e != x).collect())
}
