//! Absorption, complement absorption, factoring and distribution.
//!
//! Each law comes in an OR-of-ANDs form and its AND-of-ORs dual; the helpers
//! below take the `outer` and `inner` connectives as parameters.
//!
//! Factoring and distribution undo each other, so they are never put into the
//! same [`RuleSet`][super::RuleSet].

use std::rc::Rc;

use crate::ast::{Expr, Op};

use super::chain;
use super::Rule;

pub const ABSORPTION: &[Rule] = &[
    Rule::new("or-absorption", "X∨(X∧Y) = X", or_absorption),
    Rule::new("and-absorption", "X∧(X∨Y) = X", and_absorption),
];

pub const COMPLEMENT_ABSORPTION: &[Rule] = &[
    Rule::new("or-complement-absorption", "X∨(¬X∧Y) = X∨Y", or_complement_absorption),
    Rule::new("and-complement-absorption", "X∧(¬X∨Y) = X∧Y", and_complement_absorption),
];

pub const FACTORING: &[Rule] = &[
    Rule::new("or-factoring", "(X∧Y)∨(X∧Z) = X∧(Y∨Z)", or_factoring),
    Rule::new("and-factoring", "(X∨Y)∧(X∨Z) = X∨(Y∧Z)", and_factoring),
];

pub const DISTRIBUTE_AND: &[Rule] = &[Rule::new("distribute-and", "X∧(Y∨Z) = (X∧Y)∨(X∧Z)", distribute_and)];

pub const DISTRIBUTE_OR: &[Rule] = &[Rule::new("distribute-or", "X∨(Y∧Z) = (X∨Y)∧(X∨Z)", distribute_or)];

/// Operands of `expr` as an `outer` chain, each paired with its `inner` operands.
fn terms_with_factors(expr: &Expr, outer: Op, inner: Op) -> (Vec<Rc<Expr>>, Vec<Vec<Rc<Expr>>>) {
    let terms = chain::operands(expr, outer);
    let factors = terms
        .iter()
        .map(|term| chain::unique(chain::operands(term, inner)))
        .collect();
    (terms, factors)
}

/// Drop every term whose factors include all factors of another kept term.
fn absorb(expr: &Expr, outer: Op, inner: Op) -> Option<Expr> {
    if !expr.is_op(outer) {
        return None;
    }
    let (terms, factors) = terms_with_factors(expr, outer, inner);
    let mut removed = vec![false; terms.len()];
    for j in 0..terms.len() {
        for i in 0..terms.len() {
            if i == j || removed[i] {
                continue;
            }
            let absorbs = chain::is_subset(&factors[i], &factors[j]);
            let same = absorbs && chain::is_subset(&factors[j], &factors[i]);
            if absorbs && (!same || i < j) {
                removed[j] = true;
                break;
            }
        }
    }
    if !removed.contains(&true) {
        return None;
    }
    let kept = terms
        .into_iter()
        .zip(removed)
        .filter(|(_, removed)| !removed)
        .map(|(term, _)| term)
        .collect();
    Some(chain::rebuild(outer, kept))
}

fn or_absorption(expr: &Expr) -> Option<Expr> {
    absorb(expr, Op::Or, Op::And)
}

fn and_absorption(expr: &Expr) -> Option<Expr> {
    absorb(expr, Op::And, Op::Or)
}

/// Remove `¬X` from the factors of a term when `X` is itself a term.
fn complement_absorb(expr: &Expr, outer: Op, inner: Op) -> Option<Expr> {
    if !expr.is_op(outer) {
        return None;
    }
    let (mut terms, factors) = terms_with_factors(expr, outer, inner);
    let (j, rest) = terms.iter().enumerate().find_map(|(i, x)| {
        factors.iter().enumerate().find_map(|(j, term_factors)| {
            if i == j || term_factors.len() < 2 || !term_factors.iter().any(|f| f.is_complement_of(x)) {
                return None;
            }
            let rest: Vec<Rc<Expr>> = term_factors
                .iter()
                .filter(|f| !f.is_complement_of(x))
                .cloned()
                .collect();
            Some((j, rest))
        })
    })?;
    terms[j] = Rc::new(chain::rebuild(inner, rest));
    Some(chain::rebuild(outer, terms))
}

fn or_complement_absorption(expr: &Expr) -> Option<Expr> {
    complement_absorb(expr, Op::Or, Op::And)
}

fn and_complement_absorption(expr: &Expr) -> Option<Expr> {
    complement_absorb(expr, Op::And, Op::Or)
}

/// Pull the factor shared by the most terms out of those terms.
fn factor(expr: &Expr, outer: Op, inner: Op) -> Option<Expr> {
    if !expr.is_op(outer) {
        return None;
    }
    let (terms, factors) = terms_with_factors(expr, outer, inner);

    let mut best: Option<(&Rc<Expr>, usize)> = None;
    for candidate in factors.iter().flatten() {
        let count = factors.iter().filter(|fs| fs.contains(candidate)).count();
        if count >= 2 && best.map_or(true, |(_, c)| count > c) {
            best = Some((candidate, count));
        }
    }
    let (common, _) = best?;

    let mut rests = Vec::new();
    let mut others = Vec::new();
    let mut position = None;
    for (index, (term, fs)) in terms.iter().zip(&factors).enumerate() {
        if fs.contains(common) {
            position.get_or_insert(index);
            let rest = fs.iter().filter(|f| *f != common).cloned().collect();
            rests.push(Rc::new(chain::rebuild(inner, rest)));
        } else {
            others.push(Rc::clone(term));
        }
    }
    let factored = Rc::new(Expr::binary(inner, Rc::clone(common), chain::rebuild(outer, rests)));

    // The factored term takes the place of the first term it replaces.
    let position = position.unwrap_or(0).min(others.len());
    others.insert(position, factored);
    Some(chain::rebuild(outer, others))
}

fn or_factoring(expr: &Expr) -> Option<Expr> {
    factor(expr, Op::Or, Op::And)
}

fn and_factoring(expr: &Expr) -> Option<Expr> {
    factor(expr, Op::And, Op::Or)
}

/// `x outer (y inner z)` into `(x outer y) inner (x outer z)`, either side.
fn distribute(expr: &Expr, outer: Op, inner: Op) -> Option<Expr> {
    let Expr::Binary(op, l, r) = expr else {
        return None;
    };
    if *op != outer {
        return None;
    }
    match (&**l, &**r) {
        (_, Expr::Binary(o, y, z)) if *o == inner => Some(Expr::binary(
            inner,
            Expr::binary(outer, Rc::clone(l), Rc::clone(y)),
            Expr::binary(outer, Rc::clone(l), Rc::clone(z)),
        )),
        (Expr::Binary(o, y, z), _) if *o == inner => Some(Expr::binary(
            inner,
            Expr::binary(outer, Rc::clone(y), Rc::clone(r)),
            Expr::binary(outer, Rc::clone(z), Rc::clone(r)),
        )),
        _ => None,
    }
}

fn distribute_and(expr: &Expr) -> Option<Expr> {
    distribute(expr, Op::And, Op::Or)
}

fn distribute_or(expr: &Expr) -> Option<Expr> {
    distribute(expr, Op::Or, Op::And)
}
