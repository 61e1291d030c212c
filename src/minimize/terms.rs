//! Term combination on an OR of AND-terms.
//!
//! Each term is viewed as a set of factors. Contradictory terms are dropped,
//! terms containing another term's factors are absorbed, and pairs that differ
//! only by one complemented factor are merged (`XY + X¬Y = X`), until nothing
//! changes. Factors need not be literals, so this also works on expressions
//! that are not fully expanded.

use std::rc::Rc;

use log::debug;

use crate::ast::{Expr, Op};
use crate::rules::chain;

/// Factor sets of the OR-terms of `expr`.
///
/// `None` if some term is a tautology (every assignment satisfies it).
fn factor_sets(expr: &Expr) -> Option<Vec<Vec<Rc<Expr>>>> {
    let mut terms = Vec::new();
    for term in chain::operands(expr, Op::Or) {
        let factors: Vec<Rc<Expr>> = chain::unique(chain::operands(&term, Op::And))
            .into_iter()
            .filter(|f| f.as_const() != Some(true))
            .collect();
        if factors.iter().any(|f| f.as_const() == Some(false)) || chain::has_complementary_pair(&factors) {
            continue;
        }
        if factors.is_empty() {
            return None;
        }
        terms.push(factors);
    }
    Some(terms)
}

/// Remove terms whose factors include all factors of another term.
fn absorb(terms: &mut Vec<Vec<Rc<Expr>>>) -> bool {
    for j in 0..terms.len() {
        for i in 0..terms.len() {
            if i == j {
                continue;
            }
            let absorbs = chain::is_subset(&terms[i], &terms[j]);
            if absorbs && (terms[i].len() < terms[j].len() || i < j) {
                debug!("absorb term {} into term {}", j, i);
                terms.remove(j);
                return true;
            }
        }
    }
    false
}

/// Merge the first pair of terms differing by exactly one complemented factor.
fn merge(terms: &mut Vec<Vec<Rc<Expr>>>) -> bool {
    for i in 0..terms.len() {
        for j in (i + 1)..terms.len() {
            if let Some(merged) = chain::merge_complementary(&terms[i], &terms[j]) {
                debug!("merge terms {} and {}", i, j);
                terms[i] = merged;
                terms.remove(j);
                return true;
            }
        }
    }
    false
}

/// Combine the OR-terms of `expr` until no absorption or merge applies.
pub fn combine(expr: &Expr) -> Expr {
    let Some(mut terms) = factor_sets(expr) else {
        return Expr::one();
    };
    loop {
        if terms.iter().any(|t| t.is_empty()) {
            return Expr::one();
        }
        if !absorb(&mut terms) && !merge(&mut terms) {
            break;
        }
    }
    Expr::or_all(terms.into_iter().map(|factors| chain::rebuild(Op::And, factors)))
}
