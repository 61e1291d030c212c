//! Redundancy: `(X∧Y)∨(X∧¬Y) = X` and its dual `(X∨Y)∧(X∨¬Y) = X`.
//!
//! Terms are compared as operand sets, so `A∧B∧C` and `C∧¬B∧A` merge into `A∧C`.

use std::rc::Rc;

use crate::ast::{Expr, Op};

use super::chain;
use super::Rule;

pub const RULES: &[Rule] = &[
    Rule::new("or-consensus", "(X∧Y)∨(X∧¬Y) = X", or_consensus),
    Rule::new("and-consensus", "(X∨Y)∧(X∨¬Y) = X", and_consensus),
];

/// Merge the first mergeable pair of `outer` operands, viewing each as an `inner` chain.
fn merge_first_pair(expr: &Expr, outer: Op, inner: Op) -> Option<Expr> {
    if !expr.is_op(outer) {
        return None;
    }
    let mut terms = chain::operands(expr, outer);
    let factors: Vec<Vec<Rc<Expr>>> = terms.iter().map(|term| chain::operands(term, inner)).collect();
    for i in 0..terms.len() {
        for j in (i + 1)..terms.len() {
            if let Some(merged) = chain::merge_complementary(&factors[i], &factors[j]) {
                terms[i] = Rc::new(chain::rebuild(inner, merged));
                terms.remove(j);
                return Some(chain::rebuild(outer, terms));
            }
        }
    }
    None
}

fn or_consensus(expr: &Expr) -> Option<Expr> {
    merge_first_pair(expr, Op::Or, Op::And)
}

fn and_consensus(expr: &Expr) -> Option<Expr> {
    merge_first_pair(expr, Op::And, Op::Or)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::parse::parse;
    use crate::render::to_boolean_string;

    fn rewrite(rule: fn(&Expr) -> Option<Expr>, input: &str) -> Option<String> {
        rule(&parse(input).unwrap()).map(|e| to_boolean_string(&e))
    }

    #[test]
    fn test_or_consensus() {
        assert_eq!(rewrite(or_consensus, "A*B+A*!B"), Some("A".to_string()));
        assert_eq!(rewrite(or_consensus, "A*B*C+C*!B*A"), Some("A*C".to_string()));
        assert_eq!(rewrite(or_consensus, "D+A*B+A*!B"), Some("D+A".to_string()));
        assert_eq!(rewrite(or_consensus, "A*B+!A*!B"), None);
    }

    #[test]
    fn test_single_literal_terms() {
        assert_eq!(rewrite(or_consensus, "A+!A"), Some("1".to_string()));
    }

    #[test]
    fn test_and_consensus() {
        assert_eq!(rewrite(and_consensus, "(A+B)*(A+!B)"), Some("A".to_string()));
        assert_eq!(rewrite(and_consensus, "(A+B)*(C+!B)"), None);
    }
}
