//! Contradiction and tautology across flattened AND/OR chains.
//!
//! `A∧B∧¬A` is a contradiction even though `A` and `¬A` are not siblings. The
//! check is local to one chain: complementary operands hidden below a different
//! connective are left to the other laws.

use crate::ast::{Expr, Op};

use super::chain;
use super::Rule;

pub const RULES: &[Rule] = &[
    Rule::new("contradiction", "X∧¬X = 0", contradiction),
    Rule::new("tautology", "X∨¬X = 1", tautology),
];

fn collapse(expr: &Expr, op: Op, value: bool) -> Option<Expr> {
    if expr.is_op(op) && chain::has_complementary_pair(&chain::operands(expr, op)) {
        Some(Expr::constant(value))
    } else {
        None
    }
}

fn contradiction(expr: &Expr) -> Option<Expr> {
    collapse(expr, Op::And, false)
}

fn tautology(expr: &Expr) -> Option<Expr> {
    collapse(expr, Op::Or, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::parse::parse;

    #[test]
    fn test_contradiction() {
        assert_eq!(contradiction(&parse("A*!A").unwrap()), Some(Expr::zero()));
        assert_eq!(contradiction(&parse("!(B+C)*A*(B+C)").unwrap()), Some(Expr::zero()));
        assert_eq!(contradiction(&parse("A*!B").unwrap()), None);
    }

    #[test]
    fn test_tautology() {
        assert_eq!(tautology(&parse("A+B+!A").unwrap()), Some(Expr::one()));
        assert_eq!(tautology(&parse("A*!A").unwrap()), None);
    }

    #[test]
    fn test_chain_local() {
        // The complementary pair sits inside different OR terms.
        assert_eq!(contradiction(&parse("(A+B)*(!A+C)").unwrap()), None);
    }
}
