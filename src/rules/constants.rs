//! Identity and domination laws for AND/OR, and negated constants.
//!
//! Derived operators with constant operands live in [`derived`][super::derived].

use crate::ast::{Expr, Op};

use super::Rule;

pub const RULES: &[Rule] = &[
    Rule::new("and-identity", "X∧1 = X", and_identity),
    Rule::new("and-annihilator", "X∧0 = 0", and_annihilator),
    Rule::new("or-identity", "X∨0 = X", or_identity),
    Rule::new("or-annihilator", "X∨1 = 1", or_annihilator),
    Rule::new("not-constant", "¬1 = 0, ¬0 = 1", not_constant),
];

/// The operand next to constant `value` under `op`, if either side is that constant.
fn other_side(expr: &Expr, op: Op, value: bool) -> Option<&Expr> {
    match expr {
        Expr::Binary(o, l, r) if *o == op => {
            if l.as_const() == Some(value) {
                Some(&**r)
            } else if r.as_const() == Some(value) {
                Some(&**l)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn and_identity(expr: &Expr) -> Option<Expr> {
    other_side(expr, Op::And, true).cloned()
}

fn and_annihilator(expr: &Expr) -> Option<Expr> {
    other_side(expr, Op::And, false).map(|_| Expr::zero())
}

fn or_identity(expr: &Expr) -> Option<Expr> {
    other_side(expr, Op::Or, false).cloned()
}

fn or_annihilator(expr: &Expr) -> Option<Expr> {
    other_side(expr, Op::Or, true).map(|_| Expr::one())
}

fn not_constant(expr: &Expr) -> Option<Expr> {
    match expr {
        Expr::Not(inner) => inner.as_const().map(|value| Expr::constant(!value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_identity_both_sides() {
        let a = Expr::var("A");
        assert_eq!(and_identity(&Expr::and(Expr::one(), a.clone())), Some(a.clone()));
        assert_eq!(and_identity(&Expr::and(a.clone(), Expr::one())), Some(a.clone()));
        assert_eq!(or_identity(&Expr::or(Expr::zero(), a.clone())), Some(a.clone()));
        assert_eq!(or_identity(&Expr::or(a.clone(), Expr::one())), None);
    }

    #[test]
    fn test_annihilators() {
        let a = Expr::var("A");
        assert_eq!(and_annihilator(&Expr::and(a.clone(), Expr::zero())), Some(Expr::zero()));
        assert_eq!(or_annihilator(&Expr::or(Expr::one(), a.clone())), Some(Expr::one()));
        assert_eq!(and_annihilator(&Expr::or(a, Expr::zero())), None);
    }

    #[test]
    fn test_not_constant() {
        assert_eq!(not_constant(&Expr::not(Expr::one())), Some(Expr::zero()));
        assert_eq!(not_constant(&Expr::not(Expr::zero())), Some(Expr::one()));
        assert_eq!(not_constant(&Expr::not(Expr::var("A"))), None);
    }
}
