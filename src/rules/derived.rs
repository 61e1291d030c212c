//! Laws of the derived connectives XOR, XNOR, NAND and NOR.
//!
//! With one operand fixed (a constant, the other operand, or its complement) a
//! binary connective is a unary function of the remaining operand: a constant,
//! the identity or negation. The identities below read that function off the
//! connective's truth table instead of listing every case.

use std::rc::Rc;

use crate::ast::{Expr, Op};

use super::Rule;

pub const IDENTITIES: &[Rule] = &[
    Rule::new("derived-constant", "X⊕0 = X, X⊕1 = ¬X, X↑0 = 1, X↓1 = 0, ...", with_constant),
    Rule::new("derived-self", "X⊕X = 0, X⊙X = 1, X↑X = ¬X, X↓X = ¬X", with_self),
    Rule::new("derived-complement", "X⊕¬X = 1, X⊙¬X = 0, X↑¬X = 1, X↓¬X = 0", with_complement),
    Rule::new("parity-negated-operands", "¬X⊕¬Y = X⊕Y, ¬X⊙¬Y = X⊙Y", parity_negated_operands),
];

pub const NEGATED_PARITY: &[Rule] = &[
    Rule::new("not-xor", "¬(X⊕Y) = X⊙Y", not_xor),
    Rule::new("not-xnor", "¬(X⊙Y) = X⊕Y", not_xnor),
];

pub const EXPANSIONS: &[Rule] = &[
    Rule::new("expand-xor", "X⊕Y = (X∧¬Y)∨(¬X∧Y)", expand_xor),
    Rule::new("expand-xnor", "X⊙Y = (X∧Y)∨(¬X∧¬Y)", expand_xnor),
    Rule::new("expand-nand", "X↑Y = ¬X∨¬Y", expand_nand),
    Rule::new("expand-nor", "X↓Y = ¬X∧¬Y", expand_nor),
];

fn is_derived(op: Op) -> bool {
    matches!(op, Op::Xor | Op::Xnor | Op::Nand | Op::Nor)
}

/// The unary function with values `at_zero` and `at_one`, applied to `x`.
fn unary(at_zero: bool, at_one: bool, x: &Expr) -> Expr {
    match (at_zero, at_one) {
        (false, true) => x.clone(),
        (true, false) => x.complement(),
        (value, _) => Expr::constant(value),
    }
}

fn with_constant(expr: &Expr) -> Option<Expr> {
    let Expr::Binary(op, l, r) = expr else {
        return None;
    };
    if !is_derived(*op) {
        return None;
    }
    let (c, x) = match (l.as_const(), r.as_const()) {
        (Some(c), _) => (c, r),
        (None, Some(c)) => (c, l),
        (None, None) => return None,
    };
    Some(unary(op.apply(false, c), op.apply(true, c), x))
}

fn with_self(expr: &Expr) -> Option<Expr> {
    match expr {
        Expr::Binary(op, l, r) if is_derived(*op) && l == r => {
            Some(unary(op.apply(false, false), op.apply(true, true), l))
        }
        _ => None,
    }
}

fn with_complement(expr: &Expr) -> Option<Expr> {
    match expr {
        Expr::Binary(op, l, r) if is_derived(*op) && l.is_complement_of(r) => {
            // Every connective here is symmetric, so `x op ¬x` does not depend on `x`.
            Some(Expr::constant(op.apply(false, true)))
        }
        _ => None,
    }
}

fn parity_negated_operands(expr: &Expr) -> Option<Expr> {
    match expr {
        Expr::Binary(op @ (Op::Xor | Op::Xnor), l, r) => match (&**l, &**r) {
            (Expr::Not(a), Expr::Not(b)) => Some(Expr::binary(*op, Rc::clone(a), Rc::clone(b))),
            _ => None,
        },
        _ => None,
    }
}

fn negated_parity(expr: &Expr, op: Op) -> Option<Expr> {
    match expr {
        Expr::Not(inner) => match &**inner {
            Expr::Binary(o, l, r) if *o == op => Some(Expr::binary(op.negated(), Rc::clone(l), Rc::clone(r))),
            _ => None,
        },
        _ => None,
    }
}

fn not_xor(expr: &Expr) -> Option<Expr> {
    negated_parity(expr, Op::Xor)
}

fn not_xnor(expr: &Expr) -> Option<Expr> {
    negated_parity(expr, Op::Xnor)
}

fn operands_of(expr: &Expr, op: Op) -> Option<(&Expr, &Expr)> {
    match expr {
        Expr::Binary(o, l, r) if *o == op => Some((&**l, &**r)),
        _ => None,
    }
}

fn expand_xor(expr: &Expr) -> Option<Expr> {
    let (x, y) = operands_of(expr, Op::Xor)?;
    Some(Expr::or(
        Expr::and(x.clone(), y.complement()),
        Expr::and(x.complement(), y.clone()),
    ))
}

fn expand_xnor(expr: &Expr) -> Option<Expr> {
    let (x, y) = operands_of(expr, Op::Xnor)?;
    Some(Expr::or(
        Expr::and(x.clone(), y.clone()),
        Expr::and(x.complement(), y.complement()),
    ))
}

fn expand_nand(expr: &Expr) -> Option<Expr> {
    let (x, y) = operands_of(expr, Op::Nand)?;
    Some(Expr::or(x.complement(), y.complement()))
}

fn expand_nor(expr: &Expr) -> Option<Expr> {
    let (x, y) = operands_of(expr, Op::Nor)?;
    Some(Expr::and(x.complement(), y.complement()))
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
    fn test_constant_operand() {
        assert_eq!(rewrite(with_constant, "A^0"), Some("A".to_string()));
        assert_eq!(rewrite(with_constant, "1^A"), Some("!A".to_string()));
        assert_eq!(rewrite(with_constant, "A=1"), Some("A".to_string()));
        assert_eq!(rewrite(with_constant, "A=0"), Some("!A".to_string()));
        assert_eq!(rewrite(with_constant, "A@0"), Some("1".to_string()));
        assert_eq!(rewrite(with_constant, "A@1"), Some("!A".to_string()));
        assert_eq!(rewrite(with_constant, "A#1"), Some("0".to_string()));
        assert_eq!(rewrite(with_constant, "!A#0"), Some("A".to_string()));
        assert_eq!(rewrite(with_constant, "A*1"), None);
    }

    #[test]
    fn test_self_and_complement() {
        assert_eq!(rewrite(with_self, "A^A"), Some("0".to_string()));
        assert_eq!(rewrite(with_self, "A=A"), Some("1".to_string()));
        assert_eq!(rewrite(with_self, "A@A"), Some("!A".to_string()));
        assert_eq!(rewrite(with_self, "B#B"), Some("!B".to_string()));
        assert_eq!(rewrite(with_complement, "A^!A"), Some("1".to_string()));
        assert_eq!(rewrite(with_complement, "!A=A"), Some("0".to_string()));
        assert_eq!(rewrite(with_complement, "A@!A"), Some("1".to_string()));
        assert_eq!(rewrite(with_complement, "A#!A"), Some("0".to_string()));
    }

    #[test]
    fn test_parity_negations() {
        assert_eq!(rewrite(parity_negated_operands, "!A^!B"), Some("A^B".to_string()));
        assert_eq!(rewrite(not_xor, "!(A^B)"), Some("A=B".to_string()));
        assert_eq!(rewrite(not_xnor, "!(A=B)"), Some("A^B".to_string()));
    }

    #[test]
    fn test_expansions() {
        assert_eq!(rewrite(expand_xor, "A^B"), Some("A*!B+!A*B".to_string()));
        assert_eq!(rewrite(expand_xnor, "A=!B"), Some("A*!B+!A*B".to_string()));
        assert_eq!(rewrite(expand_nand, "A@B"), Some("!A+!B".to_string()));
        assert_eq!(rewrite(expand_nor, "A#!B"), Some("!A*B".to_string()));
    }
}
