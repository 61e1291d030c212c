//! Evaluation of expressions under variable assignments.
//!
//! Variables missing from an assignment evaluate to `false`.
//!
//! Minterm indices encode an assignment of an ordered variable list with the
//! first variable as the most significant bit: for `[A, B, C]`, minterm `6`
//! (`110`) is `A=1, B=1, C=0`.
//!
//! Functions that enumerate every assignment refuse more than
//! [`MAX_VARIABLES`] variables with [`EvalError::TooManyVariables`].

use std::collections::HashMap;
use std::ops::Range;

use serde::Serialize;

use crate::ast::{Expr, Op};
use crate::error::EvalError;
use crate::node::{ExprNode, NodeKind};
use crate::utils::msb_bit;

/// Variable assignment.
pub type Assignment = HashMap<String, bool>;

/// Largest variable count the `u32` minterm codec can enumerate.
pub const MAX_VARIABLES: usize = 31;

/// Fail when `count` variables are more than `limit`.
pub fn check_variable_count(count: usize, limit: usize) -> Result<(), EvalError> {
    if count > limit {
        return Err(EvalError::TooManyVariables { count, limit });
    }
    Ok(())
}

/// Every minterm index over `count` variables.
fn assignments(count: usize) -> Result<Range<u32>, EvalError> {
    check_variable_count(count, MAX_VARIABLES)?;
    Ok(0..1u32 << count)
}

/// Evaluate `expr` under `assignment`.
pub fn evaluate(expr: &Expr, assignment: &Assignment) -> bool {
    evaluate_with(expr, &|name| assignment.get(name).copied().unwrap_or(false))
}

/// Evaluate `expr`, resolving variables through `lookup`.
pub fn evaluate_with<F>(expr: &Expr, lookup: &F) -> bool
where
    F: Fn(&str) -> bool,
{
    match expr {
        Expr::Var(name) => lookup(name),
        Expr::Const(value) => *value,
        Expr::Not(inner) => !evaluate_with(inner, lookup),
        Expr::Binary(op, l, r) => {
            let a = evaluate_with(l, lookup);
            // Short-circuit where the result is already decided.
            match (op, a) {
                (Op::And, false) => false,
                (Op::Or, true) => true,
                (Op::Nand, false) => true,
                (Op::Nor, true) => false,
                _ => op.apply(a, evaluate_with(r, lookup)),
            }
        }
    }
}

/// Evaluate `expr` on the assignment encoded by `minterm` over `variables`.
pub fn evaluate_minterm(expr: &Expr, variables: &[String], minterm: u32) -> bool {
    let n = variables.len();
    evaluate_with(expr, &|name| match variables.iter().position(|v| v == name) {
        Some(i) => msb_bit(minterm, n, i),
        None => false,
    })
}

/// Decode `minterm` over `variables` into an assignment.
pub fn assignment_from_minterm(variables: &[String], minterm: u32) -> Assignment {
    let n = variables.len();
    variables
        .iter()
        .enumerate()
        .map(|(i, v)| (v.clone(), msb_bit(minterm, n, i)))
        .collect()
}

/// All minterms (in increasing order) on which `expr` is true.
pub fn minterms(expr: &Expr, variables: &[String]) -> Result<Vec<u32>, EvalError> {
    Ok(assignments(variables.len())?
        .filter(|&m| evaluate_minterm(expr, variables, m))
        .collect())
}

/// Whether `a` and `b` agree on every assignment of their combined variables.
///
/// Enumerates `2^n` assignments.
pub fn equivalent(a: &Expr, b: &Expr) -> Result<bool, EvalError> {
    let variables = union_variables(a, b);
    Ok(assignments(variables.len())?.all(|m| evaluate_minterm(a, &variables, m) == evaluate_minterm(b, &variables, m)))
}

/// Sorted union of the variables of `a` and `b`.
pub fn union_variables(a: &Expr, b: &Expr) -> Vec<String> {
    let mut variables = a.variables();
    variables.extend(b.variables());
    variables.sort();
    variables.dedup();
    variables
}

/// Serialized assignment restricted to `variables`, e.g. `A=1,B=0`.
///
/// Used as part of evaluation cache keys.
pub fn assignment_key(variables: &[String], assignment: &Assignment) -> String {
    let mut key = String::with_capacity(variables.len() * 4);
    for (i, v) in variables.iter().enumerate() {
        if i > 0 {
            key.push(',');
        }
        key.push_str(v);
        key.push('=');
        key.push(if assignment.get(v).copied().unwrap_or(false) { '1' } else { '0' });
    }
    key
}

/// Evaluate a loosely-typed node tree, failing on missing children.
pub fn evaluate_node(node: &ExprNode, assignment: &Assignment) -> Result<bool, EvalError> {
    match node.kind {
        NodeKind::Variable => {
            let name = node.name.as_deref().ok_or_else(|| node.malformed("name"))?;
            Ok(assignment.get(name).copied().unwrap_or(false))
        }
        NodeKind::Constant => node.value.ok_or_else(|| node.malformed("value")),
        NodeKind::Not => {
            let operand = node.left.as_deref().ok_or_else(|| node.malformed("left"))?;
            Ok(!evaluate_node(operand, assignment)?)
        }
        kind => {
            let op = kind.op().ok_or_else(|| node.malformed("operator"))?;
            let left = node.left.as_deref().ok_or_else(|| node.malformed("left"))?;
            let right = node.right.as_deref().ok_or_else(|| node.malformed("right"))?;
            Ok(op.apply(evaluate_node(left, assignment)?, evaluate_node(right, assignment)?))
        }
    }
}

/// One row of a truth table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruthRow {
    pub minterm: u32,
    pub inputs: Vec<bool>,
    pub output: bool,
}

/// Complete truth table of an expression over its sorted variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruthTable {
    pub variables: Vec<String>,
    pub rows: Vec<TruthRow>,
}

impl TruthTable {
    /// Tabulate `expr` over `variables`, one row per minterm in increasing order.
    pub fn new(expr: &Expr, variables: Vec<String>) -> Result<Self, EvalError> {
        let n = variables.len();
        let rows = assignments(n)?
            .map(|minterm| TruthRow {
                minterm,
                inputs: (0..n).map(|i| msb_bit(minterm, n, i)).collect(),
                output: evaluate_minterm(expr, &variables, minterm),
            })
            .collect();
        Ok(Self { variables, rows })
    }

    /// Minterms whose row evaluates to `true`.
    pub fn minterms(&self) -> Vec<u32> {
        self.rows.iter().filter(|row| row.output).map(|row| row.minterm).collect()
    }

    /// Whether every row is `true`.
    pub fn is_tautology(&self) -> bool {
        self.rows.iter().all(|row| row.output)
    }

    /// Whether some row is `true`.
    pub fn is_satisfiable(&self) -> bool {
        self.rows.iter().any(|row| row.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn assign(pairs: &[(&str, bool)]) -> Assignment {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_evaluate_operators() {
        let a = Expr::var("A");
        let b = Expr::var("B");
        for op in Op::ALL {
            let e = Expr::binary(op, a.clone(), b.clone());
            for (x, y) in [(false, false), (false, true), (true, false), (true, true)] {
                let env = assign(&[("A", x), ("B", y)]);
                assert_eq!(evaluate(&e, &env), op.apply(x, y), "{} on {} {}", op, x, y);
            }
        }
    }

    #[test]
    fn test_evaluate_missing_variable_is_false() {
        let e = Expr::or(Expr::var("A"), Expr::not(Expr::var("Z")));
        assert!(evaluate(&e, &Assignment::new()));
        assert!(!evaluate(&Expr::var("Z"), &assign(&[("A", true)])));
    }

    #[test]
    fn test_minterm_encoding() {
        let vars: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        let env = assignment_from_minterm(&vars, 6);
        assert_eq!(env, assign(&[("A", true), ("B", true), ("C", false)]));

        let e = Expr::and(Expr::var("A"), Expr::not(Expr::var("C")));
        assert_eq!(minterms(&e, &vars).unwrap(), vec![4, 6]);
    }

    #[test]
    fn test_assignment_key() {
        let vars = vec!["A".to_string(), "B".to_string()];
        let env = assign(&[("B", true), ("Q", true)]);
        assert_eq!(assignment_key(&vars, &env), "A=0,B=1");
    }

    #[test]
    fn test_evaluate_node_malformed() {
        let node = ExprNode {
            kind: NodeKind::And,
            name: None,
            value: None,
            left: Some(Box::new(ExprNode::variable("A"))),
            right: None,
        };
        let err = evaluate_node(&node, &assign(&[("A", true)])).unwrap_err();
        assert_eq!(
            err,
            EvalError::MalformedExpression {
                kind: "AND".to_string(),
                missing: "right",
            }
        );
    }

    #[test]
    fn test_evaluate_node_well_formed() {
        let node = ExprNode::from(&Expr::xor(Expr::var("A"), Expr::not(Expr::var("B"))));
        assert!(evaluate_node(&node, &assign(&[("A", false), ("B", false)])).unwrap());
        assert!(!evaluate_node(&node, &assign(&[("A", true), ("B", false)])).unwrap());
    }

    #[test]
    fn test_truth_table() {
        let e = Expr::xor(Expr::var("A"), Expr::var("B"));
        let table = TruthTable::new(&e, vec!["A".to_string(), "B".to_string()]).unwrap();
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[2].inputs, vec![true, false]);
        assert_eq!(table.minterms(), vec![1, 2]);
        assert!(table.is_satisfiable());
        assert!(!table.is_tautology());

        let constant = TruthTable::new(&Expr::one(), Vec::new()).unwrap();
        assert_eq!(constant.rows.len(), 1);
        assert!(constant.is_tautology());
    }

    #[test]
    fn test_equivalent() {
        let a = Expr::not(Expr::and(Expr::var("A"), Expr::var("B")));
        let b = Expr::or(Expr::not(Expr::var("A")), Expr::not(Expr::var("B")));
        assert!(equivalent(&a, &b).unwrap());
        assert!(!equivalent(&a, &Expr::not(Expr::var("A"))).unwrap());
        // Variables absent from one side are still enumerated.
        let ta = Expr::or(Expr::var("A"), Expr::not(Expr::var("A")));
        assert!(equivalent(&ta, &Expr::one()).unwrap());
        assert_eq!(union_variables(&a, &Expr::var("C")), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_wide_expressions_are_refused() {
        let vars: Vec<String> = (0..40).map(|i| format!("x{}", i)).collect();
        let wide = Expr::or_all(vars.iter().map(|v| Expr::var(v)));
        let refused = EvalError::TooManyVariables { count: 40, limit: MAX_VARIABLES };
        assert_eq!(minterms(&wide, &vars), Err(refused.clone()));
        assert_eq!(equivalent(&wide, &wide), Err(refused.clone()));
        assert_eq!(TruthTable::new(&wide, vars.clone()), Err(refused));

        // Single assignments stay cheap at any width.
        assert!(evaluate_minterm(&wide, &vars, 1));
        assert!(!evaluate_minterm(&wide, &vars, 0));
        assert!(assignment_from_minterm(&vars, 1)["x39"]);
        assert!(!assignment_from_minterm(&vars, 1)["x0"]);
    }
}
