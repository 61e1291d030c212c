//! Boolean expression trees.
//!
//! An [`Expr`] is an immutable value: every transformation (parsing, rule
//! application, minimization) builds a new tree. Children are reference-counted,
//! so a rewritten tree shares every untouched subtree with its predecessor.
//!
//! Equality is structural (derived), independent of any string rendering.

use std::collections::BTreeSet;
use std::rc::Rc;

/// Binary connectives.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Op {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
}

impl Op {
    pub const ALL: [Op; 6] = [Op::And, Op::Or, Op::Xor, Op::Nand, Op::Nor, Op::Xnor];

    /// Apply the connective to two values.
    pub fn apply(self, a: bool, b: bool) -> bool {
        match self {
            Op::And => a && b,
            Op::Or => a || b,
            Op::Xor => a ^ b,
            Op::Nand => !(a && b),
            Op::Nor => !(a || b),
            Op::Xnor => a == b,
        }
    }

    /// Binding strength: higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Op::Or | Op::Nor => 1,
            Op::Xor | Op::Xnor => 2,
            Op::And | Op::Nand => 3,
        }
    }

    /// The connective computing the complement of this one.
    pub fn negated(self) -> Op {
        match self {
            Op::And => Op::Nand,
            Op::Or => Op::Nor,
            Op::Xor => Op::Xnor,
            Op::Nand => Op::And,
            Op::Nor => Op::Or,
            Op::Xnor => Op::Xor,
        }
    }

    /// Whether `(a op b) op c == a op (b op c)`.
    pub fn is_associative(self) -> bool {
        matches!(self, Op::And | Op::Or | Op::Xor | Op::Xnor)
    }

    /// ASCII operator character.
    pub fn symbol(self) -> char {
        match self {
            Op::And => '*',
            Op::Or => '+',
            Op::Xor => '^',
            Op::Nand => '@',
            Op::Nor => '#',
            Op::Xnor => '=',
        }
    }

    /// LaTeX operator command.
    pub fn latex(self) -> &'static str {
        match self {
            Op::And => "\\land",
            Op::Or => "\\lor",
            Op::Xor => "\\oplus",
            Op::Nand => "\\uparrow",
            Op::Nor => "\\downarrow",
            Op::Xnor => "\\odot",
        }
    }
}

/// A Boolean expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Named variable.
    Var(Rc<str>),
    /// Constant `0` or `1`.
    Const(bool),
    /// Negation.
    Not(Rc<Expr>),
    /// Binary connective with both operands.
    Binary(Op, Rc<Expr>, Rc<Expr>),
}

impl Expr {
    pub fn var(name: &str) -> Self {
        Expr::Var(Rc::from(name))
    }

    pub fn constant(value: bool) -> Self {
        Expr::Const(value)
    }

    pub fn zero() -> Self {
        Expr::Const(false)
    }

    pub fn one() -> Self {
        Expr::Const(true)
    }

    pub fn not(operand: impl Into<Rc<Expr>>) -> Self {
        Expr::Not(operand.into())
    }

    pub fn binary(op: Op, left: impl Into<Rc<Expr>>, right: impl Into<Rc<Expr>>) -> Self {
        Expr::Binary(op, left.into(), right.into())
    }

    pub fn and(left: impl Into<Rc<Expr>>, right: impl Into<Rc<Expr>>) -> Self {
        Expr::binary(Op::And, left, right)
    }

    pub fn or(left: impl Into<Rc<Expr>>, right: impl Into<Rc<Expr>>) -> Self {
        Expr::binary(Op::Or, left, right)
    }

    pub fn xor(left: impl Into<Rc<Expr>>, right: impl Into<Rc<Expr>>) -> Self {
        Expr::binary(Op::Xor, left, right)
    }

    pub fn nand(left: impl Into<Rc<Expr>>, right: impl Into<Rc<Expr>>) -> Self {
        Expr::binary(Op::Nand, left, right)
    }

    pub fn nor(left: impl Into<Rc<Expr>>, right: impl Into<Rc<Expr>>) -> Self {
        Expr::binary(Op::Nor, left, right)
    }

    pub fn xnor(left: impl Into<Rc<Expr>>, right: impl Into<Rc<Expr>>) -> Self {
        Expr::binary(Op::Xnor, left, right)
    }

    /// Left-folded chain `a op b op c ...`; `None` for an empty iterator.
    pub fn chain<I>(op: Op, operands: I) -> Option<Expr>
    where
        I: IntoIterator,
        I::Item: Into<Rc<Expr>>,
    {
        let mut iter = operands.into_iter();
        let first: Rc<Expr> = iter.next()?.into();
        let folded = iter.fold(first, |acc, next| Rc::new(Expr::Binary(op, acc, next.into())));
        Some(Rc::unwrap_or_clone(folded))
    }

    /// Conjunction of all operands; `1` when empty.
    pub fn and_all<I>(operands: I) -> Expr
    where
        I: IntoIterator,
        I::Item: Into<Rc<Expr>>,
    {
        Expr::chain(Op::And, operands).unwrap_or_else(Expr::one)
    }

    /// Disjunction of all operands; `0` when empty.
    pub fn or_all<I>(operands: I) -> Expr
    where
        I: IntoIterator,
        I::Item: Into<Rc<Expr>>,
    {
        Expr::chain(Op::Or, operands).unwrap_or_else(Expr::zero)
    }

    /// A variable or its direct negation.
    pub fn literal(name: &str, positive: bool) -> Self {
        if positive {
            Expr::var(name)
        } else {
            Expr::not(Expr::var(name))
        }
    }
}

impl Expr {
    pub fn as_const(&self) -> Option<bool> {
        match self {
            Expr::Const(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_const(&self) -> bool {
        matches!(self, Expr::Const(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Expr::Var(_) | Expr::Const(_))
    }

    pub fn is_literal(&self) -> bool {
        match self {
            Expr::Var(_) => true,
            Expr::Not(inner) => matches!(**inner, Expr::Var(_)),
            _ => false,
        }
    }

    /// Root connective, if this is a binary node.
    pub fn op(&self) -> Option<Op> {
        match self {
            Expr::Binary(op, _, _) => Some(*op),
            _ => None,
        }
    }

    pub fn is_op(&self, op: Op) -> bool {
        self.op() == Some(op)
    }

    /// Whether `self` and `other` are syntactic complements (`X` and `¬X`, or `0` and `1`).
    pub fn is_complement_of(&self, other: &Expr) -> bool {
        match (self, other) {
            (Expr::Const(a), Expr::Const(b)) => a != b,
            (Expr::Not(inner), _) if **inner == *other => true,
            (_, Expr::Not(inner)) if **inner == *self => true,
            _ => false,
        }
    }

    /// The complement of this expression, stripping a leading negation instead of
    /// stacking a second one.
    pub fn complement(&self) -> Expr {
        match self {
            Expr::Const(value) => Expr::Const(!value),
            Expr::Not(inner) => (**inner).clone(),
            _ => Expr::not(self.clone()),
        }
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Var(_) | Expr::Const(_) => 1,
            Expr::Not(inner) => 1 + inner.node_count(),
            Expr::Binary(_, l, r) => 1 + l.node_count() + r.node_count(),
        }
    }

    /// Whether the tree has more than `limit` nodes.
    ///
    /// Stops counting once the limit is passed, so the cost is bounded by
    /// `limit` even on trees whose shared subtrees unfold exponentially.
    pub fn exceeds_size(&self, limit: usize) -> bool {
        fn spend(expr: &Expr, budget: &mut usize) -> bool {
            if *budget == 0 {
                return true;
            }
            *budget -= 1;
            match expr {
                Expr::Var(_) | Expr::Const(_) => false,
                Expr::Not(inner) => spend(inner, budget),
                Expr::Binary(_, l, r) => spend(l, budget) || spend(r, budget),
            }
        }
        let mut budget = limit;
        spend(self, &mut budget)
    }

    /// Depth of the tree (0 for leaves).
    pub fn depth(&self) -> usize {
        match self {
            Expr::Var(_) | Expr::Const(_) => 0,
            Expr::Not(inner) => 1 + inner.depth(),
            Expr::Binary(_, l, r) => 1 + l.depth().max(r.depth()),
        }
    }

    /// Unique variable names in sorted order.
    pub fn variables(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names.into_iter().map(|name| name.to_string()).collect()
    }

    fn collect_variables<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            Expr::Var(name) => {
                names.insert(name.as_ref());
            }
            Expr::Const(_) => {}
            Expr::Not(inner) => inner.collect_variables(names),
            Expr::Binary(_, l, r) => {
                l.collect_variables(names);
                r.collect_variables(names);
            }
        }
    }
}
