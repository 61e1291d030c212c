//! Loosely-typed expression nodes for interchange.
//!
//! Outside the typed [`Expr`], an expression travels as a tree of
//! `{type, name?, value?, left?, right?}` records (e.g. JSON handed over by a
//! UI layer). Such a tree may be malformed: a binary node without `right`, a
//! negation without `left`. Converting to [`Expr`] rejects those with
//! [`EvalError::MalformedExpression`].

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::ast::{Expr, Op};
use crate::error::EvalError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeKind {
    Variable,
    Constant,
    Not,
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
}

impl NodeKind {
    /// Binary connective for this kind, if any.
    pub fn op(self) -> Option<Op> {
        match self {
            NodeKind::And => Some(Op::And),
            NodeKind::Or => Some(Op::Or),
            NodeKind::Xor => Some(Op::Xor),
            NodeKind::Nand => Some(Op::Nand),
            NodeKind::Nor => Some(Op::Nor),
            NodeKind::Xnor => Some(Op::Xnor),
            NodeKind::Variable | NodeKind::Constant | NodeKind::Not => None,
        }
    }

    fn of_op(op: Op) -> Self {
        match op {
            Op::And => NodeKind::And,
            Op::Or => NodeKind::Or,
            Op::Xor => NodeKind::Xor,
            Op::Nand => NodeKind::Nand,
            Op::Nor => NodeKind::Nor,
            Op::Xnor => NodeKind::Xnor,
        }
    }

    fn label(self) -> &'static str {
        match self {
            NodeKind::Variable => "VARIABLE",
            NodeKind::Constant => "CONSTANT",
            NodeKind::Not => "NOT",
            NodeKind::And => "AND",
            NodeKind::Or => "OR",
            NodeKind::Xor => "XOR",
            NodeKind::Nand => "NAND",
            NodeKind::Nor => "NOR",
            NodeKind::Xnor => "XNOR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExprNode {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<ExprNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<ExprNode>>,
}

impl ExprNode {
    pub fn variable(name: &str) -> Self {
        Self {
            kind: NodeKind::Variable,
            name: Some(name.to_string()),
            value: None,
            left: None,
            right: None,
        }
    }

    pub fn constant(value: bool) -> Self {
        Self {
            kind: NodeKind::Constant,
            name: None,
            value: Some(value),
            left: None,
            right: None,
        }
    }

    pub(crate) fn malformed(&self, missing: &'static str) -> EvalError {
        EvalError::MalformedExpression {
            kind: self.kind.label().to_string(),
            missing,
        }
    }
}

impl From<&Expr> for ExprNode {
    fn from(expr: &Expr) -> Self {
        match expr {
            Expr::Var(name) => ExprNode::variable(name),
            Expr::Const(value) => ExprNode::constant(*value),
            Expr::Not(inner) => ExprNode {
                kind: NodeKind::Not,
                name: None,
                value: None,
                left: Some(Box::new(ExprNode::from(&**inner))),
                right: None,
            },
            Expr::Binary(op, l, r) => ExprNode {
                kind: NodeKind::of_op(*op),
                name: None,
                value: None,
                left: Some(Box::new(ExprNode::from(&**l))),
                right: Some(Box::new(ExprNode::from(&**r))),
            },
        }
    }
}

impl TryFrom<&ExprNode> for Expr {
    type Error = EvalError;

    fn try_from(node: &ExprNode) -> Result<Self, Self::Error> {
        let child = |slot: &Option<Box<ExprNode>>, missing: &'static str| -> Result<Rc<Expr>, EvalError> {
            let child = slot.as_deref().ok_or_else(|| node.malformed(missing))?;
            Ok(Rc::new(Expr::try_from(child)?))
        };
        match node.kind {
            NodeKind::Variable => {
                let name = node.name.as_deref().ok_or_else(|| node.malformed("name"))?;
                Ok(Expr::var(name))
            }
            NodeKind::Constant => Ok(Expr::Const(node.value.ok_or_else(|| node.malformed("value"))?)),
            NodeKind::Not => Ok(Expr::Not(child(&node.left, "left")?)),
            kind => {
                let op = kind.op().ok_or_else(|| node.malformed("operator"))?;
                Ok(Expr::Binary(op, child(&node.left, "left")?, child(&node.right, "right")?))
            }
        }
    }
}
