//! Canonical string renderings.
//!
//! Both renderings are precedence-aware: parentheses are emitted only where the
//! parser would otherwise build a different tree, so that
//! `parse(to_boolean_string(e)) == e` for every expression `e`.
//!
//! - Left operands of equal precedence are not parenthesized (all connectives
//!   associate to the left).
//! - Right operands of equal precedence are always parenthesized.
//! - Negation of a compound expression is written `!(...)` in ASCII and
//!   `\overline{...}` in LaTeX.

use std::fmt;

use crate::ast::{Expr, Op};

/// Render as ASCII: `!A+B*C`.
pub fn to_boolean_string(expr: &Expr) -> String {
    let mut out = String::new();
    write_ascii(expr, &mut out);
    out
}

/// Render as LaTeX: `\overline{A} \lor B \land C`.
pub fn to_latex_string(expr: &Expr) -> String {
    let mut out = String::new();
    write_latex(expr, &mut out);
    out
}

fn needs_parens(child: &Expr, parent: Op, is_right: bool) -> bool {
    match child {
        Expr::Binary(op, _, _) => {
            op.precedence() < parent.precedence() || (is_right && op.precedence() == parent.precedence())
        }
        _ => false,
    }
}

fn write_ascii(expr: &Expr, out: &mut String) {
    match expr {
        Expr::Var(name) => out.push_str(name),
        Expr::Const(value) => out.push(if *value { '1' } else { '0' }),
        Expr::Not(inner) => {
            out.push('!');
            if matches!(**inner, Expr::Binary(..)) {
                out.push('(');
                write_ascii(inner, out);
                out.push(')');
            } else {
                write_ascii(inner, out);
            }
        }
        Expr::Binary(op, l, r) => {
            write_ascii_operand(l, *op, false, out);
            out.push(op.symbol());
            write_ascii_operand(r, *op, true, out);
        }
    }
}

fn write_ascii_operand(child: &Expr, parent: Op, is_right: bool, out: &mut String) {
    if needs_parens(child, parent, is_right) {
        out.push('(');
        write_ascii(child, out);
        out.push(')');
    } else {
        write_ascii(child, out);
    }
}

fn write_latex(expr: &Expr, out: &mut String) {
    match expr {
        Expr::Var(name) => write_latex_var(name, out),
        Expr::Const(value) => out.push(if *value { '1' } else { '0' }),
        Expr::Not(inner) => {
            out.push_str("\\overline{");
            write_latex(inner, out);
            out.push('}');
        }
        Expr::Binary(op, l, r) => {
            write_latex_operand(l, *op, false, out);
            out.push(' ');
            out.push_str(op.latex());
            out.push(' ');
            write_latex_operand(r, *op, true, out);
        }
    }
}

fn write_latex_operand(child: &Expr, parent: Op, is_right: bool, out: &mut String) {
    if needs_parens(child, parent, is_right) {
        out.push_str("\\left(");
        write_latex(child, out);
        out.push_str("\\right)");
    } else {
        write_latex(child, out);
    }
}

// Trailing digits become a subscript: `x12` -> `x_{12}`.
fn write_latex_var(name: &str, out: &mut String) {
    let split = name.find(|c: char| c.is_ascii_digit()).unwrap_or(name.len());
    let (stem, index) = name.split_at(split);
    out.push_str(stem);
    if !index.is_empty() {
        out.push_str("_{");
        out.push_str(index);
        out.push('}');
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_boolean_string(self))
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Op::And => "AND",
            Op::Or => "OR",
            Op::Xor => "XOR",
            Op::Nand => "NAND",
            Op::Nor => "NOR",
            Op::Xnor => "XNOR",
        };
        f.write_str(name)
    }
}
