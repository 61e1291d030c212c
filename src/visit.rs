//! Generic tree rewriting.
//!
//! Rewrites report `None` for "unchanged" so that untouched subtrees are shared
//! with the input instead of being rebuilt.

use std::rc::Rc;

use crate::ast::Expr;

/// Rebuild `expr` with children mapped by `f`, or `None` if no child changed.
pub fn map_children<F>(expr: &Expr, mut f: F) -> Option<Expr>
where
    F: FnMut(&Expr) -> Option<Expr>,
{
    match expr {
        Expr::Var(_) | Expr::Const(_) => None,
        Expr::Not(inner) => f(inner).map(Expr::not),
        Expr::Binary(op, l, r) => {
            let new_l = f(l);
            let new_r = f(r);
            if new_l.is_none() && new_r.is_none() {
                return None;
            }
            let l = new_l.map_or_else(|| Rc::clone(l), Rc::new);
            let r = new_r.map_or_else(|| Rc::clone(r), Rc::new);
            Some(Expr::Binary(*op, l, r))
        }
    }
}

/// Rewrite children first, then offer the (possibly rebuilt) node to `rewrite`.
///
/// Each node is offered to `rewrite` exactly once per call.
pub fn rewrite_bottom_up<F>(expr: &Expr, rewrite: &mut F) -> Option<Expr>
where
    F: FnMut(&Expr) -> Option<Expr>,
{
    let rebuilt = map_children(expr, |child| rewrite_bottom_up(child, rewrite));
    let current = rebuilt.as_ref().unwrap_or(expr);
    match rewrite(current) {
        Some(rewritten) => Some(rewritten),
        None => rebuilt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::ast::Op;

    fn rename(e: &Expr) -> Option<Expr> {
        match e {
            Expr::Var(name) if &**name == "A" => Some(Expr::var("Z")),
            _ => None,
        }
    }

    #[test]
    fn test_unchanged_returns_none() {
        let e = Expr::and(Expr::var("B"), Expr::not(Expr::var("C")));
        assert_eq!(rewrite_bottom_up(&e, &mut rename), None);
    }

    #[test]
    fn test_shares_untouched_subtrees() {
        let right = Rc::new(Expr::or(Expr::var("B"), Expr::var("C")));
        let e = Expr::Binary(Op::And, Rc::new(Expr::var("A")), Rc::clone(&right));
        let out = rewrite_bottom_up(&e, &mut rename).unwrap();
        match &out {
            Expr::Binary(Op::And, l, r) => {
                assert_eq!(**l, Expr::var("Z"));
                assert!(Rc::ptr_eq(r, &right));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bottom_up_sees_rebuilt_parent() {
        // Fold `Z*Z` only after both `A`s were renamed.
        let e = Expr::and(Expr::var("A"), Expr::var("A"));
        let mut fold = |node: &Expr| {
            rename(node).or_else(|| match node {
                Expr::Binary(Op::And, l, r) if l == r => Some((**l).clone()),
                _ => None,
            })
        };
        let out = rewrite_bottom_up(&e, &mut fold).unwrap();
        assert_eq!(out, Expr::var("Z"));
    }

    #[test]
    fn test_rewritten_node_is_not_revisited() {
        // Four nodes, four offers: a rewritten subtree is not walked again.
        let e = Expr::not(Expr::not(Expr::not(Expr::var("A"))));
        let mut visits = 0;
        let mut strip = |node: &Expr| {
            visits += 1;
            match node {
                Expr::Not(inner) => match &**inner {
                    Expr::Not(x) => Some((**x).clone()),
                    _ => None,
                },
                _ => None,
            }
        };
        let out = rewrite_bottom_up(&e, &mut strip).unwrap();
        assert_eq!(visits, 4);
        assert_eq!(out, Expr::not(Expr::var("A")));
    }
}
