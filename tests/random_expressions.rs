//! Randomized checks of the rewriting and minimization guarantees.

use boolmin::ast::{Expr, Op};
use boolmin::engine::Engine;
use boolmin::eval;
use boolmin::parse::parse;

use proptest::prelude::*;
use proptest::sample::select;

const NAMES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

fn leaf(width: usize) -> impl Strategy<Value = Expr> {
    prop_oneof![
        4 => (0..width).prop_map(|i| Expr::var(NAMES[i])),
        1 => any::<bool>().prop_map(Expr::constant),
    ]
}

/// Trees of depth at most 5 over 2 to 6 variables, using every connective.
fn expression() -> impl Strategy<Value = Expr> {
    (2..=NAMES.len()).prop_flat_map(|width| {
        leaf(width).prop_recursive(5, 48, 2, |inner| {
            prop_oneof![
                1 => inner.clone().prop_map(|e| Expr::not(e)),
                4 => (select(Op::ALL.to_vec()), inner.clone(), inner)
                    .prop_map(|(op, l, r)| Expr::binary(op, l, r)),
            ]
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_simplify_preserves_semantics(e in expression()) {
        let engine = Engine::default();
        let simplified = engine.simplify(&e);
        prop_assert!(eval::equivalent(&simplified, &e).unwrap(), "`{}` simplified to `{}`", e, simplified);
    }

    #[test]
    fn prop_simplify_is_idempotent(e in expression()) {
        let engine = Engine::default();
        let once = engine.simplify(&e);
        prop_assert_eq!(engine.simplify(&once), once);
    }

    #[test]
    fn prop_minimize_preserves_semantics(e in expression()) {
        let engine = Engine::default();
        let minimized = engine.minimize(&e);
        prop_assert!(eval::equivalent(&minimized, &e).unwrap(), "`{}` minimized to `{}`", e, minimized);
    }

    #[test]
    fn prop_minimize_does_not_grow(e in expression()) {
        let engine = Engine::default();
        let minimized = engine.minimize(&e);
        prop_assert!(minimized.node_count() <= e.node_count());
        prop_assert!(engine.minimize(&minimized).node_count() <= minimized.node_count());
    }

    #[test]
    fn prop_render_then_parse_round_trips(e in expression()) {
        let rendered = e.to_string();
        let latex = Engine::default().to_latex_string(&e);
        prop_assert_eq!(parse(&latex).unwrap(), e.clone());
        prop_assert_eq!(parse(&rendered).unwrap(), e);
    }
}
