use boolmin::ast::Expr;
use boolmin::engine::Engine;
use boolmin::error::ParseError;
use boolmin::eval::{self, Assignment};
use boolmin::minimize::{MinimizeOptions, Strategy};
use boolmin::parse::parse;

use test_log::test;

const INPUTS: &[&str] = &[
    "A",
    "!A",
    "1*A+0",
    "A*!A",
    "A+!A",
    "A*B+A*!B",
    "A+A*B",
    "!(A*B)",
    "!(A+B)*C",
    "!(!A+!B)",
    "A^B",
    "A@B",
    "A#B",
    "A=B",
    "(A+B)*(A+C)",
    "A*B+!A*C+B*C",
    "A*(B+C)+!A*!B",
    "A*B*C+A*B*!C+!A*B*C",
    "A^B^C",
    "!(A^B)+C*D",
    "A*!B*C+A*B*!D+!A*C*D+B*C*!D",
    "x1*x2+x3*!x1+x2*x3",
    "A*B*!C*D+!A*!E+B*C*E+!B*!C*!D*E",
    "A \\land \\lnot B \\lor \\overline{A \\lor C}",
    "(A \\oplus B) \\odot (C \\uparrow D)",
];

fn assert_equivalent(original: &Expr, rewritten: &Expr, what: &str) {
    let variables = eval::union_variables(original, rewritten);
    for m in 0..(1u32 << variables.len()) {
        let assignment = eval::assignment_from_minterm(&variables, m);
        assert_eq!(
            eval::evaluate(rewritten, &assignment),
            eval::evaluate(original, &assignment),
            "{} of `{}` gave `{}`, which differs on {:?}",
            what,
            original,
            rewritten,
            assignment
        );
    }
}

#[test]
fn test_simplify_preserves_semantics() {
    let engine = Engine::default();
    for input in INPUTS {
        let e = engine.parse(input).unwrap();
        assert_equivalent(&e, &engine.simplify(&e), "simplify");
    }
}

#[test]
fn test_minimize_preserves_semantics() {
    let engine = Engine::default();
    for input in INPUTS {
        let e = engine.parse(input).unwrap();
        assert_equivalent(&e, &engine.minimize(&e), "minimize");
    }
}

#[test]
fn test_forced_strategies_preserve_semantics() {
    let engine = Engine::default();
    for strategy in [Strategy::TermCombination, Strategy::KarnaughMap, Strategy::QuineMcCluskey] {
        let options = MinimizeOptions::with_strategy(strategy);
        for input in INPUTS {
            let e = engine.parse(input).unwrap();
            let result = engine.minimize_with(&e, &options);
            assert_eq!(result.strategy, strategy);
            assert_equivalent(&e, &result.minimal, "forced minimize");
        }
    }
}

#[test]
fn test_simplify_is_idempotent() {
    let engine = Engine::default();
    for input in INPUTS {
        let once = engine.simplify(&engine.parse(input).unwrap());
        let twice = engine.simplify(&once);
        assert_eq!(twice, once, "simplify of `{}` is not a fixed point", input);
    }
}

#[test]
fn test_round_trip() {
    for input in INPUTS.iter().chain(&["()", "AB", "A(B+C)", "x_{1} \\cdot x_2"]) {
        let e = parse(input).unwrap();
        let rendered = e.to_string();
        assert_eq!(parse(&rendered).unwrap(), e, "`{}` rendered as `{}`", input, rendered);
    }
}

#[test]
fn test_minimize_does_not_grow() {
    let engine = Engine::default();
    for input in INPUTS {
        let e = engine.parse(input).unwrap();
        let m = engine.minimize(&e);
        assert!(
            m.node_count() <= e.node_count(),
            "`{}` ({} nodes) minimized to `{}` ({} nodes)",
            e,
            e.node_count(),
            m,
            m.node_count()
        );
    }
}

#[test]
fn test_de_morgan() {
    let engine = Engine::default();
    let simplified = |s: &str| engine.to_boolean_string(&engine.simplify(&engine.parse(s).unwrap()));
    assert_eq!(simplified("!(A*B)"), "!A+!B");
    assert_eq!(simplified("!(A+B)"), "!A*!B");
}

#[test]
fn test_consensus_and_absorption() {
    let engine = Engine::default();
    let minimized = |s: &str| engine.to_boolean_string(&engine.minimize(&engine.parse(s).unwrap()));
    assert_eq!(minimized("A*B+A*!B"), "A");
    assert_eq!(minimized("A+A*B"), "A");
    assert_eq!(minimized("A*(A+B)"), "A");
    assert_eq!(minimized("A+!A*B"), "A+B");
}

#[test]
fn test_contradiction_and_tautology() {
    let engine = Engine::default();
    let contradiction = engine.simplify(&engine.parse("A*!A").unwrap());
    assert_eq!(engine.to_boolean_string(&contradiction), "0");
    let env: Assignment = [("A".to_string(), true)].into_iter().collect();
    assert!(!engine.evaluate(&contradiction, &env));

    let tautology = engine.simplify(&engine.parse("A+!A").unwrap());
    assert_eq!(engine.to_boolean_string(&tautology), "1");
}

#[test]
fn test_quine_mccluskey_five_variables() {
    let engine = Engine::default();
    let e = engine.parse("A*B*!C + !A*D*E + B*C*D*!E + !B*!D + A*!E + !A*B*C*E").unwrap();
    let variables = engine.extract_variables(&e);
    assert_eq!(variables.len(), 5);

    let result = engine.minimize_with(&e, &MinimizeOptions::default());
    assert_eq!(result.strategy, Strategy::QuineMcCluskey);
    assert!(!result.fell_back);
    for m in 0..32 {
        assert_eq!(
            eval::evaluate_minterm(&result.minimal, &variables, m),
            eval::evaluate_minterm(&e, &variables, m),
            "minterm {}",
            m
        );
    }
}

#[test]
fn test_parser_rejects_dangling_operators() {
    assert!(matches!(parse("A*"), Err(ParseError::MissingOperand { .. })));
    assert!(parse("*B").is_err());
    assert!(parse("A+*B").is_err());
    assert!(parse("(A+B").is_err());
    assert_eq!(parse("()").unwrap(), Expr::zero());
}

#[test]
fn test_latex_and_ascii_agree() {
    let latex = parse("\\lnot A \\land (B \\lor C) \\oplus D").unwrap();
    let ascii = parse("!A*(B+C)^D").unwrap();
    assert_eq!(latex, ascii);
}

#[test]
fn test_extract_variables_sorted() {
    let engine = Engine::default();
    let e = engine.parse("C*b+A*x2+C").unwrap();
    assert_eq!(engine.extract_variables(&e), vec!["A", "C", "b", "x2"]);
}
