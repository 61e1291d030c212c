//! # boolmin: Boolean expressions in Rust
//!
//! **`boolmin`** parses Boolean expressions written in LaTeX or plain ASCII,
//! evaluates them, rewrites them with algebraic laws and minimizes them to a
//! compact sum of products.
//!
//! ## Key Features
//!
//! - **Two input syntaxes**: `A \land \lnot B` and `A*!B` parse to the same [`Expr`][crate::ast::Expr].
//! - **Rule engine**: identity, domination, idempotence, complement, De Morgan, absorption,
//!   consensus and factoring laws, plus derived-operator identities for XOR, NAND, NOR and XNOR,
//!   applied bottom-up until a fixed point (see [`rules`]).
//! - **Minimization**: term combination, Karnaugh-map grouping or Quine–McCluskey, chosen by
//!   variable count (see [`minimize`]). The result is never larger than the input.
//! - **Bounded caches**: evaluation, minterm and importance results are memoized per
//!   [`Engine`][crate::engine::Engine] instance in fixed-capacity caches.
//!
//! ## Basic Usage
//!
//! ```rust
//! use boolmin::engine::Engine;
//!
//! let engine = Engine::default();
//!
//! // Parse: LaTeX and ASCII mix freely.
//! let e = engine.parse("A*B + A \\land \\lnot B").unwrap();
//! assert_eq!(engine.extract_variables(&e), vec!["A", "B"]);
//!
//! // Evaluate: missing variables are false.
//! let env = [("A".to_string(), true)].into_iter().collect();
//! assert!(engine.evaluate(&e, &env));
//!
//! // Minimize and render.
//! let m = engine.minimize(&e);
//! assert_eq!(engine.to_boolean_string(&m), "A");
//! let d = engine.simplify(&engine.parse("!(A*B)").unwrap());
//! assert_eq!(engine.to_latex_string(&d), "\\overline{A} \\lor \\overline{B}");
//! ```
//!
//! ## Core Components
//!
//! - **[`engine`]**: the [`Engine`][crate::engine::Engine], entry point owning configuration and caches.
//! - **[`parse`]** and **[`render`]**: text to AST and back.
//! - **[`rules`]**: rewrite rules and the fixed-point [`Rewriter`][crate::rules::Rewriter].
//! - **[`minimize`]**: strategy selection, K-maps and Quine–McCluskey.

pub mod ast;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod minimize;
pub mod node;
pub mod parse;
pub mod render;
pub mod rules;
pub mod utils;
pub mod visit;
