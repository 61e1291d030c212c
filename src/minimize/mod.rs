//! Strategy-selecting minimization.
//!
//! [`Minimizer::minimize`] runs in five steps:
//!
//! 1. Simplify with the standard rule set (the *intermediate* form).
//! 2. Pick a [`Strategy`] from the number of distinct variables, unless one is
//!    forced through [`MinimizeOptions`]:
//!    - fewer than 3 variables: [term combination](terms),
//!    - 3 or 4 variables and an OR at the root: [Karnaugh map](kmap),
//!    - 3 or 4 variables otherwise: term combination,
//!    - 5 or more variables: [Quine–McCluskey](qm).
//! 3. Run the strategy, then a bounded standard rewrite and the cleanup rule set.
//! 4. Check the result against the intermediate form on every assignment (when
//!    the variable count allows it).
//! 5. Return the smallest of the minimized, intermediate and input forms.
//!
//! Minimization is best-effort. A failing strategy is logged at `warn` level and
//! the intermediate form is used instead; [`Minimized::fell_back`] records it.

pub mod implicant;
pub mod kmap;
pub mod qm;
pub mod terms;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::ast::{Expr, Op};
use crate::cache::FifoCache;
use crate::config::EngineConfig;
use crate::error::MinimizeError;
use crate::eval;
use crate::rules::{RuleSet, Simplified};

use self::kmap::{KMap, Layout};

/// Largest sum-of-products expansion handed to term combination.
const MAX_EXPANSION_NODES: usize = 512;

/// Minimization algorithm.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    TermCombination,
    KarnaughMap,
    QuineMcCluskey,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::TermCombination => "term combination",
            Strategy::KarnaughMap => "Karnaugh map",
            Strategy::QuineMcCluskey => "Quine-McCluskey",
        };
        write!(f, "{}", name)
    }
}

/// Per-call minimization settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimizeOptions {
    /// Use this strategy instead of choosing by variable count.
    pub strategy: Option<Strategy>,
}

impl MinimizeOptions {
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy: Some(strategy),
        }
    }
}

/// Outcome of [`Minimizer::minimize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Minimized {
    /// The input after rule-based simplification.
    pub intermediate: Expr,
    /// The smallest equivalent form found.
    pub minimal: Expr,
    pub strategy: Strategy,
    /// The strategy failed and the intermediate form was used instead.
    pub fell_back: bool,
}

/// Minimizer with its rule sets and the Karnaugh map layout cache.
pub struct Minimizer {
    config: EngineConfig,
    standard: RuleSet,
    cleanup: RuleSet,
    sum_of_products: RuleSet,
    layouts: RefCell<FifoCache<usize, Rc<Layout>>>,
}

impl Minimizer {
    pub fn new(config: EngineConfig) -> Self {
        let layouts = RefCell::new(FifoCache::new(config.kmap_cache_capacity));
        Self {
            config,
            standard: RuleSet::standard(),
            cleanup: RuleSet::cleanup(),
            sum_of_products: RuleSet::sum_of_products(),
            layouts,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the standard rule set to a fixed point.
    pub fn simplify(&self, expr: &Expr) -> Simplified {
        self.standard.run(expr, self.config.max_iterations)
    }

    /// Strategy for an expression with `variable_count` distinct variables.
    pub fn select_strategy(&self, expr: &Expr, variable_count: usize) -> Strategy {
        match variable_count {
            0..=2 => Strategy::TermCombination,
            3 | 4 if expr.is_op(Op::Or) => Strategy::KarnaughMap,
            3 | 4 => Strategy::TermCombination,
            _ => Strategy::QuineMcCluskey,
        }
    }

    pub fn minimize(&self, expr: &Expr, options: &MinimizeOptions) -> Minimized {
        let intermediate = self.simplify(expr).expr;
        let variables = intermediate.variables();
        let strategy = options
            .strategy
            .unwrap_or_else(|| self.select_strategy(&intermediate, variables.len()));
        debug!(
            "minimize(expr = {}, intermediate = {}, variables = {}, strategy = {})",
            expr,
            intermediate,
            variables.len(),
            strategy
        );

        let attempt = self
            .run_strategy(strategy, &intermediate, &variables)
            .map(|candidate| self.polish(&candidate))
            .and_then(|candidate| self.verify(&intermediate, candidate));
        let (candidate, fell_back) = match attempt {
            Ok(candidate) => (candidate, false),
            Err(err) => {
                warn!("{} failed on `{}`: {}; keeping the simplified form", strategy, intermediate, err);
                (intermediate.clone(), true)
            }
        };

        let minimal = [candidate, intermediate.clone(), expr.clone()]
            .into_iter()
            .min_by_key(Expr::node_count)
            .unwrap_or_else(|| intermediate.clone());
        debug!("minimal form: {}", minimal);
        Minimized {
            intermediate,
            minimal,
            strategy,
            fell_back,
        }
    }

    fn run_strategy(&self, strategy: Strategy, expr: &Expr, variables: &[String]) -> Result<Expr, MinimizeError> {
        match strategy {
            Strategy::TermCombination => Ok(self.term_combination(expr)),
            Strategy::KarnaughMap => {
                self.check_exact(variables.len())?;
                let minterms = eval::minterms(expr, variables)?;
                Ok(self.kmap(variables, &minterms)?.to_expr())
            }
            Strategy::QuineMcCluskey => {
                self.check_exact(variables.len())?;
                let minterms = eval::minterms(expr, variables)?;
                Ok(qm::minimize(&minterms, variables))
            }
        }
    }

    fn check_exact(&self, count: usize) -> Result<(), MinimizeError> {
        let limit = self.config.max_exact_variables;
        if count > limit {
            return Err(MinimizeError::TooManyVariables { count, limit });
        }
        Ok(())
    }

    /// Combine terms of the sum-of-products expansion, or of `expr` itself when
    /// the expansion does not settle within the iteration and node bounds.
    fn term_combination(&self, expr: &Expr) -> Expr {
        let expanded = self
            .sum_of_products
            .run_bounded(expr, self.config.max_iterations, MAX_EXPANSION_NODES);
        let base = if expanded.is_complete() {
            &expanded.expr
        } else {
            debug!("sum-of-products expansion skipped for {}", expr);
            expr
        };
        terms::combine(base)
    }

    /// Bounded standard rewrite followed by the cleanup rule set.
    fn polish(&self, expr: &Expr) -> Expr {
        let rewritten = self.standard.run(expr, self.config.cleanup_iterations).expr;
        self.cleanup.run(&rewritten, self.config.cleanup_iterations).expr
    }

    fn verify(&self, original: &Expr, candidate: Expr) -> Result<Expr, MinimizeError> {
        let count = eval::union_variables(original, &candidate).len();
        if count > self.config.max_exact_variables {
            debug!("skip verification: {} variables", count);
            return Ok(candidate);
        }
        if eval::equivalent(original, &candidate)? {
            Ok(candidate)
        } else {
            Err(MinimizeError::NotEquivalent {
                original: original.to_string(),
                minimized: candidate.to_string(),
            })
        }
    }

    /// Grid geometry for `variables` variables, cached per count.
    pub fn layout(&self, variables: usize) -> Result<Rc<Layout>, MinimizeError> {
        if let Some(layout) = self.layouts.borrow_mut().get(&variables) {
            return Ok(Rc::clone(layout));
        }
        let layout = Rc::new(Layout::new(variables)?);
        self.layouts.borrow_mut().insert(variables, Rc::clone(&layout));
        Ok(layout)
    }

    /// Karnaugh map of the function with true `minterms` over `variables`.
    pub fn kmap(&self, variables: &[String], minterms: &[u32]) -> Result<KMap, MinimizeError> {
        let layout = self.layout(variables.len())?;
        Ok(KMap::new(&layout, variables.to_vec(), minterms))
    }

    /// Layout cache `(hits, misses)`.
    pub fn layout_cache_stats(&self) -> (usize, usize) {
        let layouts = self.layouts.borrow();
        (layouts.hits(), layouts.misses())
    }
}

impl Default for Minimizer {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::parse::parse;
    use crate::render::to_boolean_string;

    fn minimize(input: &str) -> Minimized {
        Minimizer::default().minimize(&parse(input).unwrap(), &MinimizeOptions::default())
    }

    #[test]
    fn test_strategy_selection() {
        let m = Minimizer::default();
        let or_rooted = parse("A*B+C").unwrap();
        let and_rooted = parse("(A+B)*C").unwrap();
        assert_eq!(m.select_strategy(&or_rooted, 2), Strategy::TermCombination);
        assert_eq!(m.select_strategy(&or_rooted, 3), Strategy::KarnaughMap);
        assert_eq!(m.select_strategy(&and_rooted, 3), Strategy::TermCombination);
        assert_eq!(m.select_strategy(&and_rooted, 5), Strategy::QuineMcCluskey);
    }

    #[test]
    fn test_laws() {
        assert_eq!(to_boolean_string(&minimize("A*B+A*!B").minimal), "A");
        assert_eq!(to_boolean_string(&minimize("A+A*B").minimal), "A");
        assert_eq!(to_boolean_string(&minimize("A*!A").minimal), "0");
        assert_eq!(to_boolean_string(&minimize("A+!A").minimal), "1");
    }

    #[test]
    fn test_karnaugh_strategy() {
        let result = minimize("A*B*C+A*B*!C+A*!B*C+!A*B*C");
        assert_eq!(result.strategy, Strategy::KarnaughMap);
        assert!(!result.fell_back);
        assert!(eval::equivalent(&result.minimal, &parse("A*B+A*C+B*C").unwrap()).unwrap());
        assert!(result.minimal.node_count() <= parse("A*B+A*C+B*C").unwrap().node_count());
    }

    #[test]
    fn test_quine_mccluskey_strategy() {
        let input = parse("A*B*C*D*E+A*B*C*D*!E+!A*B*C*D*E+!A*B*C*D*!E+A*!B*!C*!D*E").unwrap();
        let result = Minimizer::default().minimize(&input, &MinimizeOptions::default());
        assert_eq!(result.strategy, Strategy::QuineMcCluskey);
        assert!(eval::equivalent(&result.minimal, &input).unwrap());
        assert!(result.minimal.node_count() < input.node_count());
    }

    #[test]
    fn test_never_grows() {
        for input in ["!(A*B)", "A^B^C", "A@B", "(A+B)*(C+D)*(E+F)", "!(A=B)+C*D"] {
            let expr = parse(input).unwrap();
            let result = Minimizer::default().minimize(&expr, &MinimizeOptions::default());
            assert!(result.minimal.node_count() <= expr.node_count(), "input: {}", input);
            assert!(eval::equivalent(&result.minimal, &expr).unwrap(), "input: {}", input);
        }
    }

    #[test]
    fn test_term_combination_bounded_expansion() {
        // Simplifies to a NAND over four variables, whose expansion explodes.
        let expr = parse("(E#E@!E*E)^((D+A)=(E=B)=(E#B#!B))@(A#D^E)").unwrap();
        let result = Minimizer::default().minimize(&expr, &MinimizeOptions::default());
        assert_eq!(result.intermediate.variables().len(), 4);
        assert_eq!(result.strategy, Strategy::TermCombination);
        assert!(!result.fell_back);
        assert!(eval::equivalent(&result.minimal, &expr).unwrap());
        assert!(result.minimal.node_count() <= expr.node_count());
    }

    #[test]
    fn test_forced_strategy_falls_back() {
        // A single variable has no Karnaugh map.
        let expr = parse("A*A").unwrap();
        let result = Minimizer::default().minimize(&expr, &MinimizeOptions::with_strategy(Strategy::KarnaughMap));
        assert!(result.fell_back);
        assert_eq!(result.minimal, Expr::var("A"));
    }

    #[test]
    fn test_too_many_variables_falls_back() {
        let config = EngineConfig {
            max_exact_variables: 4,
            ..EngineConfig::default()
        };
        let expr = parse("A*B+C*D+E*!A").unwrap();
        let result = Minimizer::new(config).minimize(&expr, &MinimizeOptions::default());
        assert_eq!(result.strategy, Strategy::QuineMcCluskey);
        assert!(result.fell_back);
        assert_eq!(result.minimal, result.intermediate);
    }

    #[test]
    fn test_layout_cache() {
        let m = Minimizer::default();
        m.layout(4).unwrap();
        m.layout(4).unwrap();
        assert!(m.layout(9).is_err());
        assert_eq!(m.layout_cache_stats(), (1, 2));
    }
}
