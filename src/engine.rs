use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use log::debug;

use crate::ast::Expr;
use crate::cache::{FifoCache, LruCache};
use crate::config::EngineConfig;
use crate::error::{EvalError, MinimizeError, ParseResult};
use crate::eval::{self, Assignment, TruthTable};
use crate::minimize::kmap::KMap;
use crate::minimize::{MinimizeOptions, Minimized, Minimizer};
use crate::node::ExprNode;
use crate::parse;
use crate::render::{to_boolean_string, to_latex_string};
use crate::rules::{RuleSet, Simplified};

type EvalKey = (String, String);

/// Entry point of the library: parsing, evaluation, simplification and
/// minimization, with memoization caches owned by the instance.
///
/// Caches are keyed by the canonical string of an expression. They only ever
/// save recomputation; every result is the same with caching disabled.
///
/// ```
/// use boolmin::engine::Engine;
///
/// let engine = Engine::default();
/// let expr = engine.parse("A \\land B \\lor A \\land \\lnot B").unwrap();
/// assert_eq!(engine.to_boolean_string(&engine.minimize(&expr)), "A");
/// ```
pub struct Engine {
    config: EngineConfig,
    minimizer: Minimizer,
    sum_of_products: RuleSet,
    product_of_sums: RuleSet,
    eval_cache: RefCell<LruCache<EvalKey, bool>>,
    minterm_cache: RefCell<FifoCache<String, Rc<[u32]>>>,
    importance_cache: RefCell<FifoCache<String, Rc<[(String, f64)]>>>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            minimizer: Minimizer::new(config.clone()),
            sum_of_products: RuleSet::sum_of_products(),
            product_of_sums: RuleSet::product_of_sums(),
            eval_cache: RefCell::new(LruCache::new(config.eval_cache_capacity)),
            minterm_cache: RefCell::new(FifoCache::new(config.minterm_cache_capacity)),
            importance_cache: RefCell::new(FifoCache::new(config.importance_cache_capacity)),
            config,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(EngineConfig::default())
    }
}

impl Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("eval_cache", &self.eval_cache.borrow().len())
            .field("minterm_cache", &self.minterm_cache.borrow().len())
            .field("importance_cache", &self.importance_cache.borrow().len())
            .finish()
    }
}

impl Engine {
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluation cache `(hits, misses)`.
    pub fn eval_cache_stats(&self) -> (usize, usize) {
        let cache = self.eval_cache.borrow();
        (cache.hits(), cache.misses())
    }

    /// Drop all memoized results.
    pub fn clear_caches(&self) {
        self.eval_cache.borrow_mut().clear();
        self.minterm_cache.borrow_mut().clear();
        self.importance_cache.borrow_mut().clear();
    }

    pub fn parse(&self, input: &str) -> ParseResult<Expr> {
        parse::parse(input)
    }

    pub fn to_boolean_string(&self, expr: &Expr) -> String {
        to_boolean_string(expr)
    }

    pub fn to_latex_string(&self, expr: &Expr) -> String {
        to_latex_string(expr)
    }

    /// Unique variable names, sorted.
    pub fn extract_variables(&self, expr: &Expr) -> Vec<String> {
        expr.variables()
    }
}

// Evaluation
impl Engine {
    /// Evaluate `expr` under `assignment`; missing variables are `false`.
    ///
    /// Memoized by canonical string and the assignment restricted to the
    /// variables of `expr`.
    pub fn evaluate(&self, expr: &Expr, assignment: &Assignment) -> bool {
        let variables = expr.variables();
        let key = (to_boolean_string(expr), eval::assignment_key(&variables, assignment));
        if let Some(&value) = self.eval_cache.borrow_mut().get(&key) {
            debug!("cache: evaluate({}, {}) = {}", key.0, key.1, value);
            return value;
        }
        let value = eval::evaluate(expr, assignment);
        self.eval_cache.borrow_mut().insert(key, value);
        value
    }

    /// Evaluate a loosely-typed node tree, failing on malformed nodes.
    pub fn evaluate_node(&self, node: &ExprNode, assignment: &Assignment) -> Result<bool, EvalError> {
        eval::evaluate_node(node, assignment)
    }

    /// Fail when `expr` has more variables than truth-table work allows.
    fn check_exact(&self, variables: &[String]) -> Result<(), EvalError> {
        eval::check_variable_count(variables.len(), self.config.max_exact_variables)
    }

    /// True minterms of `expr` over its sorted variables.
    ///
    /// Fails with [`EvalError::TooManyVariables`] above
    /// [`max_exact_variables`][EngineConfig::max_exact_variables].
    pub fn minterms(&self, expr: &Expr) -> Result<Vec<u32>, EvalError> {
        let key = to_boolean_string(expr);
        if let Some(cached) = self.minterm_cache.borrow_mut().get(&key) {
            return Ok(cached.to_vec());
        }
        let variables = expr.variables();
        self.check_exact(&variables)?;
        let minterms: Rc<[u32]> = eval::minterms(expr, &variables)?.into();
        self.minterm_cache.borrow_mut().insert(key, Rc::clone(&minterms));
        Ok(minterms.to_vec())
    }

    pub fn truth_table(&self, expr: &Expr) -> Result<TruthTable, EvalError> {
        let variables = expr.variables();
        self.check_exact(&variables)?;
        TruthTable::new(expr, variables)
    }

    /// For each variable, the fraction of assignments on which flipping that
    /// variable flips the value of `expr`.
    pub fn variable_importance(&self, expr: &Expr) -> Result<Vec<(String, f64)>, EvalError> {
        let key = to_boolean_string(expr);
        if let Some(cached) = self.importance_cache.borrow_mut().get(&key) {
            return Ok(cached.to_vec());
        }
        let minterms = self.minterms(expr)?;
        let variables = expr.variables();
        let n = variables.len();
        let mut truth = vec![false; 1 << n];
        for m in minterms {
            truth[m as usize] = true;
        }
        let importance: Rc<[(String, f64)]> = variables
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let bit = 1usize << (n - 1 - i);
                let flips = (0..truth.len()).filter(|&m| truth[m] != truth[m ^ bit]).count();
                (name.clone(), flips as f64 / truth.len() as f64)
            })
            .collect();
        self.importance_cache.borrow_mut().insert(key, Rc::clone(&importance));
        Ok(importance.to_vec())
    }

    /// Whether `a` and `b` agree on every assignment of their combined variables.
    pub fn equivalent(&self, a: &Expr, b: &Expr) -> Result<bool, EvalError> {
        self.check_exact(&eval::union_variables(a, b))?;
        eval::equivalent(a, b)
    }
}

// Rewriting
impl Engine {
    pub fn simplify(&self, expr: &Expr) -> Expr {
        self.simplify_with_report(expr).expr
    }

    /// Simplify, reporting iterations and applied rules.
    pub fn simplify_with_report(&self, expr: &Expr) -> Simplified {
        self.minimizer.simplify(expr)
    }

    pub fn minimize(&self, expr: &Expr) -> Expr {
        self.minimize_with(expr, &MinimizeOptions::default()).minimal
    }

    pub fn minimize_with(&self, expr: &Expr, options: &MinimizeOptions) -> Minimized {
        self.minimizer.minimize(expr, options)
    }

    /// Expansion into an OR of AND-terms.
    ///
    /// Stops expanding once the tree would outgrow
    /// [`max_expansion_nodes`][EngineConfig::max_expansion_nodes]; the result is
    /// then only partly expanded, but still equivalent.
    pub fn sum_of_products(&self, expr: &Expr) -> Expr {
        self.expand(&self.sum_of_products, expr)
    }

    /// Expansion into an AND of OR-clauses, bounded like [`Engine::sum_of_products`].
    pub fn product_of_sums(&self, expr: &Expr) -> Expr {
        self.expand(&self.product_of_sums, expr)
    }

    fn expand(&self, rules: &RuleSet, expr: &Expr) -> Expr {
        let result = rules.run_bounded(expr, self.config.max_iterations, self.config.max_expansion_nodes);
        if result.size_limit_reached {
            debug!("{} stopped at the node limit: {}", rules.name(), expr);
        }
        result.expr
    }

    /// Karnaugh map of `expr` with its chosen groups (2 to 6 variables).
    pub fn kmap(&self, expr: &Expr) -> Result<KMap, MinimizeError> {
        let variables = expr.variables();
        let layout = self.minimizer.layout(variables.len())?;
        let minterms = self.minterms(expr)?;
        Ok(KMap::new(&layout, variables, &minterms))
    }
}
