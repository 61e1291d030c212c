//! Rewrite rules and the fixed-point driver.
//!
//! A [`Rule`] is a pure local rewrite: it looks at one node and either returns an
//! equivalent replacement or declines. Rules never recurse; the [`Rewriter`]
//! walks the tree bottom-up (see [`visit`][crate::visit]) and offers every node to
//! the rules of a [`RuleSet`] in order, applying the first one that fires.
//!
//! A *pass* is one such walk. Passes repeat until one changes nothing (a fixed
//! point) or the iteration bound is hit. Hitting the bound is not an error: the
//! best form reached so far is returned with
//! [`Simplified::max_iterations_reached`] set.
//!
//! Expansions (distribution, XOR/XNOR unfolding) duplicate subtrees, so a few
//! passes can blow a small tree up exponentially. A [`Rewriter`] built with
//! [`Rewriter::with_node_limit`] declines any single rewrite whose result is
//! larger than the limit, and stops after the first pass that leaves the tree
//! over the limit, setting [`Simplified::size_limit_reached`].
//!
//! ## Rule sets
//!
//! | Set | Purpose |
//! |-----|---------|
//! | [`RuleSet::standard`] | Simplification: constants, idempotence, complements, derived operators, absorption, consensus, factoring, De Morgan |
//! | [`RuleSet::cleanup`] | Post-minimization pass: absorption and consensus without factoring |
//! | [`RuleSet::sum_of_products`] | Expansion into an OR of AND-terms |
//! | [`RuleSet::product_of_sums`] | Expansion into an AND of OR-clauses |
//!
//! The standard set never distributes, so factoring and expansion cannot chase
//! each other around.

pub mod chain;
pub mod complement;
pub mod consensus;
pub mod constants;
pub mod derived;
pub mod distributive;
pub mod idempotence;
pub mod negation;

use std::fmt;

use log::debug;

use crate::ast::Expr;
use crate::visit;

/// A named local rewrite.
#[derive(Copy, Clone)]
pub struct Rule {
    /// Short identifier, reported in [`Simplified::applied`].
    pub name: &'static str,
    /// The law in human-readable form.
    pub formula: &'static str,
    rewrite: fn(&Expr) -> Option<Expr>,
}

impl Rule {
    pub const fn new(name: &'static str, formula: &'static str, rewrite: fn(&Expr) -> Option<Expr>) -> Self {
        Self { name, formula, rewrite }
    }

    /// Whether the rule rewrites `expr` into something different.
    pub fn can_apply(&self, expr: &Expr) -> bool {
        self.try_apply(expr).is_some()
    }

    /// Rewrite `expr`, or return it unchanged when the rule does not fire.
    pub fn apply(&self, expr: &Expr) -> Expr {
        self.try_apply(expr).unwrap_or_else(|| expr.clone())
    }

    /// Rewrite `expr`; `None` when the rule does not fire or would not change it.
    pub fn try_apply(&self, expr: &Expr) -> Option<Expr> {
        (self.rewrite)(expr).filter(|rewritten| rewritten != expr)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule({}: {})", self.name, self.formula)
    }
}

/// An ordered collection of rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: &'static str,
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(name: &'static str, rules: Vec<Rule>) -> Self {
        Self { name, rules }
    }

    /// The general-purpose simplification rules.
    pub fn standard() -> Self {
        let mut rules = Vec::new();
        rules.extend_from_slice(constants::RULES);
        rules.extend_from_slice(negation::DOUBLE_NEGATION);
        rules.extend_from_slice(idempotence::RULES);
        rules.extend_from_slice(complement::RULES);
        rules.extend_from_slice(derived::IDENTITIES);
        rules.extend_from_slice(derived::NEGATED_PARITY);
        rules.extend_from_slice(distributive::ABSORPTION);
        rules.extend_from_slice(consensus::RULES);
        rules.extend_from_slice(distributive::COMPLEMENT_ABSORPTION);
        rules.extend_from_slice(distributive::FACTORING);
        rules.extend_from_slice(negation::DE_MORGAN);
        Self::new("standard", rules)
    }

    /// Rules that only ever shrink a sum-of-products shaped result.
    pub fn cleanup() -> Self {
        let mut rules = Vec::new();
        rules.extend_from_slice(constants::RULES);
        rules.extend_from_slice(negation::DOUBLE_NEGATION);
        rules.extend_from_slice(idempotence::RULES);
        rules.extend_from_slice(complement::RULES);
        rules.extend_from_slice(distributive::ABSORPTION);
        rules.extend_from_slice(distributive::COMPLEMENT_ABSORPTION);
        rules.extend_from_slice(consensus::RULES);
        Self::new("cleanup", rules)
    }

    /// Expansion into disjunctive normal form.
    pub fn sum_of_products() -> Self {
        Self::new("sum-of-products", Self::expansion(distributive::DISTRIBUTE_AND))
    }

    /// Expansion into conjunctive normal form.
    pub fn product_of_sums() -> Self {
        Self::new("product-of-sums", Self::expansion(distributive::DISTRIBUTE_OR))
    }

    fn expansion(distribute: &[Rule]) -> Vec<Rule> {
        let mut rules = Vec::new();
        rules.extend_from_slice(constants::RULES);
        rules.extend_from_slice(negation::DOUBLE_NEGATION);
        rules.extend_from_slice(negation::DE_MORGAN);
        rules.extend_from_slice(derived::NEGATED_PARITY);
        rules.extend_from_slice(derived::EXPANSIONS);
        rules.extend_from_slice(distribute);
        rules.extend_from_slice(idempotence::RULES);
        rules.extend_from_slice(complement::RULES);
        rules
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First rule of the set that rewrites `expr`, with its result.
    pub fn first_match(&self, expr: &Expr) -> Option<(&Rule, Expr)> {
        self.rules
            .iter()
            .find_map(|rule| rule.try_apply(expr).map(|rewritten| (rule, rewritten)))
    }
}

/// Outcome of running a [`RuleSet`] to a fixed point.
#[derive(Debug, Clone, PartialEq)]
pub struct Simplified {
    pub expr: Expr,
    /// Passes that changed the tree.
    pub iterations: usize,
    /// The bound stopped rewriting before a fixed point was reached.
    pub max_iterations_reached: bool,
    /// The node limit declined a rewrite or stopped the run.
    pub size_limit_reached: bool,
    /// Names of the applied rules, in application order.
    pub applied: Vec<&'static str>,
}

/// Fixed-point driver for a [`RuleSet`].
#[derive(Debug, Clone, Copy)]
pub struct Rewriter<'a> {
    rules: &'a RuleSet,
    max_iterations: usize,
    max_nodes: Option<usize>,
}

impl<'a> Rewriter<'a> {
    pub fn new(rules: &'a RuleSet, max_iterations: usize) -> Self {
        Self {
            rules,
            max_iterations,
            max_nodes: None,
        }
    }

    /// Bound the size of rewritten nodes and of the tree between passes.
    pub fn with_node_limit(self, max_nodes: usize) -> Self {
        Self {
            max_nodes: Some(max_nodes),
            ..self
        }
    }

    fn over_limit(&self, expr: &Expr) -> bool {
        self.max_nodes.is_some_and(|limit| expr.exceeds_size(limit))
    }

    /// Apply one bottom-up pass; `None` if no rule fired anywhere.
    ///
    /// Sets `limited` when a rewrite was declined for exceeding the node limit.
    pub fn pass(&self, expr: &Expr, applied: &mut Vec<&'static str>, limited: &mut bool) -> Option<Expr> {
        visit::rewrite_bottom_up(expr, &mut |node: &Expr| {
            let (rule, rewritten) = self.rules.first_match(node)?;
            if self.over_limit(&rewritten) {
                debug!("{}: declined, result exceeds the node limit", rule.name);
                *limited = true;
                return None;
            }
            debug!("{}: {} => {}", rule.name, node, rewritten);
            applied.push(rule.name);
            Some(rewritten)
        })
    }

    /// Run passes until nothing changes, the iteration bound is hit or the
    /// tree outgrows the node limit.
    pub fn run(&self, expr: &Expr) -> Simplified {
        debug!("rewrite(set = {}, expr = {})", self.rules.name(), expr);
        let mut current = expr.clone();
        let mut applied = Vec::new();
        let mut limited = false;
        for iteration in 0..self.max_iterations {
            match self.pass(&current, &mut applied, &mut limited) {
                Some(next) if next != current => {
                    current = next;
                    if limited || self.over_limit(&current) {
                        debug!("node limit reached after {} passes", iteration + 1);
                        return Simplified {
                            expr: current,
                            iterations: iteration + 1,
                            max_iterations_reached: false,
                            size_limit_reached: true,
                            applied,
                        };
                    }
                }
                _ => {
                    debug!("fixed point after {} passes: {}", iteration, current);
                    return Simplified {
                        expr: current,
                        iterations: iteration,
                        max_iterations_reached: false,
                        size_limit_reached: limited,
                        applied,
                    };
                }
            }
        }
        debug!("iteration bound {} reached: {}", self.max_iterations, current);
        Simplified {
            expr: current,
            iterations: self.max_iterations,
            max_iterations_reached: true,
            size_limit_reached: false,
            applied,
        }
    }
}

impl Simplified {
    /// Whether rewriting reached a fixed point with no bound getting in the way.
    pub fn is_complete(&self) -> bool {
        !self.max_iterations_reached && !self.size_limit_reached
    }
}

impl RuleSet {
    /// Shorthand for `Rewriter::new(self, max_iterations).run(expr)`.
    pub fn run(&self, expr: &Expr, max_iterations: usize) -> Simplified {
        Rewriter::new(self, max_iterations).run(expr)
    }

    /// Like [`RuleSet::run`], with the tree held to at most `max_nodes` nodes.
    pub fn run_bounded(&self, expr: &Expr, max_iterations: usize, max_nodes: usize) -> Simplified {
        Rewriter::new(self, max_iterations).with_node_limit(max_nodes).run(expr)
    }
}
