//! Engine configuration.

/// Tunables of an [`Engine`][crate::engine::Engine].
///
/// Use `EngineConfig::default()` for standard settings.
///
/// # Examples
///
/// ```
/// use boolmin::config::EngineConfig;
/// use boolmin::engine::Engine;
///
/// let config = EngineConfig {
///     eval_cache_capacity: 0, // no evaluation memoization
///     max_iterations: 16,
///     ..EngineConfig::default()
/// };
/// let engine = Engine::new(config);
/// assert_eq!(engine.config().max_iterations, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Entries in the evaluation cache (default: 4096)
    pub eval_cache_capacity: usize,
    /// Entries in the minterm-set cache (default: 256)
    pub minterm_cache_capacity: usize,
    /// Entries in the variable-importance cache (default: 256)
    pub importance_cache_capacity: usize,
    /// Entries in the Karnaugh map layout cache (default: 8)
    pub kmap_cache_capacity: usize,
    /// Passes of the rule engine before giving up on a fixed point (default: 64)
    pub max_iterations: usize,
    /// Passes of the rule engine after a minimization strategy (default: 8)
    pub cleanup_iterations: usize,
    /// Largest variable count for truth tables, minterms, equivalence checks and
    /// truth-table based minimization (default: 16)
    pub max_exact_variables: usize,
    /// Largest tree the sum-of-products and product-of-sums expansions may build (default: 4096)
    pub max_expansion_nodes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            eval_cache_capacity: 4096,
            minterm_cache_capacity: 256,
            importance_cache_capacity: 256,
            kmap_cache_capacity: 8,
            max_iterations: 64,
            cleanup_iterations: 8,
            max_exact_variables: 16,
            max_expansion_nodes: 4096,
        }
    }
}
