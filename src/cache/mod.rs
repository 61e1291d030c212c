//! Bounded memoization caches.
//!
//! Caches are a pure performance optimization: a miss recomputes the same
//! result. Both implementations hold a fixed maximum number of entries.
//!
//! | Implementation | Eviction | `get` cost | Use Case |
//! |----------------|----------|------------|----------|
//! | [`LruCache`] | least recently used | `O(log n)` | Evaluation results (hot, bursty keys) |
//! | [`FifoCache`] | oldest inserted | `O(1)` | Minterm sets, importance scores, map layouts |
//!
//! # Example
//!
//! ```
//! use boolmin::cache::{FifoCache, LruCache};
//!
//! let mut cache = LruCache::<(String, String), bool>::new(2);
//! cache.insert(("A*B".to_string(), "A=1,B=1".to_string()), true);
//! assert_eq!(cache.get(&("A*B".to_string(), "A=1,B=1".to_string())), Some(&true));
//!
//! let mut layouts = FifoCache::<usize, &str>::new(4);
//! layouts.insert(4, "4x4");
//! assert_eq!(layouts.get(&4), Some(&"4x4"));
//! ```

mod fifo;
mod lru;

pub use fifo::FifoCache;
pub use lru::LruCache;
