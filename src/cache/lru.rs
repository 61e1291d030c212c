//! Bounded cache with least-recently-used eviction.
//!
//! Entries carry a logical timestamp; an ordered index from timestamp to key
//! finds the eviction victim in `O(log n)`.
//!
//! # Use Cases
//!
//! - Evaluation memoization, where truth-table style access revisits the same
//!   `(expression, assignment)` keys in bursts

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// A fixed-capacity cache evicting the least recently used entry.
pub struct LruCache<K, V> {
    map: HashMap<K, (V, u64)>,
    order: BTreeMap<u64, K>,
    capacity: usize,
    tick: u64,
    hits: usize,
    misses: usize,
    evictions: usize,
}

impl<K, V> LruCache<K, V> {
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A capacity of zero disables caching: every insert is dropped.
    pub fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity.min(1 << 12)),
            order: BTreeMap::new(),
            capacity,
            tick: 0,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Returns the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Returns the number of evicted entries.
    pub fn evictions(&self) -> usize {
        self.evictions
    }

    /// Clears all entries. Statistics are kept.
    pub fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Looks up a key, marking it as most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.tick += 1;
        let tick = self.tick;
        match self.map.get_mut(key) {
            Some((value, stamp)) => {
                self.hits += 1;
                self.order.remove(stamp);
                self.order.insert(tick, key.clone());
                *stamp = tick;
                Some(value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Inserts a key-value pair, evicting the least recently used entry when full.
    pub fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        self.tick += 1;
        if let Some((_, stamp)) = self.map.get(&key) {
            self.order.remove(stamp);
        } else if self.map.len() >= self.capacity {
            if let Some((_, victim)) = self.order.pop_first() {
                self.map.remove(&victim);
                self.evictions += 1;
            }
        }
        self.order.insert(self.tick, key.clone());
        self.map.insert(key, (value, self.tick));
    }
}
