//! Bounded cache with first-in-first-out eviction.
//!
//! Lookups do not reorder entries, so `get` is a plain hash lookup.
//!
//! # Use Cases
//!
//! - Per-expression results that are expensive to compute but rarely hot
//!   (minterm sets, variable importance, map layouts)

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// A fixed-capacity cache evicting the oldest inserted entry.
pub struct FifoCache<K, V> {
    map: HashMap<K, V>,
    queue: VecDeque<K>,
    capacity: usize,
    hits: usize,
    misses: usize,
}

impl<K, V> FifoCache<K, V> {
    /// Creates a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity.min(1 << 12)),
            queue: VecDeque::with_capacity(capacity.min(1 << 12)),
            capacity,
            hits: 0,
            misses: 0,
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

    /// Clears all entries. Statistics are kept.
    pub fn clear(&mut self) {
        self.map.clear();
        self.queue.clear();
    }
}

impl<K, V> FifoCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Looks up a key in the cache.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.map.get(key) {
            Some(v) => {
                self.hits += 1;
                Some(v)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Inserts a key-value pair, evicting the oldest entry when full.
    pub fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        if self.map.contains_key(&key) {
            self.map.insert(key, value);
            return;
        }
        while self.map.len() >= self.capacity {
            match self.queue.pop_front() {
                Some(oldest) => {
                    self.map.remove(&oldest);
                }
                None => break,
            }
        }
        self.queue.push_back(key.clone());
        self.map.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_cache_basic() {
        let mut cache = FifoCache::<(u64, u64), i32>::new(4);

        cache.insert((1, 2), 42);
        assert_eq!(cache.get(&(1, 2)), Some(&42));
        assert_eq!(cache.get(&(2, 1)), None);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn test_fifo_cache_evicts_oldest_regardless_of_use() {
        let mut cache = FifoCache::<&str, i32>::new(2);

        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.get(&"a"), Some(&1));
        cache.insert("c", 3);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.get(&"c"), Some(&3));
    }

    #[test]
    fn test_fifo_cache_bounded() {
        let mut cache = FifoCache::<u32, u32>::new(16);
        for i in 0..1000 {
            cache.insert(i, i);
        }
        assert_eq!(cache.len(), 16);
        for i in 984..1000 {
            assert_eq!(cache.get(&i), Some(&i));
        }
    }
}
