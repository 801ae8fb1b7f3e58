// crates/sl-geodb-core/src/cache.rs

//! Bounded query-result cache.
//!
//! Entries are evicted least-recently-used first once the configured
//! capacity is reached; a hit refreshes the entry. There is no TTL. Keys are
//! structured ([`CacheKey`]) so that two different operations can never
//! collide through string formatting.

use crate::model::LocationKind;
use lru::LruCache;
use parking_lot::Mutex;
use std::hash::Hash;
use std::num::NonZeroUsize;
use tracing::trace;

/// Default maximum number of cached results.
pub const DEFAULT_CACHE_SIZE: usize = 1000;

/// Statistics for cache monitoring
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Operation plus normalized arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Autocomplete {
        query: String,
        limit: usize,
    },
    Search {
        query: String,
        limit: usize,
        /// `f64::to_bits` of the minimum score, so the key stays `Eq + Hash`.
        min_score_bits: u64,
        kinds: Vec<LocationKind>,
        fuzzy: bool,
    },
    Suggestions {
        partial: String,
        kind: Option<LocationKind>,
        limit: usize,
    },
}

struct Inner<K: Hash + Eq, V> {
    entries: LruCache<K, V>,
    stats: CacheStats,
}

/// Thread-safe LRU cache with hit/miss accounting.
pub struct CacheLayer<K: Hash + Eq, V> {
    inner: Mutex<Inner<K, V>>,
}

impl<K: Hash + Eq, V: Clone> CacheLayer<K, V> {
    /// A cache holding at most `max_size` entries (at least one).
    pub fn new(max_size: usize) -> Self {
        let cap = NonZeroUsize::new(max_size).unwrap_or(NonZeroUsize::MIN);
        CacheLayer {
            inner: Mutex::new(Inner {
                entries: LruCache::new(cap),
                stats: CacheStats::default(),
            }),
        }
    }

    /// Cached value for `key`, marking it most recently used.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.lock();
        let hit = inner.entries.get(key).cloned();
        match hit {
            Some(v) => {
                inner.stats.hits += 1;
                Some(v)
            }
            None => {
                inner.stats.misses += 1;
                None
            }
        }
    }

    /// Store `value`, evicting the least recently used entry when full.
    pub fn set(&self, key: K, value: V) {
        let mut inner = self.inner.lock();
        let full = inner.entries.len() >= inner.entries.cap().get();
        if full && !inner.entries.contains(&key) {
            inner.stats.evictions += 1;
            trace!("cache full, evicting least recently used entry");
        }
        inner.entries.put(key, value);
    }

    /// Whether `key` is cached, without touching its recency.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().entries.contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().entries.cap().get()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats
    }

    /// Drop every entry and reset statistics.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.stats = CacheStats::default();
    }
}

impl<K: Hash + Eq, V> std::fmt::Debug for CacheLayer<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("CacheLayer")
            .field("len", &inner.entries.len())
            .field("capacity", &inner.entries.cap())
            .field("stats", &inner.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_least_recently_used() {
        let cache: CacheLayer<&str, u32> = CacheLayer::new(2);
        cache.set("a", 1);
        cache.set("b", 2);
        // touch "a" so "b" becomes the oldest
        assert_eq!(cache.get(&"a"), Some(1));
        cache.set("c", 3);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
        assert!(cache.contains(&"c"));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn overwrite_does_not_evict() {
        let cache: CacheLayer<&str, u32> = CacheLayer::new(2);
        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("a", 10);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a"), Some(10));
        assert_eq!(cache.get(&"b"), Some(2));
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn counts_hits_and_misses() {
        let cache: CacheLayer<String, u32> = CacheLayer::new(DEFAULT_CACHE_SIZE);
        assert_eq!(cache.get(&"x".to_string()), None);
        cache.set("x".into(), 1);
        assert_eq!(cache.get(&"x".to_string()), Some(1));
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (1, 1));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let cache: CacheLayer<u8, u8> = CacheLayer::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.set(1, 1);
        cache.set(2, 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&2));
    }

    #[test]
    fn structured_keys_differ_by_operation() {
        let cache: CacheLayer<CacheKey, u8> = CacheLayer::new(8);
        cache.set(
            CacheKey::Autocomplete {
                query: "bo".into(),
                limit: 10,
            },
            1,
        );
        let other = CacheKey::Suggestions {
            partial: "bo".into(),
            kind: None,
            limit: 10,
        };
        assert_eq!(cache.get(&other), None);
    }
}
