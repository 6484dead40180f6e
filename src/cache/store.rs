//! Cache Store Module
//!
//! Bounded key/value map with LRU eviction and a single global entry lifetime.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Cache Store ==
/// Fixed-capacity, time-expiring cache of string values.
///
/// A capacity of zero means the cache is unbounded and a missing TTL means
/// entries never expire.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed (0 = unbounded)
    capacity: usize,
    /// Lifetime applied to every inserted entry
    ttl: Option<Duration>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, 0 for no limit
    /// * `ttl` - Lifetime of every entry, None for no expiry
    pub fn new(capacity: usize, ttl: Option<Duration>) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity,
            ttl,
        }
    }

    // == Get ==
    /// Returns the cached value for `key`, if present and still live.
    ///
    /// An expired entry is dropped on the spot and reported as absent. A hit
    /// makes the key the most recently used one.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired(),
        };

        if expired {
            self.remove(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Insert ==
    /// Stores `value` under `key` with the cache-wide TTL.
    ///
    /// Overwriting an existing key resets its lifetime. Inserting a new key
    /// into a full cache first evicts the least recently used entry.
    pub fn insert(&mut self, key: String, value: String) {
        if self.capacity > 0 && !self.entries.contains_key(&key) {
            while self.entries.len() >= self.capacity {
                match self.lru.evict_oldest() {
                    Some(evicted) => {
                        self.entries.remove(&evicted);
                        self.stats.record_eviction();
                    }
                    None => break,
                }
            }
        }

        self.lru.touch(&key);
        self.entries.insert(key, CacheEntry::new(value, self.ttl));
        self.stats.set_total_entries(self.entries.len());
    }

    /// Returns true if `key` holds a live entry, without touching recency
    /// or statistics.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Cleanup Expired ==
    /// Removes every expired entry and returns how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove(key);
        }

        self.stats.record_expirations(expired.len());
        expired.len()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the current number of entries, expired ones included until
    /// they are swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.lru.remove(key);
        self.stats.set_total_entries(self.entries.len());
    }
}
