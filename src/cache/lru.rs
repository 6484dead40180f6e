//! LRU Tracker Module
//!
//! Recency ordering for cache eviction.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks access order for the least-recently-used eviction policy.
///
/// Every touch stamps the key with a fresh, strictly increasing tick. The
/// smallest live tick is the least recently used key.
#[derive(Debug, Default)]
pub(crate) struct LruTracker {
    /// Key -> tick of its last use
    ticks: HashMap<String, u64>,
    /// Tick -> key, ordered oldest first
    order: BTreeMap<u64, String>,
    /// Next tick to hand out
    clock: u64,
}

impl LruTracker {
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as the most recently used one.
    pub fn touch(&mut self, key: &str) {
        let tick = self.clock;
        self.clock += 1;

        match self.ticks.get_mut(key) {
            Some(previous) => {
                self.order.remove(&*previous);
                *previous = tick;
            }
            None => {
                self.ticks.insert(key.to_string(), tick);
            }
        }
        self.order.insert(tick, key.to_string());
    }

    // == Remove ==
    /// Stops tracking a key. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) {
        if let Some(tick) = self.ticks.remove(key) {
            self.order.remove(&tick);
        }
    }

    // == Evict Oldest ==
    /// Returns and forgets the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.ticks.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    #[cfg(test)]
    fn contains(&self, key: &str) -> bool {
        self.ticks.contains_key(key)
    }
}
