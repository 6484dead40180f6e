//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a simple reference model.

use proptest::prelude::*;
use std::collections::{HashMap, VecDeque};
use std::thread::sleep;
use std::time::Duration;

use crate::cache::CacheStore;

// == Test Configuration ==
const TEST_TTL: Option<Duration> = Some(Duration::from_secs(300));

// == Strategies ==
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,3}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Insert { key: String, value: String },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Insert { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

// == Reference Model ==
/// Straightforward LRU: a map plus a recency queue, most recent at the back.
struct ModelLru {
    capacity: usize,
    values: HashMap<String, String>,
    recency: VecDeque<String>,
}

impl ModelLru {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            values: HashMap::new(),
            recency: VecDeque::new(),
        }
    }

    fn touch(&mut self, key: &str) {
        self.recency.retain(|k| k != key);
        self.recency.push_back(key.to_string());
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let value = self.values.get(key).cloned()?;
        self.touch(key);
        Some(value)
    }

    fn insert(&mut self, key: String, value: String) {
        if !self.values.contains_key(&key) && self.values.len() >= self.capacity {
            if let Some(oldest) = self.recency.pop_front() {
                self.values.remove(&oldest);
            }
        }
        self.touch(&key);
        self.values.insert(key, value);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any sequence of inserts and lookups behaves exactly like the reference LRU.
    #[test]
    fn prop_matches_reference_lru(
        capacity in 1usize..8,
        ops in prop::collection::vec(cache_op_strategy(), 1..100)
    ) {
        let mut store = CacheStore::new(capacity, TEST_TTL);
        let mut model = ModelLru::new(capacity);

        for op in ops {
            match op {
                CacheOp::Insert { key, value } => {
                    store.insert(key.clone(), value.clone());
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(store.get(&key), model.get(&key), "lookup of {} diverged", key);
                }
            }
            prop_assert!(store.len() <= capacity, "size {} exceeds capacity {}", store.len(), capacity);
        }
    }

    // Hit and miss counters account for every lookup.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = CacheStore::new(4, TEST_TTL);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Insert { key, value } => store.insert(key, value),
                CacheOp::Get { key } => match store.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.total_entries, store.len());
    }

    // The most recently inserted key always survives its own insertion.
    #[test]
    fn prop_latest_insert_is_retrievable(
        capacity in 1usize..8,
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..50)
    ) {
        let mut store = CacheStore::new(capacity, TEST_TTL);

        for (key, value) in entries {
            store.insert(key.clone(), value.clone());
            prop_assert_eq!(store.get(&key), Some(value));
        }
    }
}

// Fewer cases for the time-sensitive property
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // No entry is served once the global lifetime has elapsed.
    #[test]
    fn prop_ttl_expiration_behavior(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..10)
    ) {
        let mut store = CacheStore::new(0, Some(Duration::from_millis(50)));

        for (key, value) in &entries {
            store.insert(key.clone(), value.clone());
        }

        sleep(Duration::from_millis(80));

        for (key, _) in &entries {
            prop_assert_eq!(store.get(key), None, "{} outlived its TTL", key);
        }
        prop_assert!(store.is_empty());
    }
}
