//! Shared Cache Module
//!
//! Internally synchronized handle over [`CacheStore`] for concurrent request
//! handlers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore};

// == Shared Cache ==
/// Cheaply cloneable, concurrency-safe cache handle.
///
/// Every clone refers to the same underlying store. Callers never see the
/// lock; each operation acquires and releases it internally.
#[derive(Debug, Clone)]
pub struct SharedCache {
    inner: Arc<RwLock<CacheStore>>,
}

impl SharedCache {
    /// Creates a cache holding at most `capacity` entries (0 = unbounded),
    /// each living for `ttl` (None = forever).
    pub fn new(capacity: usize, ttl: Option<Duration>) -> Self {
        Self::from_store(CacheStore::new(capacity, ttl))
    }

    pub fn from_store(store: CacheStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Looks `key` up. Takes the write lock because a hit updates recency.
    pub async fn get(&self, key: &str) -> Option<String> {
        self.inner.write().await.get(key)
    }

    pub async fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.write().await.insert(key.into(), value.into());
    }

    /// Presence check that leaves recency and statistics untouched.
    pub async fn contains(&self, key: &str) -> bool {
        self.inner.read().await.contains(key)
    }

    pub async fn cleanup_expired(&self) -> usize {
        self.inner.write().await.cleanup_expired()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
