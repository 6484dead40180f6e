//! Resolution Engine
//!
//! Cache-aside lookup: answer from the local cache when possible, otherwise
//! fetch from the backing store and remember the result.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cache::SharedCache;
use crate::error::{ResolveError, Result};
use crate::store::{RemoteStore, StoreError};

// == Resolver ==
/// Resolves keys through the local cache, falling back to the remote store.
///
/// Concurrent misses on the same key each query the store and each insert
/// the result. Both writes carry the same value, so the race is harmless.
#[derive(Clone)]
pub struct Resolver {
    cache: SharedCache,
    store: Arc<dyn RemoteStore>,
}

impl Resolver {
    pub fn new(cache: SharedCache, store: Arc<dyn RemoteStore>) -> Self {
        Self { cache, store }
    }

    /// The cache this resolver fills.
    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    // == Get ==
    /// Resolves `key`.
    ///
    /// A cache hit returns without touching the store. On a miss the store
    /// is queried exactly once; if `deadline` passes first the lookup is
    /// abandoned as a [`StoreError::Timeout`]. Only successful lookups are
    /// cached.
    pub async fn get(&self, key: &str, deadline: Option<Instant>) -> Result<String> {
        if let Some(value) = self.cache.get(key).await {
            debug!(key, "cache hit");
            return Ok(value);
        }

        debug!(key, "cache miss, querying store");
        let lookup = self.store.get(key);
        let outcome = match deadline {
            Some(deadline) => {
                let budget = deadline.saturating_duration_since(Instant::now());
                tokio::time::timeout_at(deadline, lookup)
                    .await
                    .map_err(|_| StoreError::Timeout(budget))?
            }
            None => lookup.await,
        };

        match outcome {
            Ok(Some(value)) => {
                self.cache.insert(key, value.clone()).await;
                Ok(value)
            }
            Ok(None) => {
                debug!(key, "key absent from store");
                Err(ResolveError::NotFound)
            }
            Err(err) => {
                warn!(key, error = %err, "store lookup failed");
                Err(err.into())
            }
        }
    }
}

/// Deadline `timeout` from now, if a timeout is configured.
pub fn deadline_after(timeout: Option<Duration>) -> Option<Instant> {
    timeout.map(|timeout| Instant::now() + timeout)
}
