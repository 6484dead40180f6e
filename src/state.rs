//! Shared application state
//!
//! Everything both front ends need to resolve a key.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::api::RateLimiter;
use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::Result;
use crate::resolver::{deadline_after, Resolver};
use crate::store::RemoteStore;

/// State shared by the HTTP handlers and the RESP connection tasks.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside resolver
    pub resolver: Resolver,
    /// Per-lookup store deadline, None = unbounded
    pub store_timeout: Option<Duration>,
    /// Global HTTP request limiter
    pub limiter: RateLimiter,
}

impl AppState {
    /// Creates a state with no store deadline and no rate limit.
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            store_timeout: None,
            limiter: RateLimiter::new(0),
        }
    }

    /// Creates the state described by `config` on top of `store`.
    pub fn from_config(config: &Config, store: Arc<dyn RemoteStore>) -> Self {
        let cache = SharedCache::new(config.key_size, config.global_expiry());
        Self::new(Resolver::new(cache, store))
            .with_store_timeout(config.store_timeout())
            .with_rate_limit(config.rate_limit_rps)
    }

    pub fn with_store_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn with_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.limiter = RateLimiter::new(requests_per_second);
        self
    }

    pub fn cache(&self) -> &SharedCache {
        self.resolver.cache()
    }

    /// Deadline for a lookup starting now.
    pub fn deadline(&self) -> Option<Instant> {
        deadline_after(self.store_timeout)
    }

    /// Resolves `key` under the configured deadline.
    pub async fn resolve(&self, key: &str) -> Result<String> {
        self.resolver.get(key, self.deadline()).await
    }
}
