//! In-process implementation of [`RemoteStore`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RemoteStore, StoreError};

/// A store held in process memory.
///
/// Counts every lookup it serves, can be switched into a failing mode and
/// can delay its replies, which makes it the stand-in for Redis when
/// exercising the proxy without a server.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<HashMap<String, String>>>,
    calls: Arc<AtomicUsize>,
    failure: Arc<RwLock<Option<String>>>,
    latency: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `pairs`.
    pub fn with_entries<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let data = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            data: Arc::new(RwLock::new(data)),
            ..Self::default()
        }
    }

    /// Delays every lookup by `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub async fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.data.write().await.insert(key.into(), value.into());
    }

    /// Makes every subsequent lookup fail with `message`, or recover with None.
    pub async fn fail_with(&self, message: Option<&str>) {
        *self.failure.write().await = message.map(str::to_string);
    }

    /// Number of lookups served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(message) = self.failure.read().await.clone() {
            return Err(StoreError::Unavailable(message));
        }
        Ok(self.data.read().await.get(key).cloned())
    }
}
