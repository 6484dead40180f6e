//! Remote Store Module
//!
//! The source-of-truth key/value store consulted on a cache miss.

mod memory;
mod redis_store;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

// == Store Error ==
/// Any store failure other than "key absent".
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error reported by the Redis client (I/O, protocol, server error)
    #[error(transparent)]
    Redis(#[from] ::redis::RedisError),

    /// The lookup did not complete before the caller's deadline
    #[error("store lookup timed out after {0:?}")]
    Timeout(Duration),

    /// The store could not serve the request
    #[error("{0}")]
    Unavailable(String),
}

// == Remote Store ==
/// Read-only access to the backing store.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetches the value stored under `key`.
    ///
    /// `Ok(None)` means the key does not exist; it is never reported as an
    /// error.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
}
