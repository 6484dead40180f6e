//! Redis-backed implementation of [`RemoteStore`].

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{debug, info};

use super::{RemoteStore, StoreError};

/// Remote store speaking to a Redis server over a managed connection.
///
/// The connection manager multiplexes concurrent requests over one
/// connection and re-establishes it after failures, so the handle is cheap
/// to clone and share.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    /// Connects to the Redis server at `url` (e.g. `redis://127.0.0.1:6379/`).
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;
        info!("Connected to Redis at {}", url);
        Ok(Self { connection })
    }
}

#[async_trait]
impl RemoteStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut connection = self.connection.clone();
        let value: Option<String> = connection.get(key).await?;
        debug!(key, found = value.is_some(), "Redis GET");
        Ok(value)
    }
}
