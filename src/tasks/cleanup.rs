//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries, so
//! memory held by keys nobody asks for again is released.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task sweeping expired entries every `interval`.
///
/// Lookups already ignore expired entries; the sweep only reclaims space.
/// The returned handle is aborted at shutdown.
///
/// # Example
/// ```ignore
/// let cache = SharedCache::new(1000, Some(Duration::from_secs(60)));
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: SharedCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting TTL cleanup task with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = cache.cleanup_expired().await;
            if removed > 0 {
                let stats = cache.stats().await;
                info!(
                    removed,
                    remaining = stats.total_entries,
                    hit_rate = stats.hit_rate(),
                    "TTL cleanup removed expired entries"
                );
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
