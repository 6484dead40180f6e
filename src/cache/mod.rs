//! Cache Module
//!
//! Local bounded cache with LRU eviction and a global entry lifetime.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub(crate) use entry::CacheEntry;
pub(crate) use lru::LruTracker;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::CacheStore;
