//! Redis Proxy - a read-through caching proxy for Redis
//!
//! Resolves keys through a bounded, time-expiring local cache before falling
//! back to the backing Redis instance. Keys can be looked up over HTTP
//! (`GET /?key=<KEY>`) or over a minimal RESP endpoint accepting `GET`.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod protocol;
pub mod resolver;
pub mod resp;
pub mod state;
pub mod store;
pub mod tasks;

pub use config::Config;
pub use error::ResolveError;
pub use resolver::Resolver;
pub use state::AppState;
pub use tasks::spawn_cleanup_task;
