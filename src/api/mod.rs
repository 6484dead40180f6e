//! API Module
//!
//! HTTP front end of the proxy.
//!
//! # Endpoints
//! - `GET /?key=<KEY>` - Resolve a key
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod rate_limit;
pub mod routes;

pub use handlers::*;
pub use rate_limit::RateLimiter;
pub use routes::create_router;
