//! Request and Response models for the proxy HTTP API

pub mod requests;
pub mod responses;

pub use requests::KeyQuery;
pub use responses::{HealthResponse, StatsResponse};
