//! Error types for the proxy
//!
//! Outcomes of resolving a key and how the HTTP front end renders them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store::StoreError;

// == Resolve Error ==
/// Why a key could not be resolved.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Key is absent from both the cache and the backing store
    #[error("key not found")]
    NotFound,

    /// The backing store failed for any other reason
    #[error("{0}")]
    TransientFailure(#[from] StoreError),
}

impl ResolveError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::NotFound)
    }
}

// == IntoResponse Implementation ==
/// Every resolution failure is a plain-text 500 carrying the error message,
/// whatever its cause.
impl IntoResponse for ResolveError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

// == Result Type Alias ==
pub type Result<T> = std::result::Result<T, ResolveError>;
