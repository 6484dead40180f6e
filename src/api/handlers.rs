//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::Result;
use crate::models::{HealthResponse, KeyQuery, StatsResponse};
use crate::state::AppState;

/// Handler for GET /?key=<KEY>
///
/// Responds with the value as a JSON string. Any failure, not-found
/// included, is a plain-text 500.
pub async fn get_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<String>> {
    let value = state.resolve(&query.key).await?;
    Ok(Json(value))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache().stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
