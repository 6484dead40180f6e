//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{get_handler, health_handler, stats_handler};
use super::rate_limit::limit_requests;
use crate::state::AppState;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /?key=<KEY>` - Resolve a key through the cache
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Rate limit: per-client requests-per-second ceiling, 429 when exceeded.
///   Serve with `into_make_service_with_connect_info::<SocketAddr>()` so the
///   limiter can see peer addresses
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(get_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn_with_state(
            state.limiter.clone(),
            limit_requests,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
