use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Creates all routes with state
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::get_metrics))
        .route("/api/cache/stats", get(handlers::get_cache_stats))
        .route("/api/cache/peers", get(handlers::get_peers))
        .route("/api/cache/entries", post(handlers::fetch_entries))
        .route("/api/cache/entries/{*key}", get(handlers::get_entry))
        .with_state(state)
}
