use crate::{
    dto::{CacheStatsResponse, FetchEntriesRequest, FetchEntriesResponse, FetchedEntry},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use ferrous_galaxy_domain::DomainError;
use tracing::{debug, instrument, warn};

#[instrument(skip(state), name = "api_get_cache_stats")]
pub async fn get_cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let stats = state.get_stats.execute();

    let hits = stats.main_cache_hits + stats.hot_cache_hits;
    let hit_rate = if stats.gets > 0 {
        (hits as f64 / stats.gets as f64) * 100.0
    } else {
        0.0
    };

    debug!(gets = stats.gets, hit_rate = hit_rate, "Cache statistics calculated");

    Json(CacheStatsResponse {
        group: state.engine.name().to_string(),
        stats,
        hit_rate,
    })
}

/// Reads one bucket cache key through the engine, loading it on a miss.
#[instrument(skip(state), name = "api_get_cache_entry")]
pub async fn get_entry(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    match state.engine.get(&key).await {
        Ok(value) => Ok((
            [(header::CONTENT_TYPE, "application/octet-stream")],
            value,
        )),
        Err(e) => {
            warn!(key = %key, error = %e, "Cache entry request failed");
            Err((status_for(&e), e.to_string()))
        }
    }
}

/// Multi-key read. Keys that fail or hold an empty value are reported as
/// missing.
#[instrument(skip(state, request), name = "api_fetch_cache_entries")]
pub async fn fetch_entries(
    State(state): State<AppState>,
    Json(request): Json<FetchEntriesRequest>,
) -> Json<FetchEntriesResponse> {
    debug!(keys = request.keys.len(), "Fetching cache entries");
    let found = state.fetch_entries.execute(&request.keys).await;

    let mut response = FetchEntriesResponse::default();
    for key in request.keys {
        match found.get(&key) {
            Some(value) => {
                response.entries.insert(
                    key,
                    FetchedEntry {
                        size: value.len(),
                        value: STANDARD.encode(value),
                    },
                );
            }
            None if !response.missing.contains(&key) => response.missing.push(key),
            None => {}
        }
    }

    Json(response)
}

fn status_for(error: &DomainError) -> StatusCode {
    match error {
        e if e.is_decode_error() => StatusCode::BAD_REQUEST,
        DomainError::UnconfiguredPath { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::Backend { .. } => StatusCode::BAD_GATEWAY,
        DomainError::LoadCancelled(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
