//! HTTP Handlers

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use market_intel::MarketSnapshot;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
    pub snapshot_primed: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.cache.provider_name().to_string(),
        snapshot_primed: state.cache.is_primed().await,
    })
}

/// Market snapshot endpoint
///
/// Serves the cached snapshot, refreshing when expired. A provider
/// failure only reaches the client while the cache is still empty;
/// afterwards the stale snapshot is served instead.
pub async fn markets_handler(
    State(state): State<AppState>,
) -> Result<Json<Arc<MarketSnapshot>>, (StatusCode, Json<ErrorResponse>)> {
    match state.cache.get_or_refresh().await {
        Ok(snapshot) => Ok(Json(snapshot)),
        Err(e) => {
            tracing::error!("Market data unavailable: {}", e);
            let (status, code) = if e.is_rate_limited() {
                (StatusCode::SERVICE_UNAVAILABLE, "RATE_LIMITED")
            } else {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR")
            };
            Err((
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                    code: code.into(),
                }),
            ))
        }
    }
}
