//! Liveness probe
//!
//! Public route. Reports "degraded" with a 503 when the store can't be queried.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use songbook_common::catalog;
use tracing::warn;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub database: &'static str,
    /// Catalog size, absent when the store is unreachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub songs: Option<i64>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let songs = match catalog::count_songs(&state.db).await {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("Health check could not reach the database: {}", e);
            None
        }
    };

    let (code, status, database) = if songs.is_some() {
        (StatusCode::OK, "ok", "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
    };

    let body = HealthResponse {
        status,
        module: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        database,
        songs,
    };

    (code, Json(body))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
