//! Liveness and health handlers.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use tracing::warn;

use pvz_core::metrics::Metrics;
use pvz_core::traits::cache::CacheProvider;
use pvz_database::connection::health_check;

use crate::dto::response::HealthResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /ping
pub async fn ping() -> &'static str {
    "pong"
}

/// GET /health
///
/// Reports database and cache reachability. Responds 503 if either is down.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database_up = match health_check(&state.db_pool).await {
        Ok(up) => up,
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            false
        }
    };
    let cache_up = match state.cache.health_check().await {
        Ok(up) => up,
        Err(e) => {
            warn!(error = %e, "Cache health check failed");
            false
        }
    };

    let healthy = database_up && cache_up;
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let label = |up: bool| if up { "up" } else { "down" }.to_string();

    (
        status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: label(database_up),
            cache: label(cache_up),
        }),
    )
}

/// GET /metrics
pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = state.metrics.encode()?;
    Ok(([(header::CONTENT_TYPE, Metrics::content_type())], body))
}
