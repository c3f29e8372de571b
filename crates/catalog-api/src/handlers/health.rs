//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::state::AppState;

/// Health check response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// `"connected"`, `"unavailable"` or `"not_configured"`.
    pub database: &'static str,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match &state.database {
        Some(pool) => match pool.ping().await {
            Ok(()) => "connected",
            Err(e) => {
                tracing::warn!(error = %e, "Health check database ping failed");
                "unavailable"
            }
        },
        None => "not_configured",
    };

    let (status_code, status) = if database == "unavailable" {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    } else {
        (StatusCode::OK, "ok")
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}
