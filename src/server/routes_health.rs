//! Probes and Prometheus exposition.
//!
//! `/healthz` answers as long as the process serves HTTP. `/readyz` rides on
//! [`crate::db::Database::health_check`] under a short timeout and flips to
//! 503 while the store is unreachable, which takes the backend out of the
//! load balancer until connectivity returns. `/metrics` renders the registry
//! from [`crate::prom_metrics`].

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;

/// Budget for the readiness probe's `SELECT 1`.
const READY_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// GET /healthz — Liveness.
pub async fn handler_healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// GET /readyz — Readiness; 503 when the store misses the check budget.
pub async fn handler_readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match tokio::time::timeout(READY_CHECK_TIMEOUT, state.db.health_check()).await {
        Ok(Ok(())) => (StatusCode::OK, "ok"),
        Ok(Err(_)) => (StatusCode::SERVICE_UNAVAILABLE, "store unreachable"),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "store timeout"),
    }
}

/// GET /metrics — Prometheus text exposition.
pub async fn handler_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            "content-type",
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        state.prom_metrics.encode(),
    )
}
