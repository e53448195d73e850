//! Health probes.
//!
//! Liveness answers as long as the process serves requests. Readiness
//! additionally exercises the ledger gateway with a minimal list call, so a
//! wedged or unreachable ledger flips the probe.

use agritrace_ledger::{PageRequest, ShipmentFilter};
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

/// Probe response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Build the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
}

/// GET /health/liveness — process is up.
#[utoipa::path(
    get,
    path = "/health/liveness",
    responses((status = 200, description = "Process is serving requests")),
    tag = "health"
)]
pub(crate) async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /health/readiness — ledger gateway answers.
#[utoipa::path(
    get,
    path = "/health/readiness",
    responses(
        (status = 200, description = "Ledger gateway reachable"),
        (status = 503, description = "Ledger gateway unavailable", body = crate::error::ErrorBody),
        (status = 504, description = "Ledger gateway timed out", body = crate::error::ErrorBody),
    ),
    tag = "health"
)]
pub(crate) async fn readiness(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state
        .executor
        .list_shipments(
            &ShipmentFilter::All,
            &PageRequest {
                page_size: Some(1),
                bookmark: None,
            },
        )
        .await?;
    Ok(Json(HealthResponse { status: "ready" }))
}
