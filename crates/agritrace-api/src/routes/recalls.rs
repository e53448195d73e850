//! # Recall Operations API
//!
//! Regulator-initiated recalls. A recall pulls a shipment out of circulation
//! from any non-terminal status, regardless of who holds custody.

use agritrace_engine::ActionRequest;
use agritrace_records::RecallPayload;
use agritrace_shipment::Shipment;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::routes::shipments::resolve_actor;
use crate::state::AppState;

/// Request to initiate a recall.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateRecallRequest {
    pub actor_alias: String,
    pub actor_role: String,
    pub shipment_id: String,
    pub reason: String,
    /// Recall campaign ID; generated server-side when absent.
    #[serde(default)]
    pub recall_id: Option<String>,
}

/// Build the recalls router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/recalls/initiate", post(initiate_recall))
}

/// POST /api/recalls/initiate — Recall a shipment (regulator only).
#[utoipa::path(
    post,
    path = "/api/recalls/initiate",
    responses(
        (status = 200, description = "Shipment recalled"),
        (status = 403, description = "Actor is not a regulator", body = crate::error::ErrorBody),
        (status = 404, description = "Shipment not found", body = crate::error::ErrorBody),
        (status = 409, description = "Shipment already terminal", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "recalls"
)]
pub(crate) async fn initiate_recall(
    State(state): State<AppState>,
    body: Result<Json<InitiateRecallRequest>, JsonRejection>,
) -> Result<Json<Shipment>, AppError> {
    let req = extract_json(body)?;
    let actor = resolve_actor(&req.actor_alias, &req.actor_role)?;
    let id = agritrace_core::ShipmentId::new(req.shipment_id.as_str())
        .map_err(|e| AppError::Validation(format!("shipmentId: {e}"), None))?;
    let shipment = state
        .executor
        .execute(
            &actor,
            &id,
            ActionRequest::InitiateRecall(RecallPayload {
                reason: req.reason,
                recall_id: req.recall_id,
            }),
        )
        .await?;
    Ok(Json(shipment))
}
