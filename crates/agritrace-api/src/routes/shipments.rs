//! # Shipment Operations API
//!
//! Shipment creation, queries, and the lifecycle transition endpoints. Each
//! transition endpoint takes a `{actorAlias, actorRole, payload}` envelope,
//! resolves the actor, and hands the rest to the transition executor — no
//! business logic lives here.

use agritrace_core::{ActorAlias, Role, ShipmentId};
use agritrace_engine::{ActionRequest, Actor, CreateShipmentRequest};
use agritrace_ledger::{PageRequest, ShipmentFilter};
use agritrace_records::{
    CertificationPayload, DistributorPayload, ProcessorPayload, RetailerPayload,
};
use agritrace_shipment::Shipment;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// The actor pair plus a stage payload, as every transition body carries it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionEnvelope<P> {
    pub actor_alias: String,
    pub actor_role: String,
    pub payload: P,
}

/// Actor pair alone, for transitions that carry no stage payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorEnvelope {
    pub actor_alias: String,
    pub actor_role: String,
}

/// Pagination parameters for list endpoints.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Maximum number of shipments to return (default 10, max 100).
    pub page_size: Option<usize>,
    /// Last shipment ID of the previous page.
    pub bookmark: Option<String>,
}

/// Identity parameter for owner-scoped list endpoints. Pagination fields are
/// repeated inline because the query extractor does not handle flattened
/// structs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerParams {
    pub actor_alias: String,
    pub page_size: Option<usize>,
    pub bookmark: Option<String>,
}

/// One page of shipments plus the continuation bookmark.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentPageResponse {
    pub shipments: Vec<Shipment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_bookmark: Option<String>,
    pub fetched_count: usize,
}

/// Resolve the actor pair from an envelope.
///
/// An unrecognized role token means the caller's identity cannot be
/// established at all (401); a malformed alias is a validation problem (422).
pub fn resolve_actor(alias: &str, role: &str) -> Result<Actor, AppError> {
    let role = Role::from_str(role.trim())
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;
    let alias = ActorAlias::new(alias)
        .map_err(|e| AppError::Validation(format!("actorAlias: {e}"), None))?;
    Ok(Actor::new(alias, role))
}

fn parse_shipment_id(raw: &str) -> Result<ShipmentId, AppError> {
    ShipmentId::new(raw).map_err(|e| AppError::Validation(format!("shipment id: {e}"), None))
}

fn page_request(params: ListParams) -> PageRequest {
    PageRequest {
        page_size: params.page_size,
        bookmark: params.bookmark,
    }
}

/// Build the shipments router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/shipments", post(create_shipment))
        .route("/api/shipments/all", get(list_all_shipments))
        .route("/api/shipments/my", get(list_my_shipments))
        .route("/api/shipments/:id", get(get_shipment))
        .route(
            "/api/shipments/:id/certification/submit",
            post(submit_for_certification),
        )
        .route(
            "/api/shipments/:id/certification/record",
            post(record_certification),
        )
        .route("/api/shipments/:id/process", post(process_shipment))
        .route("/api/shipments/:id/distribute", post(distribute_shipment))
        .route("/api/shipments/:id/receive", post(receive_shipment))
}

/// POST /api/shipments — Create a shipment (farmer only).
#[utoipa::path(
    post,
    path = "/api/shipments",
    responses(
        (status = 201, description = "Shipment created"),
        (status = 403, description = "Actor is not a farmer", body = crate::error::ErrorBody),
        (status = 409, description = "Supplied shipment ID already taken", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "shipments"
)]
pub(crate) async fn create_shipment(
    State(state): State<AppState>,
    body: Result<Json<TransitionEnvelope<CreateShipmentRequest>>, JsonRejection>,
) -> Result<(StatusCode, Json<Shipment>), AppError> {
    let envelope = extract_json(body)?;
    let actor = resolve_actor(&envelope.actor_alias, &envelope.actor_role)?;
    let shipment = state
        .executor
        .create_shipment(&actor, envelope.payload)
        .await?;
    Ok((StatusCode::CREATED, Json(shipment)))
}

/// GET /api/shipments/all — List all shipments, bookmark-paginated.
#[utoipa::path(
    get,
    path = "/api/shipments/all",
    params(
        ("pageSize" = Option<usize>, Query, description = "Max shipments to return (default 10, max 100)"),
        ("bookmark" = Option<String>, Query, description = "Last shipment ID of the previous page"),
    ),
    responses(
        (status = 200, description = "One page of shipments"),
    ),
    tag = "shipments"
)]
pub(crate) async fn list_all_shipments(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ShipmentPageResponse>, AppError> {
    let page = state
        .executor
        .list_shipments(&ShipmentFilter::All, &page_request(params))
        .await?;
    Ok(Json(ShipmentPageResponse {
        shipments: page.shipments,
        next_bookmark: page.next_bookmark,
        fetched_count: page.fetched_count,
    }))
}

/// GET /api/shipments/my — List shipments currently owned by the caller.
#[utoipa::path(
    get,
    path = "/api/shipments/my",
    params(
        ("actorAlias" = String, Query, description = "Alias whose owned shipments to list"),
        ("pageSize" = Option<usize>, Query, description = "Max shipments to return (default 10, max 100)"),
        ("bookmark" = Option<String>, Query, description = "Last shipment ID of the previous page"),
    ),
    responses(
        (status = 200, description = "One page of owned shipments"),
        (status = 422, description = "Invalid alias", body = crate::error::ErrorBody),
    ),
    tag = "shipments"
)]
pub(crate) async fn list_my_shipments(
    State(state): State<AppState>,
    Query(params): Query<OwnerParams>,
) -> Result<Json<ShipmentPageResponse>, AppError> {
    let owner = ActorAlias::new(params.actor_alias.as_str())
        .map_err(|e| AppError::Validation(format!("actorAlias: {e}"), None))?;
    let page = state
        .executor
        .list_shipments(
            &ShipmentFilter::Owner(owner),
            &page_request(ListParams {
                page_size: params.page_size,
                bookmark: params.bookmark,
            }),
        )
        .await?;
    Ok(Json(ShipmentPageResponse {
        shipments: page.shipments,
        next_bookmark: page.next_bookmark,
        fetched_count: page.fetched_count,
    }))
}

/// GET /api/shipments/:id — Get one shipment.
#[utoipa::path(
    get,
    path = "/api/shipments/{id}",
    params(("id" = String, Path, description = "Shipment ID")),
    responses(
        (status = 200, description = "Shipment found"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "shipments"
)]
pub(crate) async fn get_shipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Shipment>, AppError> {
    let id = parse_shipment_id(&id)?;
    let shipment = state.executor.get_shipment(&id).await?;
    Ok(Json(shipment))
}

/// Shared shape of every transition handler: resolve actor, parse ID,
/// execute.
async fn run_transition(
    state: &AppState,
    raw_id: &str,
    actor_alias: &str,
    actor_role: &str,
    request: ActionRequest,
) -> Result<Json<Shipment>, AppError> {
    let actor = resolve_actor(actor_alias, actor_role)?;
    let id = parse_shipment_id(raw_id)?;
    let shipment = state.executor.execute(&actor, &id, request).await?;
    Ok(Json(shipment))
}

/// POST /api/shipments/:id/certification/submit — Submit for certification
/// (owning farmer only; no stage payload).
#[utoipa::path(
    post,
    path = "/api/shipments/{id}/certification/submit",
    params(("id" = String, Path, description = "Shipment ID")),
    responses(
        (status = 200, description = "Shipment pending certification"),
        (status = 403, description = "Wrong role or not the owner", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 409, description = "Illegal transition", body = crate::error::ErrorBody),
    ),
    tag = "shipments"
)]
pub(crate) async fn submit_for_certification(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ActorEnvelope>, JsonRejection>,
) -> Result<Json<Shipment>, AppError> {
    let envelope = extract_json(body)?;
    run_transition(
        &state,
        &id,
        &envelope.actor_alias,
        &envelope.actor_role,
        ActionRequest::SubmitForCertification,
    )
    .await
}

/// POST /api/shipments/:id/certification/record — Record a certification
/// outcome (certifier).
#[utoipa::path(
    post,
    path = "/api/shipments/{id}/certification/record",
    params(("id" = String, Path, description = "Shipment ID")),
    responses(
        (status = 200, description = "Certification recorded"),
        (status = 403, description = "Wrong role", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 409, description = "Illegal transition", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "shipments"
)]
pub(crate) async fn record_certification(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<TransitionEnvelope<CertificationPayload>>, JsonRejection>,
) -> Result<Json<Shipment>, AppError> {
    let envelope = extract_json(body)?;
    run_transition(
        &state,
        &id,
        &envelope.actor_alias,
        &envelope.actor_role,
        ActionRequest::RecordCertification(envelope.payload),
    )
    .await
}

/// POST /api/shipments/:id/process — Record processing data (owning
/// processor).
#[utoipa::path(
    post,
    path = "/api/shipments/{id}/process",
    params(("id" = String, Path, description = "Shipment ID")),
    responses(
        (status = 200, description = "Processing recorded"),
        (status = 403, description = "Wrong role or not the owner", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 409, description = "Illegal transition", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "shipments"
)]
pub(crate) async fn process_shipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<TransitionEnvelope<ProcessorPayload>>, JsonRejection>,
) -> Result<Json<Shipment>, AppError> {
    let envelope = extract_json(body)?;
    run_transition(
        &state,
        &id,
        &envelope.actor_alias,
        &envelope.actor_role,
        ActionRequest::Process(envelope.payload),
    )
    .await
}

/// POST /api/shipments/:id/distribute — Record distribution data (owning
/// distributor).
#[utoipa::path(
    post,
    path = "/api/shipments/{id}/distribute",
    params(("id" = String, Path, description = "Shipment ID")),
    responses(
        (status = 200, description = "Distribution recorded"),
        (status = 403, description = "Wrong role or not the owner", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 409, description = "Illegal transition", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "shipments"
)]
pub(crate) async fn distribute_shipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<TransitionEnvelope<DistributorPayload>>, JsonRejection>,
) -> Result<Json<Shipment>, AppError> {
    let envelope = extract_json(body)?;
    run_transition(
        &state,
        &id,
        &envelope.actor_alias,
        &envelope.actor_role,
        ActionRequest::Distribute(envelope.payload),
    )
    .await
}

/// POST /api/shipments/:id/receive — Record retail receipt (owning
/// retailer).
#[utoipa::path(
    post,
    path = "/api/shipments/{id}/receive",
    params(("id" = String, Path, description = "Shipment ID")),
    responses(
        (status = 200, description = "Shipment delivered"),
        (status = 403, description = "Wrong role or not the owner", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 409, description = "Illegal transition", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "shipments"
)]
pub(crate) async fn receive_shipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<TransitionEnvelope<RetailerPayload>>, JsonRejection>,
) -> Result<Json<Shipment>, AppError> {
    let envelope = extract_json(body)?;
    run_transition(
        &state,
        &id,
        &envelope.actor_alias,
        &envelope.actor_role,
        ActionRequest::Receive(envelope.payload),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_actor_accepts_known_roles() {
        let actor = resolve_actor("farmer-alice", "farmer").unwrap();
        assert_eq!(actor.role, Role::Farmer);
        assert_eq!(actor.alias.as_str(), "farmer-alice");
    }

    #[test]
    fn resolve_actor_unknown_role_is_unauthorized() {
        let err = resolve_actor("farmer-alice", "admin").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn resolve_actor_bad_alias_is_validation() {
        let err = resolve_actor("  ", "farmer").unwrap_err();
        assert!(matches!(err, AppError::Validation(..)));
    }

    #[test]
    fn router_builds() {
        let _router = router();
    }

    #[test]
    fn envelope_deserializes_camel_case() {
        let envelope: TransitionEnvelope<CertificationPayload> = serde_json::from_str(
            r#"{
                "actorAlias": "certifier-carol",
                "actorRole": "certifier",
                "payload": {
                    "inspectionDate": "2026-02-01",
                    "certificationStatus": "APPROVED"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(envelope.actor_role, "certifier");
        assert_eq!(envelope.payload.certification_status, "APPROVED");
    }
}
