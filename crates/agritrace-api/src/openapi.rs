//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Agritrace API — Supply-Chain Provenance Service",
        version = "0.2.0",
        description = "Shipment lifecycle tracking across a multi-party supply chain: farmer, certifier, processor, distributor, retailer. Records an append-only history of role-specific stage data and enforces that only the custodian with the correct role may advance a shipment.",
        license(name = "Apache-2.0")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // ── Shipments ───────────────────────────────────────────────
        crate::routes::shipments::create_shipment,
        crate::routes::shipments::list_all_shipments,
        crate::routes::shipments::list_my_shipments,
        crate::routes::shipments::get_shipment,
        crate::routes::shipments::submit_for_certification,
        crate::routes::shipments::record_certification,
        crate::routes::shipments::process_shipment,
        crate::routes::shipments::distribute_shipment,
        crate::routes::shipments::receive_shipment,
        // ── Recalls ─────────────────────────────────────────────────
        crate::routes::recalls::initiate_recall,
        // ── Health ──────────────────────────────────────────────────
        crate::routes::health::liveness,
        crate::routes::health::readiness,
    ),
    components(schemas(crate::error::ErrorBody, crate::error::ErrorDetail)),
    tags(
        (name = "shipments", description = "Shipment creation, queries, and lifecycle transitions"),
        (name = "recalls", description = "Regulator-initiated recalls"),
        (name = "health", description = "Service health probes"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(serve_openapi))
}

/// GET /openapi.json — serve the assembled spec.
async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_builds_and_lists_paths() {
        let spec = ApiDoc::openapi();
        let paths = spec.paths.paths;
        assert!(paths.contains_key("/api/shipments"));
        assert!(paths.contains_key("/api/shipments/{id}/process"));
        assert!(paths.contains_key("/api/recalls/initiate"));
        assert!(paths.contains_key("/health/readiness"));
    }
}
