//! # agritrace-api — Axum API Services for the Agritrace Stack
//!
//! HTTP surface over the transition executor: shipment creation, stage
//! transitions, recall initiation, and paginated queries, with every error
//! normalized into a structured JSON body.
//!
//! ## API Surface
//!
//! | Prefix                  | Module                  | Domain                |
//! |-------------------------|-------------------------|-----------------------|
//! | `/api/shipments/*`      | [`routes::shipments`]   | Lifecycle & queries   |
//! | `/api/recalls/*`        | [`routes::recalls`]     | Regulator recalls     |
//! | `/health/*`             | [`routes::health`]      | Probes                |
//!
//! ## OpenAPI
//!
//! Auto-generated OpenAPI spec via utoipa derive macros at `/openapi.json`.

pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
///
/// Health probes (`/health/*`) stay outside the body-size limit since they
/// carry no request bodies worth limiting; everything else shares the same
/// trace layer.
pub fn app(state: AppState) -> Router {
    // Body size limit: 2 MiB. Prevents OOM from oversized request bodies.
    let api = Router::new()
        .merge(routes::shipments::router())
        .merge(routes::recalls::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .with_state(state.clone());

    let probes = routes::health::router().with_state(state);

    Router::new()
        .merge(probes)
        .merge(api)
        .layer(TraceLayer::new_for_http())
}
