//! # Integration Tests for agritrace-api
//!
//! Exercises the full HTTP surface against an in-memory ledger: shipment
//! creation, the complete farm-to-shelf transition chain, error normalization
//! (401/403/404/409/422), recalls, pagination, health probes, and the
//! OpenAPI spec endpoint.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use agritrace_api::state::AppState;

/// Helper: build the test app over a fresh in-memory ledger.
fn test_app() -> axum::Router {
    agritrace_api::app(AppState::new())
}

/// Helper: read a response body as JSON.
async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Helper: POST a JSON body.
fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// A well-formed creation envelope for farmer-alice, consigned to
/// processor-pete on certification approval.
fn create_body() -> Value {
    json!({
        "actorAlias": "farmer-alice",
        "actorRole": "farmer",
        "payload": {
            "productName": "Basmati Rice",
            "description": "Long-grain, 2026 season",
            "quantity": 1200.5,
            "unitOfMeasure": "kg",
            "farmerData": {
                "farmerName": "Alice Rahman",
                "farmLocation": "Punjab, PK",
                "cropType": "rice",
                "plantingDate": "2026-01-10",
                "harvestDate": "2026-05-20",
                "farmingPractice": "organic",
                "destinationProcessorId": "processor-pete"
            }
        }
    })
}

/// Helper: create a shipment and return its ID.
async fn create_shipment(app: &axum::Router) -> String {
    let response = app
        .clone()
        .oneshot(post_json("/api/shipments", &create_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["shipmentId"].as_str().unwrap().to_string()
}

/// Helper: run one transition endpoint and return (status, body).
async fn transition(
    app: &axum::Router,
    uri: &str,
    body: &Value,
) -> (StatusCode, Value) {
    let response = app.clone().oneshot(post_json(uri, body)).await.unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn liveness_probe() {
    let response = test_app().oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn readiness_probe() {
    let response = test_app().oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ready");
}

// -- OpenAPI ------------------------------------------------------------------

#[tokio::test]
async fn openapi_spec_is_served() {
    let response = test_app().oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let spec = body_json(response).await;
    assert!(spec["paths"]["/api/shipments"].is_object());
    assert!(spec["paths"]["/api/recalls/initiate"].is_object());
}

// -- Shipment Creation --------------------------------------------------------

#[tokio::test]
async fn create_shipment_returns_201_with_fresh_state() {
    let app = test_app();
    let response = app
        .oneshot(post_json("/api/shipments", &create_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert!(body["shipmentId"].as_str().unwrap().starts_with("SHIP-"));
    assert_eq!(body["status"], "CREATED");
    assert_eq!(body["currentOwnerAlias"], "farmer-alice");
    assert_eq!(body["version"], 1);
    assert_eq!(body["farmerData"]["cropType"], "rice");
    assert!(body.get("processorData").is_none());
}

#[tokio::test]
async fn create_honors_caller_supplied_id() {
    let app = test_app();
    let mut body = create_body();
    body["payload"]["shipmentId"] = json!("SHIP-CUSTOM-1");
    let response = app
        .clone()
        .oneshot(post_json("/api/shipments", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["shipmentId"], "SHIP-CUSTOM-1");

    // Claiming the same ID again conflicts.
    let response = app
        .oneshot(post_json("/api/shipments", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn create_shipment_rejects_non_farmer() {
    let mut body = create_body();
    body["actorRole"] = json!("retailer");
    let response = test_app()
        .oneshot(post_json("/api/shipments", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn unknown_role_token_is_unauthorized() {
    let mut body = create_body();
    body["actorRole"] = json!("warehouse_admin");
    let response = test_app()
        .oneshot(post_json("/api/shipments", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn malformed_json_is_normalized_to_422() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/shipments")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn missing_fields_report_every_violation() {
    let body = json!({
        "actorAlias": "farmer-alice",
        "actorRole": "farmer",
        "payload": {
            "productName": "  ",
            "quantity": -3,
            "unitOfMeasure": "kg",
            "farmerData": {
                "farmerName": "Alice Rahman",
                "farmLocation": "",
                "cropType": "rice"
            }
        }
    });
    let response = test_app()
        .oneshot(post_json("/api/shipments", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let details = body["error"]["details"].as_array().unwrap();
    let fields: Vec<&str> = details
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"productName"));
    assert!(fields.contains(&"quantity"));
    assert!(fields.contains(&"farmLocation"));
}

// -- Queries ------------------------------------------------------------------

#[tokio::test]
async fn get_unknown_shipment_is_404() {
    let response = test_app()
        .oneshot(get("/api/shipments/SHIP-does-not-exist"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn get_shipment_round_trips() {
    let app = test_app();
    let id = create_shipment(&app).await;
    let response = app
        .oneshot(get(&format!("/api/shipments/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["shipmentId"], id.as_str());
    assert_eq!(body["productName"], "Basmati Rice");
}

// -- Full Lifecycle over HTTP -------------------------------------------------

#[tokio::test]
async fn full_chain_farm_to_shelf() {
    let app = test_app();
    let id = create_shipment(&app).await;

    let (status, body) = transition(
        &app,
        &format!("/api/shipments/{id}/certification/submit"),
        &json!({"actorAlias": "farmer-alice", "actorRole": "farmer"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "PENDING_CERTIFICATION");
    assert_eq!(body["version"], 2);

    let (status, body) = transition(
        &app,
        &format!("/api/shipments/{id}/certification/record"),
        &json!({
            "actorAlias": "certifier-carol",
            "actorRole": "certifier",
            "payload": {
                "inspectionDate": "2026-06-01",
                "certificationStatus": "APPROVED",
                "comments": "clean lot"
            }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "CERTIFIED");
    // Approval hands custody to the consigned processor.
    assert_eq!(body["currentOwnerAlias"], "processor-pete");
    assert_eq!(body["certificationRecords"].as_array().unwrap().len(), 1);

    let (status, body) = transition(
        &app,
        &format!("/api/shipments/{id}/process"),
        &json!({
            "actorAlias": "processor-pete",
            "actorRole": "processor",
            "payload": {
                "processingType": "milling",
                "processingLineId": "LINE-7",
                "dateProcessed": "2026-06-10T08:00:00Z",
                "contaminationCheck": "PASSED",
                "outputBatchId": "BATCH-42",
                "expiryDate": "2027-06-10",
                "processingLocation": "Lahore Mill",
                "destinationDistributorId": "distributor-dan"
            }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "PROCESSED");
    assert_eq!(body["currentOwnerAlias"], "distributor-dan");

    let (status, body) = transition(
        &app,
        &format!("/api/shipments/{id}/distribute"),
        &json!({
            "actorAlias": "distributor-dan",
            "actorRole": "distributor",
            "payload": {
                "pickupDateTime": "2026-06-12T06:00:00Z",
                "deliveryDateTime": "2026-06-13T18:30:00Z",
                "transportConditions": "refrigerated",
                "temperatureRange": "2-6C",
                "distributionCenter": "Karachi DC",
                "distributionLineId": "ROUTE-9",
                "storageTemperature": 4.5,
                "transitLocations": ["Multan", "Hyderabad"],
                "destinationRetailerId": "retailer-rita"
            }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "DISTRIBUTED");
    assert_eq!(body["currentOwnerAlias"], "retailer-rita");

    let (status, body) = transition(
        &app,
        &format!("/api/shipments/{id}/receive"),
        &json!({
            "actorAlias": "retailer-rita",
            "actorRole": "retailer",
            "payload": {
                "storeLocation": "Clifton, Karachi",
                "storeId": "STORE-12",
                "dateReceived": "2026-06-14",
                "price": "3.99",
                "sellByDate": "2026-12-14",
                "shelfLife": "6 months"
            }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "DELIVERED");
    assert_eq!(body["currentOwnerAlias"], "retailer-rita");
    assert_eq!(body["version"], 6);
    assert_eq!(body["transitionLog"].as_array().unwrap().len(), 5);
}

// -- Gate Failures ------------------------------------------------------------

#[tokio::test]
async fn illegal_transition_is_409() {
    let app = test_app();
    let id = create_shipment(&app).await;
    // Processing straight from CREATED skips certification.
    let (status, body) = transition(
        &app,
        &format!("/api/shipments/{id}/process"),
        &json!({
            "actorAlias": "processor-pete",
            "actorRole": "processor",
            "payload": {
                "processingType": "milling",
                "processingLineId": "LINE-7",
                "dateProcessed": "2026-06-10T08:00:00Z",
                "contaminationCheck": "PASSED",
                "outputBatchId": "BATCH-42",
                "expiryDate": "2027-06-10",
                "processingLocation": "Lahore Mill"
            }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "ILLEGAL_TRANSITION");
}

#[tokio::test]
async fn non_owner_submission_is_403() {
    let app = test_app();
    let id = create_shipment(&app).await;
    let (status, body) = transition(
        &app,
        &format!("/api/shipments/{id}/certification/submit"),
        &json!({"actorAlias": "farmer-bob", "actorRole": "farmer"}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn conditional_certification_without_comments_is_422() {
    let app = test_app();
    let id = create_shipment(&app).await;
    let (status, _) = transition(
        &app,
        &format!("/api/shipments/{id}/certification/submit"),
        &json!({"actorAlias": "farmer-alice", "actorRole": "farmer"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = transition(
        &app,
        &format!("/api/shipments/{id}/certification/record"),
        &json!({
            "actorAlias": "certifier-carol",
            "actorRole": "certifier",
            "payload": {
                "inspectionDate": "2026-06-01",
                "certificationStatus": "CONDITIONAL"
            }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    // The refused outcome left the shipment untouched.
    let response = app
        .oneshot(get(&format!("/api/shipments/{id}")))
        .await
        .unwrap();
    let current = body_json(response).await;
    assert_eq!(current["status"], "PENDING_CERTIFICATION");
    assert!(current.get("certificationRecords").is_none());
}

// -- Recalls ------------------------------------------------------------------

#[tokio::test]
async fn regulator_recall_over_http() {
    let app = test_app();
    let id = create_shipment(&app).await;
    let (status, body) = transition(
        &app,
        "/api/recalls/initiate",
        &json!({
            "actorAlias": "regulator-rex",
            "actorRole": "regulator",
            "shipmentId": id,
            "reason": "aflatoxin exceedance in sister lot"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "RECALLED");
    assert!(body["recall"]["recallId"]
        .as_str()
        .unwrap()
        .starts_with("RECALL-"));
    // Recall does not move custody.
    assert_eq!(body["currentOwnerAlias"], "farmer-alice");
}

#[tokio::test]
async fn recall_accepts_caller_supplied_id() {
    let app = test_app();
    let id = create_shipment(&app).await;
    let (status, body) = transition(
        &app,
        "/api/recalls/initiate",
        &json!({
            "actorAlias": "regulator-rex",
            "actorRole": "regulator",
            "shipmentId": id,
            "reason": "mislabeled allergen",
            "recallId": "RECALL-2026-017"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recall"]["recallId"], "RECALL-2026-017");
}

#[tokio::test]
async fn non_regulator_cannot_recall() {
    let app = test_app();
    let id = create_shipment(&app).await;
    let (status, body) = transition(
        &app,
        "/api/recalls/initiate",
        &json!({
            "actorAlias": "farmer-alice",
            "actorRole": "farmer",
            "shipmentId": id,
            "reason": "changed my mind"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

// -- Listing & Pagination -----------------------------------------------------

#[tokio::test]
async fn list_all_paginates_with_bookmark() {
    let app = test_app();
    for _ in 0..3 {
        create_shipment(&app).await;
    }

    let response = app
        .clone()
        .oneshot(get("/api/shipments/all?pageSize=2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    assert_eq!(first["fetchedCount"], 2);
    let bookmark = first["nextBookmark"].as_str().unwrap().to_string();

    let response = app
        .oneshot(get(&format!(
            "/api/shipments/all?pageSize=2&bookmark={bookmark}"
        )))
        .await
        .unwrap();
    let second = body_json(response).await;
    assert_eq!(second["fetchedCount"], 1);
    assert!(second.get("nextBookmark").is_none());
}

#[tokio::test]
async fn list_my_scopes_to_current_owner() {
    let app = test_app();
    let id = create_shipment(&app).await;
    create_shipment(&app).await;

    // Move the first shipment into the certifier's queue and approve it over
    // to processor-pete.
    let (status, _) = transition(
        &app,
        &format!("/api/shipments/{id}/certification/submit"),
        &json!({"actorAlias": "farmer-alice", "actorRole": "farmer"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = transition(
        &app,
        &format!("/api/shipments/{id}/certification/record"),
        &json!({
            "actorAlias": "certifier-carol",
            "actorRole": "certifier",
            "payload": {
                "inspectionDate": "2026-06-01",
                "certificationStatus": "APPROVED"
            }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get("/api/shipments/my?actorAlias=processor-pete"))
        .await
        .unwrap();
    let page = body_json(response).await;
    assert_eq!(page["fetchedCount"], 1);
    assert_eq!(page["shipments"][0]["shipmentId"], id.as_str());

    let response = app
        .oneshot(get("/api/shipments/my?actorAlias=farmer-alice"))
        .await
        .unwrap();
    let page = body_json(response).await;
    assert_eq!(page["fetchedCount"], 1);
}
