//! # Integration Tests for aireg-api
//!
//! Drives the full router: registration with requirement resolution,
//! catalog listing, tracking record updates, compliance aggregation,
//! validation failures, not-found paths, catalog-failure atomicity,
//! and OpenAPI spec generation.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use aireg_api::state::AppState;
use aireg_catalog::{Catalog, CatalogError, Requirement, RequirementSource};
use aireg_core::RiskCategory;

/// Helper: build the test app over the seeded EU AI Act catalog.
fn test_app() -> axum::Router {
    aireg_api::app(AppState::new())
}

/// Helper: build the test app over a custom catalog.
fn app_with_catalog(requirements: Vec<Requirement>) -> axum::Router {
    let state = AppState::with_source(Arc::new(Catalog::new(requirements)));
    aireg_api::app(state)
}

/// Catalog source that always fails, for atomicity tests.
struct FailingSource;

impl RequirementSource for FailingSource {
    fn list_all(&self) -> Result<Vec<Requirement>, CatalogError> {
        Err(CatalogError::Unavailable("simulated outage".to_string()))
    }
}

/// Helper: GET a path.
async fn get(app: &axum::Router, uri: &str) -> axum::http::Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Helper: POST a JSON body.
async fn post_json(app: &axum::Router, uri: &str, body: &Value) -> axum::http::Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Helper: PUT a JSON body.
async fn put_json(app: &axum::Router, uri: &str, body: &Value) -> axum::http::Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Helper: read response body as JSON.
async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Helper: read response body as raw bytes.
async fn body_bytes(response: axum::http::Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

fn register_body(name: &str, risk_category: &str) -> Value {
    json!({
        "name": name,
        "risk_category": risk_category,
    })
}

/// Helper: register a system and return its id.
async fn register(app: &axum::Router, name: &str, risk_category: &str) -> String {
    let response = post_json(app, "/v1/systems", &register_body(name, risk_category)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["id"].as_str().unwrap().to_string()
}

// -- Health Probes & Metadata -------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let app = test_app();
    let response = get(&app, "/health/liveness").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let app = test_app();
    let response = get(&app, "/health/readiness").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"ready");
}

#[tokio::test]
async fn test_version_endpoint() {
    let app = test_app();
    let response = get(&app, "/version").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["service"], "aireg-api");
    assert!(!body["version"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_openapi_spec_is_served() {
    let app = test_app();
    let response = get(&app, "/openapi.json").await;
    assert_eq!(response.status(), StatusCode::OK);
    let spec = body_json(response).await;
    assert!(spec["paths"]["/v1/systems"].is_object());
    assert!(spec["paths"]["/v1/mappings/{id}"].is_object());
}

// -- Registration -------------------------------------------------------------

#[tokio::test]
async fn test_register_system_returns_created() {
    let app = test_app();
    let response = post_json(
        &app,
        "/v1/systems",
        &json!({
            "name": "fraud-scorer",
            "description": "transaction risk scoring",
            "risk_category": "high",
            "organization": "Acme Bank",
            "department": "Risk",
            "owner_contact": "ana@example.org",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["name"], "fraud-scorer");
    assert_eq!(body["risk_category"], "high");
    assert_eq!(body["organization"], "Acme Bank");
    assert!(body["id"].as_str().is_some());
    assert!(body["created_at"].as_str().is_some());
    assert_eq!(body["created_at"], body["updated_at"]);
}

#[tokio::test]
async fn test_register_resolves_requirements_for_high_risk() {
    let app = test_app();
    let id = register(&app, "fraud-scorer", "high").await;

    let response = get(&app, &format!("/v1/systems/{id}/requirements")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let records = body_json(response).await;
    let records = records.as_array().unwrap();
    // The seed catalog carries 11 high-risk obligations.
    assert_eq!(records.len(), 11);
    for record in records {
        assert_eq!(record["status"], "not_started");
        assert!(record["notes"].is_null());
        assert!(record["article"].as_str().unwrap().starts_with("Article"));
        assert!(record["title"].as_str().is_some());
    }
}

#[tokio::test]
async fn test_register_minimal_risk_assigns_nothing() {
    let app = test_app();
    let id = register(&app, "spam-filter", "minimal").await;

    let response = get(&app, &format!("/v1/systems/{id}/requirements")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let records = body_json(response).await;
    assert_eq!(records.as_array().unwrap().len(), 0);

    // Zero requirements is a valid summary: zeros, not an error.
    let response = get(&app, &format!("/v1/systems/{id}/compliance")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await;
    assert_eq!(summary["total_requirements"], 0);
    assert_eq!(summary["compliance_percentage"], 0.0);
    assert_eq!(summary["status_breakdown"]["not_started"], 0);
    assert_eq!(summary["status_breakdown"]["completed"], 0);
    assert_eq!(summary["status_breakdown"]["in_progress"], 0);
    assert_eq!(summary["status_breakdown"]["non_compliant"], 0);
}

// -- Validation ---------------------------------------------------------------

#[tokio::test]
async fn test_register_rejects_blank_name() {
    let app = test_app();
    let response = post_json(&app, "/v1/systems", &register_body("   ", "high")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_rejects_overlong_name() {
    let app = test_app();
    let response = post_json(
        &app,
        "/v1/systems",
        &register_body(&"x".repeat(256), "high"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_register_rejects_unknown_risk_category() {
    let app = test_app();
    let response = post_json(&app, "/v1/systems", &register_body("scorer", "severe")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"].as_str().unwrap().contains("severe"));
}

#[tokio::test]
async fn test_register_rejects_malformed_json() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/systems")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_register_rejects_wrong_field_type() {
    let app = test_app();
    let response = post_json(
        &app,
        "/v1/systems",
        &json!({ "name": "scorer", "risk_category": 5 }),
    )
    .await;
    // Type mismatch fails deserialization, not business validation.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// -- Lookups ------------------------------------------------------------------

#[tokio::test]
async fn test_get_system_roundtrip() {
    let app = test_app();
    let id = register(&app, "chatbot", "limited").await;
    let response = get(&app, &format!("/v1/systems/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["name"], "chatbot");
}

#[tokio::test]
async fn test_get_unknown_system_is_404() {
    let app = test_app();
    let missing = "00000000-0000-0000-0000-000000000000";
    for uri in [
        format!("/v1/systems/{missing}"),
        format!("/v1/systems/{missing}/requirements"),
        format!("/v1/systems/{missing}/compliance"),
    ] {
        let response = get(&app, &uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_list_systems_is_idempotent() {
    let app = test_app();
    register(&app, "a", "high").await;
    register(&app, "b", "limited").await;

    let first = body_bytes(get(&app, "/v1/systems").await).await;
    let second = body_bytes(get(&app, "/v1/systems").await).await;
    assert_eq!(first, second);

    let listed: Value = serde_json::from_slice(&first).unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 2);
    // Oldest first.
    assert_eq!(listed[0]["name"], "a");
    assert_eq!(listed[1]["name"], "b");
}

#[tokio::test]
async fn test_list_requirements_serves_the_catalog() {
    let app = test_app();
    let response = get(&app, "/v1/requirements").await;
    assert_eq!(response.status(), StatusCode::OK);
    let catalog = body_json(response).await;
    let catalog = catalog.as_array().unwrap();
    assert_eq!(catalog.len(), 13);
    for requirement in catalog {
        assert!(requirement["article"].as_str().unwrap().starts_with("Article"));
        assert!(!requirement["applies_to"].as_array().unwrap().is_empty());
    }
}

// -- Status Updates -----------------------------------------------------------

#[tokio::test]
async fn test_update_mapping_reports_old_and_new_status() {
    let app = test_app();
    let id = register(&app, "chatbot", "limited").await;

    let records = body_json(get(&app, &format!("/v1/systems/{id}/requirements")).await).await;
    let mapping_id = records[0]["mapping_id"].as_str().unwrap().to_string();

    let response = put_json(
        &app,
        &format!("/v1/mappings/{mapping_id}"),
        &json!({
            "status": "in_progress",
            "notes": "kickoff done",
            "updated_by": "ana@example.org",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["old_status"], "not_started");
    assert_eq!(body["new_status"], "in_progress");
    assert_eq!(body["notes"], "kickoff done");
    assert_eq!(body["updated_by"], "ana@example.org");
    assert!(body["article"].as_str().is_some());
    assert!(body["title"].as_str().is_some());
}

#[tokio::test]
async fn test_update_mapping_preserves_absent_fields() {
    let app = test_app();
    let id = register(&app, "chatbot", "limited").await;
    let records = body_json(get(&app, &format!("/v1/systems/{id}/requirements")).await).await;
    let mapping_id = records[0]["mapping_id"].as_str().unwrap().to_string();
    let uri = format!("/v1/mappings/{mapping_id}");

    put_json(
        &app,
        &uri,
        &json!({ "status": "in_progress", "notes": "first note", "updated_by": "ana@example.org" }),
    )
    .await;

    // A status-only update leaves notes and updater in place.
    let response = put_json(&app, &uri, &json!({ "status": "completed" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["old_status"], "in_progress");
    assert_eq!(body["new_status"], "completed");
    assert_eq!(body["notes"], "first note");
    assert_eq!(body["updated_by"], "ana@example.org");

    // The stored record reflects the update.
    let records = body_json(get(&app, &format!("/v1/systems/{id}/requirements")).await).await;
    assert_eq!(records[0]["status"], "completed");
    assert_eq!(records[0]["notes"], "first note");
}

#[tokio::test]
async fn test_update_mapping_rejects_unknown_status() {
    let app = test_app();
    let id = register(&app, "chatbot", "limited").await;
    let records = body_json(get(&app, &format!("/v1/systems/{id}/requirements")).await).await;
    let mapping_id = records[0]["mapping_id"].as_str().unwrap().to_string();

    let response = put_json(
        &app,
        &format!("/v1/mappings/{mapping_id}"),
        &json!({ "status": "done" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_unknown_mapping_is_404() {
    let app = test_app();
    let response = put_json(
        &app,
        "/v1/mappings/00000000-0000-0000-0000-000000000000",
        &json!({ "status": "completed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- Compliance Aggregation ---------------------------------------------------

/// Four high-risk requirements; statuses [completed, completed,
/// in_progress, not_started] must aggregate to 50.00%.
#[tokio::test]
async fn test_compliance_reference_vector() {
    let requirements: Vec<Requirement> = (1..=4)
        .map(|i| {
            Requirement::new(
                format!("Article {i}"),
                format!("Obligation {i}"),
                "d",
                [RiskCategory::High],
            )
            .unwrap()
        })
        .collect();
    let app = app_with_catalog(requirements);

    let id = register(&app, "scorer", "high").await;
    let records = body_json(get(&app, &format!("/v1/systems/{id}/requirements")).await).await;
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 4);

    for (record, status) in records.iter().zip(["completed", "completed", "in_progress"]) {
        let mapping_id = record["mapping_id"].as_str().unwrap();
        let response = put_json(
            &app,
            &format!("/v1/mappings/{mapping_id}"),
            &json!({ "status": status }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let summary = body_json(get(&app, &format!("/v1/systems/{id}/compliance")).await).await;
    assert_eq!(summary["system_name"], "scorer");
    assert_eq!(summary["risk_category"], "high");
    assert_eq!(summary["total_requirements"], 4);
    assert_eq!(summary["compliance_percentage"], 50.0);
    assert_eq!(summary["status_breakdown"]["completed"], 2);
    assert_eq!(summary["status_breakdown"]["in_progress"], 1);
    assert_eq!(summary["status_breakdown"]["not_started"], 1);
    assert_eq!(summary["status_breakdown"]["non_compliant"], 0);
    assert_eq!(summary["requirements_completed"], 2);
    assert_eq!(summary["requirements_not_started"], 1);
}

#[tokio::test]
async fn test_compliance_is_read_only() {
    let app = test_app();
    let id = register(&app, "scorer", "high").await;

    let before = body_bytes(get(&app, &format!("/v1/systems/{id}/requirements")).await).await;
    get(&app, &format!("/v1/systems/{id}/compliance")).await;
    get(&app, &format!("/v1/systems/{id}/compliance")).await;
    let after = body_bytes(get(&app, &format!("/v1/systems/{id}/requirements")).await).await;
    assert_eq!(before, after);
}

// -- Catalog Failure Atomicity ------------------------------------------------

#[tokio::test]
async fn test_catalog_failure_aborts_registration() {
    let state = AppState::with_source(Arc::new(FailingSource));
    let app = aireg_api::app(state);

    let response = post_json(&app, "/v1/systems", &register_body("scorer", "high")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    // Internal detail is withheld from the client.
    assert!(!body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("simulated outage"));

    // Nothing was committed.
    let listed = body_json(get(&app, "/v1/systems").await).await;
    assert_eq!(listed.as_array().unwrap().len(), 0);
}
