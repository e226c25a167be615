//! # aireg-api — Axum HTTP API for the AI Compliance Register
//!
//! Serves the register over HTTP: AI system registration (with
//! automatic requirement resolution), the requirement catalog,
//! per-system tracking records, status updates, and the compliance
//! summary.
//!
//! ## API Surface
//!
//! | Route                            | Module                     |
//! |----------------------------------|----------------------------|
//! | `POST/GET /v1/systems`           | [`routes::systems`]        |
//! | `GET /v1/systems/:id`            | [`routes::systems`]        |
//! | `GET /v1/systems/:id/requirements` | [`routes::systems`]      |
//! | `GET /v1/systems/:id/compliance` | [`routes::systems`]        |
//! | `GET /v1/requirements`           | [`routes::requirements`]   |
//! | `PUT /v1/mappings/:id`           | [`routes::mappings`]       |
//!
//! Health probes at `/health/*`, service metadata at `/version`, and
//! the OpenAPI spec at `/openapi.json`.

pub mod db;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::ToSchema;

use crate::state::AppState;

/// Assemble the full application router.
///
/// Health probes are mounted alongside the API routes; the CORS layer
/// is permissive because the register serves a browser frontend.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::systems::router())
        .merge(routes::requirements::router())
        .merge(routes::mappings::router())
        .merge(openapi::router())
        .route("/version", get(version))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}

/// Service metadata returned by `/version`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VersionInfo {
    pub service: String,
    pub version: String,
    pub description: String,
}

/// GET /version — Service name and version.
#[utoipa::path(
    get,
    path = "/version",
    responses(
        (status = 200, description = "Service metadata", body = VersionInfo),
    ),
    tag = "meta"
)]
async fn version() -> Json<VersionInfo> {
    Json(VersionInfo {
        service: "aireg-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: env!("CARGO_PKG_DESCRIPTION").to_string(),
    })
}
