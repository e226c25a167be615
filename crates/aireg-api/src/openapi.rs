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
        title = "AI Compliance Register API",
        version = "0.1.0",
        description = "Register AI systems, resolve their regulatory requirements by risk category, track per-requirement compliance status, and aggregate compliance posture.",
        license(name = "Apache-2.0")
    ),
    paths(
        // Systems
        crate::routes::systems::register_system,
        crate::routes::systems::list_systems,
        crate::routes::systems::get_system,
        crate::routes::systems::system_requirements,
        crate::routes::systems::compliance_report,
        // Requirements
        crate::routes::requirements::list_requirements,
        // Mappings
        crate::routes::mappings::update_mapping,
        // Meta
        crate::version,
    ),
    components(schemas(
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // System DTOs
        crate::routes::systems::RegisterSystemRequest,
        crate::routes::systems::SystemResponse,
        crate::routes::systems::TrackingRecordView,
        crate::routes::systems::StatusCounts,
        crate::routes::systems::ComplianceReport,
        // Requirement DTOs
        crate::routes::requirements::RequirementView,
        // Mapping DTOs
        crate::routes::mappings::UpdateMappingRequest,
        crate::routes::mappings::UpdateMappingResponse,
        // Meta
        crate::VersionInfo,
    )),
    tags(
        (name = "systems", description = "AI system registration and compliance tracking"),
        (name = "requirements", description = "Regulatory requirement catalog"),
        (name = "mappings", description = "Requirement tracking record updates"),
        (name = "meta", description = "Service metadata"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
