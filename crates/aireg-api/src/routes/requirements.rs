//! # Requirement Catalog API
//!
//! Read-only listing of the regulatory requirement catalog.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use aireg_catalog::Requirement;

use crate::error::AppError;
use crate::state::AppState;

/// A catalog requirement, as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RequirementView {
    pub id: Uuid,
    /// Regulatory citation label, e.g. "Article 9".
    pub article: String,
    pub title: String,
    pub description: String,
    /// Wire strings of the risk categories this requirement is in force
    /// for.
    pub applies_to: Vec<String>,
}

impl From<Requirement> for RequirementView {
    fn from(req: Requirement) -> Self {
        Self {
            id: *req.id.as_uuid(),
            article: req.article,
            title: req.title,
            description: req.description,
            applies_to: req
                .applies_to
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
        }
    }
}

/// Build the requirements router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/requirements", get(list_requirements))
}

/// GET /v1/requirements — List the full requirement catalog.
#[utoipa::path(
    get,
    path = "/v1/requirements",
    responses(
        (status = 200, description = "The requirement catalog", body = Vec<RequirementView>),
    ),
    tag = "requirements"
)]
async fn list_requirements(
    State(state): State<AppState>,
) -> Result<Json<Vec<RequirementView>>, AppError> {
    let catalog = state.registry.list_catalog()?;
    Ok(Json(catalog.into_iter().map(RequirementView::from).collect()))
}
