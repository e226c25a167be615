//! # Tracking Record API
//!
//! Status updates for requirement tracking records. The identifier
//! fields on a record are immutable; only status, notes, updater and
//! the modification timestamp change here.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::put;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use aireg_core::{ComplianceStatus, MappingId, ValidationError, MAX_NAME_LEN};
use aireg_registry::{Registry, StatusChange, StatusUpdate, TrackingRecord};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Request to update a tracking record.
///
/// `status` is mandatory; `notes` and `updated_by` are overwritten only
/// when provided — an absent field leaves the stored value untouched.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMappingRequest {
    /// One of: not_started, in_progress, completed, non_compliant.
    pub status: String,
    pub notes: Option<String>,
    pub updated_by: Option<String>,
}

impl Validate for UpdateMappingRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        self.status.parse::<ComplianceStatus>()?;
        if let Some(updated_by) = &self.updated_by {
            let len = updated_by.chars().count();
            if len > MAX_NAME_LEN {
                return Err(ValidationError::FieldTooLong("updated_by", len));
            }
        }
        Ok(())
    }
}

/// Response to a status update: the record after the write, plus the
/// observed transition and the requirement citation for display.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateMappingResponse {
    pub mapping_id: Uuid,
    pub system_id: Uuid,
    pub requirement_id: Uuid,
    pub article: Option<String>,
    pub title: Option<String>,
    pub old_status: String,
    pub new_status: String,
    pub notes: Option<String>,
    pub updated_by: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Build the mappings router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/mappings/:id", put(update_mapping))
}

/// PUT /v1/mappings/:id — Update a tracking record's status.
///
/// Transitions are unrestricted, including no-ops. Absent `notes` and
/// `updated_by` leave the prior values in place. `updated_at` is always
/// bumped.
#[utoipa::path(
    put,
    path = "/v1/mappings/{id}",
    params(("id" = Uuid, Path, description = "Tracking record ID")),
    request_body = UpdateMappingRequest,
    responses(
        (status = 200, description = "Status updated", body = UpdateMappingResponse),
        (status = 400, description = "Malformed request body", body = crate::error::ErrorBody),
        (status = 404, description = "Tracking record not found", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failed", body = crate::error::ErrorBody),
    ),
    tag = "mappings"
)]
async fn update_mapping(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<UpdateMappingRequest>, JsonRejection>,
) -> Result<Json<UpdateMappingResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let status: ComplianceStatus = req.status.parse()?;

    let change = state.registry.update_status(
        MappingId::from(id),
        StatusUpdate {
            status,
            notes: req.notes,
            updated_by: req.updated_by,
        },
    )?;

    // Write-through. On failure the prior record is restored before the
    // error is surfaced, so the in-memory store never diverges from what
    // the database holds.
    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::mappings::update(pool, &change.record).await {
            tracing::error!(mapping = %id, error = %e, "failed to persist status update to database");
            roll_back_update(&state.registry, change.previous);
            return Err(AppError::Internal(
                "status update aborted: database persist failed".to_string(),
            ));
        }
    }

    // Join with the requirement citation for display. A missing catalog
    // entry leaves the citation fields null rather than failing the write.
    let requirement = state.registry.requirement(change.record.requirement_id)?;

    Ok(Json(build_response(change, requirement)))
}

/// Undo an in-memory status update whose database persist failed by
/// putting the prior record back.
fn roll_back_update(registry: &Registry, previous: TrackingRecord) {
    registry.restore_mapping(previous);
}

fn build_response(
    change: StatusChange,
    requirement: Option<aireg_catalog::Requirement>,
) -> UpdateMappingResponse {
    UpdateMappingResponse {
        mapping_id: *change.record.id.as_uuid(),
        system_id: *change.record.system_id.as_uuid(),
        requirement_id: *change.record.requirement_id.as_uuid(),
        article: requirement.as_ref().map(|r| r.article.clone()),
        title: requirement.map(|r| r.title),
        old_status: change.old_status().as_str().to_string(),
        new_status: change.new_status().as_str().to_string(),
        notes: change.record.notes,
        updated_by: change.record.updated_by,
        updated_at: change.record.updated_at,
    }
}
