//! # AI System API
//!
//! Registration (which triggers applicability resolution), system
//! listing and lookup, per-system requirement tracking, and the
//! compliance summary.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use aireg_core::{RiskCategory, SystemId, ValidationError, MAX_NAME_LEN};
use aireg_registry::{AiSystemRecord, ComplianceSummary, NewSystem, Registry, StatusBreakdown};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Request to register an AI system.
///
/// `risk_category` arrives as a string and is validated against the
/// closed enum, so an unknown category is a 422, not a stored value.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterSystemRequest {
    /// Display name, 1-255 characters, non-empty after trimming.
    pub name: String,
    pub description: Option<String>,
    /// One of: unacceptable, high, limited, minimal.
    pub risk_category: String,
    pub organization: Option<String>,
    pub department: Option<String>,
    pub owner_contact: Option<String>,
}

impl Validate for RegisterSystemRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let name_len = self.name.chars().count();
        if name_len > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong(name_len));
        }
        self.risk_category.parse::<RiskCategory>()?;
        for (field, value) in [
            ("organization", &self.organization),
            ("department", &self.department),
            ("owner_contact", &self.owner_contact),
        ] {
            if let Some(value) = value {
                let len = value.chars().count();
                if len > MAX_NAME_LEN {
                    return Err(ValidationError::FieldTooLong(field, len));
                }
            }
        }
        Ok(())
    }
}

/// A registered AI system, as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SystemResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Wire string of the risk category (e.g. "high").
    pub risk_category: String,
    pub organization: Option<String>,
    pub department: Option<String>,
    pub owner_contact: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AiSystemRecord> for SystemResponse {
    fn from(record: AiSystemRecord) -> Self {
        Self {
            id: *record.id.as_uuid(),
            name: record.name,
            description: record.description,
            risk_category: record.risk_category.as_str().to_string(),
            organization: record.organization,
            department: record.department,
            owner_contact: record.owner_contact,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// One tracking record joined with its requirement's citation for display.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TrackingRecordView {
    pub mapping_id: Uuid,
    pub requirement_id: Uuid,
    pub article: String,
    pub title: String,
    pub description: String,
    /// Wire string of the compliance status (e.g. "not_started").
    pub status: String,
    pub notes: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-status tracking record counts. Always carries all four statuses,
/// zero-filled.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusCounts {
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub non_compliant: usize,
}

impl From<StatusBreakdown> for StatusCounts {
    fn from(breakdown: StatusBreakdown) -> Self {
        Self {
            not_started: breakdown.not_started,
            in_progress: breakdown.in_progress,
            completed: breakdown.completed,
            non_compliant: breakdown.non_compliant,
        }
    }
}

/// Compliance posture of one system.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComplianceReport {
    pub system_id: Uuid,
    pub system_name: String,
    pub risk_category: String,
    pub total_requirements: usize,
    /// completed / total * 100, rounded to 2 decimal places. Zero when
    /// no requirements apply.
    pub compliance_percentage: f64,
    pub status_breakdown: StatusCounts,
    pub requirements_completed: usize,
    pub requirements_in_progress: usize,
    pub requirements_not_started: usize,
    pub requirements_non_compliant: usize,
}

impl From<ComplianceSummary> for ComplianceReport {
    fn from(summary: ComplianceSummary) -> Self {
        let breakdown = summary.status_breakdown;
        Self {
            system_id: *summary.system_id.as_uuid(),
            system_name: summary.system_name,
            risk_category: summary.risk_category.as_str().to_string(),
            total_requirements: summary.total_requirements,
            compliance_percentage: summary.compliance_percentage,
            status_breakdown: breakdown.into(),
            requirements_completed: breakdown.completed,
            requirements_in_progress: breakdown.in_progress,
            requirements_not_started: breakdown.not_started,
            requirements_non_compliant: breakdown.non_compliant,
        }
    }
}

/// Build the systems router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/systems", get(list_systems).post(register_system))
        .route("/v1/systems/:id", get(get_system))
        .route("/v1/systems/:id/requirements", get(system_requirements))
        .route("/v1/systems/:id/compliance", get(compliance_report))
}

/// POST /v1/systems — Register an AI system.
///
/// Registration resolves the applicable requirements for the system's
/// risk category and materializes one `not_started` tracking record per
/// match, atomically with the system itself.
#[utoipa::path(
    post,
    path = "/v1/systems",
    request_body = RegisterSystemRequest,
    responses(
        (status = 201, description = "System registered", body = SystemResponse),
        (status = 400, description = "Malformed request body", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failed", body = crate::error::ErrorBody),
    ),
    tag = "systems"
)]
async fn register_system(
    State(state): State<AppState>,
    body: Result<Json<RegisterSystemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SystemResponse>), AppError> {
    let req = extract_validated_json(body)?;
    let risk_category: RiskCategory = req.risk_category.parse()?;

    let record = state.registry.register(NewSystem {
        name: req.name,
        description: req.description,
        risk_category,
        organization: req.organization,
        department: req.department,
        owner_contact: req.owner_contact,
    })?;

    // Persist the system and its tracking records in one transaction
    // (write-through). On failure the in-memory registration is rolled
    // back before the error is surfaced, so reads never serve a system
    // whose creation reported failure.
    if let Some(pool) = &state.db_pool {
        let mappings = state.registry.tracking_for(record.id)?;
        if let Err(e) = crate::db::systems::persist_registration(pool, &record, &mappings).await {
            tracing::error!(system = %record.id, error = %e, "failed to persist registration to database");
            roll_back_registration(&state.registry, record.id);
            return Err(AppError::Internal(
                "registration aborted: database persist failed".to_string(),
            ));
        }
    }

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Undo an in-memory registration whose database persist failed,
/// cascading to its tracking records.
fn roll_back_registration(registry: &Registry, system_id: SystemId) {
    if let Err(e) = registry.remove_system(system_id) {
        tracing::error!(
            system = %system_id,
            error = %e,
            "rollback of unpersisted registration found no system record"
        );
    }
}

/// GET /v1/systems — List registered systems, oldest first.
#[utoipa::path(
    get,
    path = "/v1/systems",
    responses(
        (status = 200, description = "List of registered systems", body = Vec<SystemResponse>),
    ),
    tag = "systems"
)]
async fn list_systems(State(state): State<AppState>) -> Json<Vec<SystemResponse>> {
    let systems = state
        .registry
        .list_systems()
        .into_iter()
        .map(SystemResponse::from)
        .collect();
    Json(systems)
}

/// GET /v1/systems/:id — Get a registered system.
#[utoipa::path(
    get,
    path = "/v1/systems/{id}",
    params(("id" = Uuid, Path, description = "System ID")),
    responses(
        (status = 200, description = "System found", body = SystemResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "systems"
)]
async fn get_system(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SystemResponse>, AppError> {
    state
        .registry
        .system(SystemId::from(id))
        .map(|record| Json(record.into()))
        .ok_or_else(|| AppError::NotFound(format!("AI system {id} not found")))
}

/// GET /v1/systems/:id/requirements — The system's tracking records,
/// joined with requirement citations for display.
#[utoipa::path(
    get,
    path = "/v1/systems/{id}/requirements",
    params(("id" = Uuid, Path, description = "System ID")),
    responses(
        (status = 200, description = "Tracking records for the system", body = Vec<TrackingRecordView>),
        (status = 404, description = "System not found", body = crate::error::ErrorBody),
    ),
    tag = "systems"
)]
async fn system_requirements(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<TrackingRecordView>>, AppError> {
    let records = state.registry.tracking_for(SystemId::from(id))?;
    let catalog = state.registry.list_catalog()?;

    let views = records
        .into_iter()
        .filter_map(|record| {
            let requirement = catalog.iter().find(|r| r.id == record.requirement_id);
            let Some(requirement) = requirement else {
                // A mapping that outlived its catalog entry. Kept in the
                // store, dropped from display.
                tracing::warn!(
                    mapping = %record.id,
                    requirement = %record.requirement_id,
                    "tracking record references a requirement absent from the catalog"
                );
                return None;
            };
            Some(TrackingRecordView {
                mapping_id: *record.id.as_uuid(),
                requirement_id: *record.requirement_id.as_uuid(),
                article: requirement.article.clone(),
                title: requirement.title.clone(),
                description: requirement.description.clone(),
                status: record.status.as_str().to_string(),
                notes: record.notes,
                updated_by: record.updated_by,
                created_at: record.created_at,
                updated_at: record.updated_at,
            })
        })
        .collect();

    Ok(Json(views))
}

/// GET /v1/systems/:id/compliance — Aggregate the system's compliance
/// posture. Read-only.
#[utoipa::path(
    get,
    path = "/v1/systems/{id}/compliance",
    params(("id" = Uuid, Path, description = "System ID")),
    responses(
        (status = 200, description = "Compliance summary", body = ComplianceReport),
        (status = 404, description = "System not found", body = crate::error::ErrorBody),
    ),
    tag = "systems"
)]
async fn compliance_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ComplianceReport>, AppError> {
    let summary = state.registry.summarize(SystemId::from(id))?;
    Ok(Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use aireg_catalog::{Catalog, Requirement};

    fn valid_request() -> RegisterSystemRequest {
        RegisterSystemRequest {
            name: "fraud-scorer".to_string(),
            description: None,
            risk_category: "high".to_string(),
            organization: None,
            department: None,
            owner_contact: None,
        }
    }

    #[test]
    fn validate_accepts_well_formed_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_name() {
        let mut req = valid_request();
        req.name = "   ".to_string();
        assert_eq!(req.validate(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn validate_rejects_overlong_name() {
        let mut req = valid_request();
        req.name = "x".repeat(MAX_NAME_LEN + 1);
        assert_eq!(
            req.validate(),
            Err(ValidationError::NameTooLong(MAX_NAME_LEN + 1))
        );
    }

    #[test]
    fn validate_accepts_name_at_limit() {
        let mut req = valid_request();
        req.name = "x".repeat(MAX_NAME_LEN);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unknown_risk_category() {
        let mut req = valid_request();
        req.risk_category = "severe".to_string();
        let err = req.validate().unwrap_err();
        assert_eq!(err, ValidationError::UnknownRiskCategory("severe".into()));
        assert!(err.to_string().contains("severe"));
    }

    #[test]
    fn validate_is_case_sensitive_on_risk_category() {
        let mut req = valid_request();
        req.risk_category = "High".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn validate_rejects_overlong_organization() {
        let mut req = valid_request();
        req.organization = Some("x".repeat(MAX_NAME_LEN + 1));
        let err = req.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::FieldTooLong("organization", MAX_NAME_LEN + 1)
        );
        assert!(err.to_string().contains("organization"));
    }

    #[test]
    fn rollback_removes_the_unpersisted_registration() {
        let catalog = Catalog::new(vec![Requirement::new(
            "Article 9",
            "Risk management system",
            "d",
            [RiskCategory::High],
        )
        .unwrap()]);
        let registry = Registry::new(Arc::new(catalog));

        let keeper = registry
            .register(NewSystem {
                name: "keeper".to_string(),
                description: None,
                risk_category: RiskCategory::High,
                organization: None,
                department: None,
                owner_contact: None,
            })
            .unwrap();
        let doomed = registry
            .register(NewSystem {
                name: "doomed".to_string(),
                description: None,
                risk_category: RiskCategory::High,
                organization: None,
                department: None,
                owner_contact: None,
            })
            .unwrap();

        roll_back_registration(&registry, doomed.id);

        // The failed registration and its tracking records are gone;
        // unrelated systems are untouched.
        assert!(registry.system(doomed.id).is_none());
        assert_eq!(registry.list_systems().len(), 1);
        assert_eq!(registry.tracking_for(keeper.id).unwrap().len(), 1);
        assert_eq!(registry.mappings.len(), 1);

        // Rolling back twice must not disturb the surviving state.
        roll_back_registration(&registry, doomed.id);
        assert_eq!(registry.list_systems().len(), 1);
    }
}
