//! # Registry Record Types
//!
//! The persisted shapes owned by the registry: AI systems, tracking
//! records (requirement x system mappings), and evidence. Identifier
//! fields on a tracking record are immutable after creation — only
//! status, notes, updater and the modification timestamp ever change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aireg_core::{ComplianceStatus, EvidenceId, MappingId, RequirementId, RiskCategory, SystemId};

/// Input for registering a new AI system.
///
/// Field constraints (name 1-255 chars, valid risk category) are
/// enforced at the API boundary before this struct is built.
#[derive(Debug, Clone)]
pub struct NewSystem {
    pub name: String,
    pub description: Option<String>,
    pub risk_category: RiskCategory,
    pub organization: Option<String>,
    pub department: Option<String>,
    pub owner_contact: Option<String>,
}

/// A registered AI system under compliance tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiSystemRecord {
    pub id: SystemId,
    pub name: String,
    pub description: Option<String>,
    pub risk_category: RiskCategory,
    pub organization: Option<String>,
    pub department: Option<String>,
    pub owner_contact: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AiSystemRecord {
    /// Build a fresh record from validated registration input.
    pub fn from_new(new: NewSystem, now: DateTime<Utc>) -> Self {
        Self {
            id: SystemId::new(),
            name: new.name,
            description: new.description,
            risk_category: new.risk_category,
            organization: new.organization,
            department: new.department,
            owner_contact: new.owner_contact,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One requirement's tracking state for one system.
///
/// Invariant: at most one tracking record exists per
/// (system, requirement) pair — enforced by the registry, which creates
/// these only once, at registration time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub id: MappingId,
    pub system_id: SystemId,
    pub requirement_id: RequirementId,
    pub status: ComplianceStatus,
    pub notes: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrackingRecord {
    /// Build the initial record for a freshly assigned requirement:
    /// status `not_started`, no notes, no updater.
    pub fn assign(system_id: SystemId, requirement_id: RequirementId, now: DateTime<Utc>) -> Self {
        Self {
            id: MappingId::new(),
            system_id,
            requirement_id,
            status: ComplianceStatus::NotStarted,
            notes: None,
            updated_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Documentation supporting compliance of a system, optionally tied to a
/// specific tracking record.
///
/// Schema neighbor only: never read or written by the resolver or
/// aggregator, and removed by cascade when its system is removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    pub id: EvidenceId,
    pub system_id: SystemId,
    pub mapping_id: Option<MappingId>,
    pub title: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
