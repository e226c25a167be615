//! # Registry — Registration, Resolution, Aggregation
//!
//! The registry owns the system and tracking-record stores and is the
//! single writer for both. Applicability resolution runs exactly once
//! per system, inside [`Registry::register`], which is what upholds the
//! at-most-one-record-per-(system, requirement) invariant: no other code
//! path creates tracking records.
//!
//! ## Registration atomicity
//!
//! `register` reads the catalog and constructs every record before
//! touching either store, then inserts the tracking records before the
//! system record. A concurrent reader therefore either does not see the
//! system yet, or sees it with its full requirement set — never a
//! half-registered system. A catalog read failure aborts before any
//! insert.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use aireg_catalog::{CatalogError, Requirement, RequirementSource};
use aireg_core::{ComplianceStatus, MappingId, RequirementId, RiskCategory, SystemId};

use crate::records::{AiSystemRecord, EvidenceRecord, NewSystem, TrackingRecord};
use crate::store::Store;
use crate::summary::ComplianceSummary;

/// Errors from registry operations.
///
/// `NotFound` variants surface to callers as missing-resource signals;
/// `Catalog` aborts registration before any state change.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The referenced AI system does not exist.
    #[error("AI system {0} not found")]
    SystemNotFound(SystemId),

    /// The referenced tracking record does not exist.
    #[error("tracking record {0} not found")]
    MappingNotFound(MappingId),

    /// The requirement catalog could not be read; registration fails
    /// atomically.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Input for a status update. `None` fields are left unchanged on the
/// record — mutate-by-presence, never clearing.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub status: ComplianceStatus,
    pub notes: Option<String>,
    pub updated_by: Option<String>,
}

/// Result of a status update: the record after the write, plus the full
/// record as it stood before. Callers that persist the write elsewhere
/// use `previous` to undo the in-memory change when the persist fails.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub record: TrackingRecord,
    pub previous: TrackingRecord,
}

impl StatusChange {
    /// Status before the update.
    pub fn old_status(&self) -> ComplianceStatus {
        self.previous.status
    }

    /// Status after the update.
    pub fn new_status(&self) -> ComplianceStatus {
        self.record.status
    }
}

/// The compliance register: AI systems, their tracking records, and the
/// evidence attached to them.
///
/// Cheap to clone — stores share their backing maps via `Arc`, and the
/// catalog handle is shared. Construct one per process (or per test).
#[derive(Clone)]
pub struct Registry {
    catalog: Arc<dyn RequirementSource + Send + Sync>,
    pub systems: Store<AiSystemRecord>,
    pub mappings: Store<TrackingRecord>,
    pub evidence: Store<EvidenceRecord>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("systems", &self.systems.len())
            .field("mappings", &self.mappings.len())
            .field("evidence", &self.evidence.len())
            .finish()
    }
}

/// Select the catalog requirements in force for a risk category.
///
/// Pure and deterministic: the same catalog and category always yield
/// the same requirement set (membership, not order, is what matters).
pub fn resolve_applicable(
    requirements: &[Requirement],
    category: RiskCategory,
) -> Vec<&Requirement> {
    requirements
        .iter()
        .filter(|req| req.applies_to(category))
        .collect()
}

impl Registry {
    /// Create a registry over the given catalog with empty stores.
    pub fn new(catalog: Arc<dyn RequirementSource + Send + Sync>) -> Self {
        Self {
            catalog,
            systems: Store::new(),
            mappings: Store::new(),
            evidence: Store::new(),
        }
    }

    /// Register an AI system and materialize its tracking records.
    ///
    /// Reads the full catalog, selects the requirements whose
    /// applicability set contains the system's risk category, and
    /// creates one `not_started` tracking record per match. Zero matches
    /// is a valid outcome. On catalog failure nothing is inserted.
    pub fn register(&self, new: NewSystem) -> Result<AiSystemRecord, RegistryError> {
        let requirements = self.catalog.list_all()?;

        let now = Utc::now();
        let record = AiSystemRecord::from_new(new, now);
        let assigned: Vec<TrackingRecord> = resolve_applicable(&requirements, record.risk_category)
            .into_iter()
            .map(|req| TrackingRecord::assign(record.id, req.id, now))
            .collect();

        // Tracking records first, system last: once the system is
        // visible, its full requirement set already is.
        let count = assigned.len();
        self.mappings
            .insert_batch(assigned.into_iter().map(|m| (*m.id.as_uuid(), m)));
        self.systems.insert(*record.id.as_uuid(), record.clone());

        tracing::info!(
            system = %record.id,
            name = %record.name,
            risk_category = %record.risk_category,
            requirements_assigned = count,
            "registered AI system"
        );

        Ok(record)
    }

    /// Look up a system by identifier.
    pub fn system(&self, id: SystemId) -> Option<AiSystemRecord> {
        self.systems.get(id.as_uuid())
    }

    /// List all registered systems, oldest first.
    ///
    /// Deterministic ordering (creation time, then id) so repeated reads
    /// with no intervening writes are byte-identical.
    pub fn list_systems(&self) -> Vec<AiSystemRecord> {
        let mut systems = self.systems.list();
        systems.sort_by_key(|s| (s.created_at, *s.id.as_uuid()));
        systems
    }

    /// List the full requirement catalog.
    pub fn list_catalog(&self) -> Result<Vec<Requirement>, RegistryError> {
        Ok(self.catalog.list_all()?)
    }

    /// Look up a catalog requirement by identifier.
    pub fn requirement(&self, id: RequirementId) -> Result<Option<Requirement>, RegistryError> {
        Ok(self.catalog.list_all()?.into_iter().find(|r| r.id == id))
    }

    /// List a system's tracking records, oldest first.
    ///
    /// `NotFound` if the system does not exist; an existing system with
    /// zero records yields an empty list, not an error.
    pub fn tracking_for(&self, system_id: SystemId) -> Result<Vec<TrackingRecord>, RegistryError> {
        if !self.systems.contains(system_id.as_uuid()) {
            return Err(RegistryError::SystemNotFound(system_id));
        }
        let mut records = self.mappings.select(|m| m.system_id == system_id);
        records.sort_by_key(|m| (m.created_at, *m.id.as_uuid()));
        Ok(records)
    }

    /// Look up a tracking record by identifier.
    pub fn mapping(&self, id: MappingId) -> Option<TrackingRecord> {
        self.mappings.get(id.as_uuid())
    }

    /// Update a tracking record's status, and optionally its notes and
    /// updater.
    ///
    /// Transitions are unrestricted (any status to any status, including
    /// no-op). Absent notes/updater leave the prior values untouched.
    /// The modification timestamp is always bumped. Read-validate-write
    /// runs under a single store lock.
    pub fn update_status(
        &self,
        id: MappingId,
        update: StatusUpdate,
    ) -> Result<StatusChange, RegistryError> {
        let mut previous = None;
        let record = self.mappings.update(id.as_uuid(), |mapping| {
            previous = Some(mapping.clone());
            mapping.status = update.status;
            if let Some(notes) = update.notes {
                mapping.notes = Some(notes);
            }
            if let Some(updated_by) = update.updated_by {
                mapping.updated_by = Some(updated_by);
            }
            mapping.updated_at = Utc::now();
        });
        let (record, previous) = match (record, previous) {
            (Some(record), Some(previous)) => (record, previous),
            _ => return Err(RegistryError::MappingNotFound(id)),
        };

        tracing::info!(
            mapping = %id,
            old_status = %previous.status,
            new_status = %record.status,
            "tracking record status updated"
        );

        Ok(StatusChange { record, previous })
    }

    /// Summarize a system's compliance posture. Read-only.
    pub fn summarize(&self, system_id: SystemId) -> Result<ComplianceSummary, RegistryError> {
        let system = self
            .system(system_id)
            .ok_or(RegistryError::SystemNotFound(system_id))?;
        let records = self.mappings.select(|m| m.system_id == system_id);
        Ok(ComplianceSummary::compute(
            system.id,
            system.name,
            system.risk_category,
            &records,
        ))
    }

    /// Remove a system, cascading to its tracking records and evidence.
    pub fn remove_system(&self, system_id: SystemId) -> Result<(), RegistryError> {
        self.systems
            .remove(system_id.as_uuid())
            .ok_or(RegistryError::SystemNotFound(system_id))?;
        let mappings_removed = self.mappings.remove_where(|m| m.system_id == system_id);
        let evidence_removed = self.evidence.remove_where(|e| e.system_id == system_id);
        tracing::info!(
            system = %system_id,
            mappings_removed,
            evidence_removed,
            "removed AI system"
        );
        Ok(())
    }

    /// Restore a system record during startup hydration, bypassing
    /// resolution. The caller is responsible for also restoring the
    /// system's tracking records.
    pub fn restore_system(&self, record: AiSystemRecord) {
        self.systems.insert(*record.id.as_uuid(), record);
    }

    /// Restore a tracking record during startup hydration.
    pub fn restore_mapping(&self, record: TrackingRecord) {
        self.mappings.insert(*record.id.as_uuid(), record);
    }

    /// Restore an evidence record during startup hydration.
    pub fn restore_evidence(&self, record: EvidenceRecord) {
        self.evidence.insert(*record.id.as_uuid(), record);
    }
}
