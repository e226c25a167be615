//! # Compliance Summary
//!
//! The aggregation output: a per-status breakdown over the full closed
//! status set (zero-filled, so every status is always present) and a
//! completion percentage rounded to two decimal places.

use serde::{Deserialize, Serialize};

use aireg_core::{ComplianceStatus, RiskCategory, SystemId};

use crate::records::TrackingRecord;

/// Count of tracking records per compliance status.
///
/// One field per variant of the closed set, so the breakdown is
/// zero-filled by construction — an unused status reads as 0, never as
/// a missing key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub non_compliant: usize,
}

impl StatusBreakdown {
    /// Tally a set of tracking records.
    pub fn tally(records: &[TrackingRecord]) -> Self {
        let mut breakdown = Self::default();
        for record in records {
            breakdown.increment(record.status);
        }
        breakdown
    }

    /// Increment the counter for one status.
    pub fn increment(&mut self, status: ComplianceStatus) {
        match status {
            ComplianceStatus::NotStarted => self.not_started += 1,
            ComplianceStatus::InProgress => self.in_progress += 1,
            ComplianceStatus::Completed => self.completed += 1,
            ComplianceStatus::NonCompliant => self.non_compliant += 1,
        }
    }

    /// The count for one status.
    pub fn count(&self, status: ComplianceStatus) -> usize {
        match status {
            ComplianceStatus::NotStarted => self.not_started,
            ComplianceStatus::InProgress => self.in_progress,
            ComplianceStatus::Completed => self.completed,
            ComplianceStatus::NonCompliant => self.non_compliant,
        }
    }

    /// Total records across all statuses.
    pub fn total(&self) -> usize {
        self.not_started + self.in_progress + self.completed + self.non_compliant
    }
}

/// Compliance posture of one system at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub system_id: SystemId,
    pub system_name: String,
    pub risk_category: RiskCategory,
    /// Total tracking records for the system. Zero is valid — a system
    /// whose risk category matches no requirement.
    pub total_requirements: usize,
    /// `completed / total * 100`, rounded to 2 decimal places.
    /// Zero when no requirements apply.
    pub compliance_percentage: f64,
    pub status_breakdown: StatusBreakdown,
}

impl ComplianceSummary {
    /// Fold a system's tracking records into a summary.
    pub fn compute(
        system_id: SystemId,
        system_name: String,
        risk_category: RiskCategory,
        records: &[TrackingRecord],
    ) -> Self {
        let status_breakdown = StatusBreakdown::tally(records);
        let total = records.len();
        let compliance_percentage = if total == 0 {
            0.0
        } else {
            round2(status_breakdown.completed as f64 / total as f64 * 100.0)
        };
        Self {
            system_id,
            system_name,
            risk_category,
            total_requirements: total,
            compliance_percentage,
            status_breakdown,
        }
    }
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
