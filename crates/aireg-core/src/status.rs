//! # Compliance Status
//!
//! The closed set of states a single requirement can be in for a single
//! system. Status transitions are deliberately unrestricted — any value
//! may follow any value, including a no-op update.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// State of one requirement's remediation for one AI system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// Work has not begun. The default for freshly assigned requirements.
    NotStarted,
    /// Remediation is underway.
    InProgress,
    /// The requirement has been satisfied.
    Completed,
    /// The system has been assessed as non-compliant for this requirement.
    NonCompliant,
}

/// Total number of compliance statuses. Used for compile-time assertions.
pub const COMPLIANCE_STATUS_COUNT: usize = 4;

impl ComplianceStatus {
    /// Returns all statuses in canonical order.
    pub fn all() -> &'static [ComplianceStatus] {
        &[
            Self::NotStarted,
            Self::InProgress,
            Self::Completed,
            Self::NonCompliant,
        ]
    }

    /// Returns the snake_case string identifier for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::NonCompliant => "non_compliant",
        }
    }
}

impl Default for ComplianceStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplianceStatus {
    type Err = ValidationError;

    /// Parse a status from its snake_case string identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "non_compliant" => Ok(Self::NonCompliant),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}
