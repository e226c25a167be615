//! # Validation Errors
//!
//! Structured errors for boundary validation. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations, and carry the
//! offending value so callers can surface actionable messages.

use thiserror::Error;

/// Maximum length of the `name` field on a registered system, and of the
/// other short metadata fields (organization, department, owner contact).
pub const MAX_NAME_LEN: usize = 255;

/// Rejection of malformed external input at the boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required name was empty or whitespace-only.
    #[error("name must not be empty")]
    EmptyName,

    /// A name exceeded the storage limit.
    #[error("name exceeds {MAX_NAME_LEN} characters (got {0})")]
    NameTooLong(usize),

    /// An unknown risk category string was supplied.
    #[error("unknown risk category: {0:?}")]
    UnknownRiskCategory(String),

    /// An unknown compliance status string was supplied.
    #[error("unknown compliance status: {0:?}")]
    UnknownStatus(String),

    /// A catalog requirement declared an empty applicability set.
    #[error("requirement {0:?} has an empty applicability set")]
    EmptyApplicability(String),

    /// A required text field was empty.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A short metadata field exceeded the storage limit.
    #[error("{0} exceeds {MAX_NAME_LEN} characters (got {1})")]
    FieldTooLong(&'static str, usize),
}
