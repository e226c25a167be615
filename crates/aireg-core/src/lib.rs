//! # aireg-core — Foundational Types for the AI Compliance Register
//!
//! This crate is the bedrock of the register. It defines the closed
//! vocabularies and identifier types that every other crate builds on.
//!
//! ## Key Design Principles
//!
//! 1. **Closed enums for regulatory vocabularies.** `RiskCategory` and
//!    `ComplianceStatus` are tagged enums with exhaustive `match` everywhere.
//!    The external string form (`"high"`, `"not_started"`) crosses the
//!    boundary only through `as_str()`/`FromStr` — no bare strings inside.
//!
//! 2. **Newtype wrappers for identifiers.** `SystemId`, `RequirementId`,
//!    `MappingId`, `EvidenceId` — you cannot pass a requirement identifier
//!    where a system identifier is expected.
//!
//! 3. **Validation at construction.** Malformed external input is rejected
//!    with a structured [`ValidationError`] before it reaches domain logic.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `aireg-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod category;
pub mod error;
pub mod ids;
pub mod status;

// Re-export primary types for ergonomic imports.
pub use category::{RiskCategory, RISK_CATEGORY_COUNT};
pub use error::{ValidationError, MAX_NAME_LEN};
pub use ids::{EvidenceId, MappingId, RequirementId, SystemId};
pub use status::{ComplianceStatus, COMPLIANCE_STATUS_COUNT};
