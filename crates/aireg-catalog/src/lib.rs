//! # aireg-catalog — Requirement Reference Data
//!
//! The catalog is the static set of regulatory requirements known to the
//! register. Requirements are reference data: created out-of-band by
//! seeding, read-only from the perspective of the domain logic.
//!
//! ## Design
//!
//! - [`Requirement`] validates its applicability set at construction —
//!   a requirement that applies to no risk category is unrepresentable,
//!   eliminating the runtime-parse failure class of a loosely typed
//!   `applies_to` list.
//! - [`RequirementSource`] is the read seam. The registry depends on the
//!   trait, not on a concrete catalog, so tests can substitute a failing
//!   source to exercise the atomic-registration guarantee.
//! - [`seed::eu_ai_act_catalog`] builds the production seed set.

pub mod requirement;
pub mod seed;
pub mod source;

pub use requirement::Requirement;
pub use source::{Catalog, CatalogError, RequirementSource};
