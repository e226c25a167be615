//! # aireg-registry — Domain Core of the AI Compliance Register
//!
//! Owns the AI system records and their tracking records, and implements
//! the three operations with genuine domain logic:
//!
//! - **Registration** ([`Registry::register`]) — persists a system and
//!   materializes one tracking record per applicable catalog requirement,
//!   atomically: a concurrent reader never observes a half-registered
//!   system, and a catalog failure commits nothing.
//! - **Aggregation** ([`Registry::summarize`]) — folds a system's
//!   tracking records into a [`ComplianceSummary`] with a zero-filled
//!   status breakdown and a completion percentage.
//! - **Status update** ([`Registry::update_status`]) — unrestricted
//!   transitions, mutate-by-presence field semantics, and an observable
//!   old/new status pair for audit logging upstream.
//!
//! The registry is request-scoped and stateless between invocations:
//! every operation is a short read/write against the shared stores, with
//! no background tasks. Construction takes an explicit catalog handle,
//! so tests build a fresh isolated registry per run.

pub mod records;
pub mod registry;
pub mod store;
pub mod summary;

pub use records::{AiSystemRecord, EvidenceRecord, NewSystem, TrackingRecord};
pub use registry::{Registry, RegistryError, StatusChange, StatusUpdate};
pub use store::Store;
pub use summary::{ComplianceSummary, StatusBreakdown};
