//! # Route Modules
//!
//! One module per resource: AI systems (registration, listing,
//! per-system requirements, compliance summary), the requirement
//! catalog, and tracking-record status updates.

pub mod mappings;
pub mod requirements;
pub mod systems;
