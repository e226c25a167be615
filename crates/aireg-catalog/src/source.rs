//! # Catalog Read Seam
//!
//! [`RequirementSource`] abstracts "fetch the full catalog" so the
//! registry can treat the catalog as an external collaborator. The
//! production implementation is the in-memory [`Catalog`]; tests
//! substitute a failing source to verify that registration commits
//! nothing when the catalog is unreadable.

use std::sync::Arc;

use thiserror::Error;

use crate::requirement::Requirement;

/// Failure to read the requirement catalog.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    /// The catalog backend could not be read.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the full requirement catalog.
///
/// The catalog is bounded by statute size (tens of entries), so there is
/// no filtering or paging — `list_all` returns everything and callers
/// select by applicability.
pub trait RequirementSource {
    /// Return every requirement in the catalog. Order is irrelevant;
    /// membership is what matters.
    fn list_all(&self) -> Result<Vec<Requirement>, CatalogError>;
}

/// In-memory catalog, seeded once and shared cheaply via `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    requirements: Arc<Vec<Requirement>>,
}

impl Catalog {
    /// Build a catalog from seeded requirements.
    pub fn new(requirements: Vec<Requirement>) -> Self {
        Self {
            requirements: Arc::new(requirements),
        }
    }

    /// Number of requirements in the catalog.
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Whether the catalog holds no requirements.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl RequirementSource for Catalog {
    fn list_all(&self) -> Result<Vec<Requirement>, CatalogError> {
        Ok(self.requirements.as_ref().clone())
    }
}
