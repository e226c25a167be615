//! # Requirement — Validated Reference Data
//!
//! One regulatory obligation, tagged with the risk categories it is in
//! force for. The applicability set is a proper set of the closed
//! [`RiskCategory`] enum, validated once at construction rather than
//! parsed on every read.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use uuid::Uuid;

use aireg_core::{RequirementId, RiskCategory, ValidationError};

/// Namespace for deriving requirement identifiers from citation labels.
const REQUIREMENT_NAMESPACE: Uuid = Uuid::from_bytes([
    0x8f, 0x1d, 0x4a, 0x02, 0x7c, 0x55, 0x4e, 0x19, 0x9b, 0x3a, 0x64, 0xd0, 0x2e, 0x51, 0xc7,
    0x40,
]);

/// A single regulatory requirement from the catalog.
///
/// Invariants: `applies_to` is never empty, and the identifier is
/// derived deterministically (UUIDv5) from the citation label, so
/// reseeding the catalog yields stable identifiers across restarts.
/// Citation labels must therefore be unique within a catalog.
/// [`Requirement::new`] is the only constructor, so both invariants
/// hold for every live value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Unique requirement identifier.
    pub id: RequirementId,
    /// Regulatory citation label, e.g. `"Article 9"`.
    pub article: String,
    /// Short human-readable title.
    pub title: String,
    /// Full description of the obligation.
    pub description: String,
    /// The risk categories this requirement is in force for.
    pub applies_to: BTreeSet<RiskCategory>,
}

impl Requirement {
    /// Construct a validated requirement.
    ///
    /// Rejects empty article/title and an empty applicability set.
    pub fn new(
        article: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        applies_to: impl IntoIterator<Item = RiskCategory>,
    ) -> Result<Self, ValidationError> {
        let article = article.into();
        let title = title.into();
        if article.trim().is_empty() {
            return Err(ValidationError::EmptyField("article"));
        }
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }
        let applies_to: BTreeSet<RiskCategory> = applies_to.into_iter().collect();
        if applies_to.is_empty() {
            return Err(ValidationError::EmptyApplicability(article));
        }
        let id = RequirementId::from(Uuid::new_v5(&REQUIREMENT_NAMESPACE, article.as_bytes()));
        Ok(Self {
            id,
            article,
            title,
            description: description.into(),
            applies_to,
        })
    }

    /// Whether this requirement is in force for the given risk category.
    pub fn applies_to(&self, category: RiskCategory) -> bool {
        self.applies_to.contains(&category)
    }
}
