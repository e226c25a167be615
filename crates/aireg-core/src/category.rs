//! # Risk Category — Single Source of Truth
//!
//! Defines the `RiskCategory` enum with the four regulatory risk tiers of
//! the EU AI Act (Article 6 classification). This is the ONE definition
//! used across the entire register. Every `match` on `RiskCategory` must
//! be exhaustive — adding a tier forces every consumer to handle it at
//! compile time.
//!
//! The category determines which catalog requirements attach to a system
//! at registration time.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Regulatory risk tier of an AI system.
///
/// The tier is assigned at registration and drives requirement
/// applicability: each catalog requirement declares the set of tiers it
/// is in force for.
///
/// | Tier | Meaning |
/// |------|---------|
/// | Unacceptable | Prohibited AI practices |
/// | High | High-risk AI systems (Annex III) |
/// | Limited | Limited risk — transparency obligations |
/// | Minimal | Minimal or no risk |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    /// Prohibited AI practices.
    Unacceptable,
    /// High-risk AI systems.
    High,
    /// Limited risk (transparency obligations).
    Limited,
    /// Minimal or no risk.
    Minimal,
}

/// Total number of risk categories. Used for compile-time assertions.
pub const RISK_CATEGORY_COUNT: usize = 4;

impl RiskCategory {
    /// Returns all risk categories in canonical order.
    pub fn all() -> &'static [RiskCategory] {
        &[Self::Unacceptable, Self::High, Self::Limited, Self::Minimal]
    }

    /// Returns the snake_case string identifier for this category.
    ///
    /// This is the external wire form, matching the serde serialization
    /// format and the values stored in the `risk_category` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unacceptable => "unacceptable",
            Self::High => "high",
            Self::Limited => "limited",
            Self::Minimal => "minimal",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskCategory {
    type Err = ValidationError;

    /// Parse a risk category from its snake_case string identifier.
    ///
    /// Accepts the same identifiers produced by [`RiskCategory::as_str()`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unacceptable" => Ok(Self::Unacceptable),
            "high" => Ok(Self::High),
            "limited" => Ok(Self::Limited),
            "minimal" => Ok(Self::Minimal),
            other => Err(ValidationError::UnknownRiskCategory(other.to_string())),
        }
    }
}
