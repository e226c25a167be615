//! # EU AI Act Seed Set
//!
//! The production catalog: one entry per tracked EU AI Act obligation,
//! each tagged with the risk tiers it is in force for. Minimal-risk
//! systems deliberately match no entry — the Act imposes no mandatory
//! obligations on them, and a zero-requirement registration is a valid
//! outcome.

use aireg_core::{RiskCategory, ValidationError};

use crate::requirement::Requirement;
use crate::source::Catalog;

use RiskCategory::{High, Limited, Unacceptable};

/// Build the EU AI Act requirement catalog.
///
/// Validated at seed time: every entry carries a non-empty applicability
/// set or this function fails, which aborts startup.
pub fn eu_ai_act_catalog() -> Result<Catalog, ValidationError> {
    let requirements = vec![
        Requirement::new(
            "Article 5",
            "Prohibited AI practices",
            "The system falls under a prohibited practice and must not be placed on the market, \
             put into service, or used.",
            [Unacceptable],
        )?,
        Requirement::new(
            "Article 9",
            "Risk management system",
            "Establish, implement, document and maintain a continuous, iterative risk management \
             system covering the entire lifecycle.",
            [High],
        )?,
        Requirement::new(
            "Article 10",
            "Data and data governance",
            "Training, validation and testing data sets must meet quality criteria and be subject \
             to appropriate data governance practices.",
            [High],
        )?,
        Requirement::new(
            "Article 11",
            "Technical documentation",
            "Draw up technical documentation before placing the system on the market and keep it \
             up to date.",
            [High],
        )?,
        Requirement::new(
            "Article 12",
            "Record-keeping",
            "The system must technically allow automatic recording of events (logs) over its \
             lifetime.",
            [High],
        )?,
        Requirement::new(
            "Article 13",
            "Transparency and provision of information to deployers",
            "Design and develop the system so its operation is sufficiently transparent for \
             deployers to interpret output and use it appropriately.",
            [High],
        )?,
        Requirement::new(
            "Article 14",
            "Human oversight",
            "Design and develop the system so it can be effectively overseen by natural persons \
             during use.",
            [High],
        )?,
        Requirement::new(
            "Article 15",
            "Accuracy, robustness and cybersecurity",
            "Achieve appropriate levels of accuracy, robustness and cybersecurity, performing \
             consistently throughout the lifecycle.",
            [High],
        )?,
        Requirement::new(
            "Article 17",
            "Quality management system",
            "Providers must put a documented quality management system in place ensuring \
             compliance with the regulation.",
            [High],
        )?,
        Requirement::new(
            "Article 26",
            "Obligations of deployers",
            "Deployers must use the system in accordance with its instructions, assign competent \
             human oversight, and monitor operation.",
            [High],
        )?,
        Requirement::new(
            "Article 43",
            "Conformity assessment",
            "Undergo the relevant conformity assessment procedure before placing the system on \
             the market or putting it into service.",
            [High],
        )?,
        Requirement::new(
            "Article 50",
            "Transparency obligations for certain AI systems",
            "Inform natural persons that they are interacting with an AI system, and mark \
             synthetic audio, image, video or text content as artificially generated.",
            [Limited],
        )?,
        Requirement::new(
            "Article 72",
            "Post-market monitoring",
            "Establish and document a post-market monitoring system proportionate to the nature \
             of the AI system and its risks.",
            [High],
        )?,
    ];

    Ok(Catalog::new(requirements))
}
