//! Requirement catalog persistence.
//!
//! The catalog is seeded in code with identifiers derived from citation
//! labels, so syncing is an idempotent upsert: the same seed produces
//! the same rows on every startup, and mapping rows keep valid foreign
//! keys across restarts.

use sqlx::PgPool;

use aireg_catalog::Requirement;

/// Upsert the seed catalog into the `requirements` table.
pub async fn sync_catalog(pool: &PgPool, requirements: &[Requirement]) -> Result<(), sqlx::Error> {
    for requirement in requirements {
        let applies_to: Vec<&str> = requirement.applies_to.iter().map(|c| c.as_str()).collect();
        let applies_to = serde_json::to_value(&applies_to).map_err(|e| {
            tracing::error!(article = %requirement.article, error = %e, "failed to serialize applicability set");
            sqlx::Error::Encode(Box::new(e))
        })?;

        sqlx::query(
            "INSERT INTO requirements (id, article, title, description, applies_to)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE
             SET article = EXCLUDED.article,
                 title = EXCLUDED.title,
                 description = EXCLUDED.description,
                 applies_to = EXCLUDED.applies_to",
        )
        .bind(*requirement.id.as_uuid())
        .bind(&requirement.article)
        .bind(&requirement.title)
        .bind(&requirement.description)
        .bind(&applies_to)
        .execute(pool)
        .await?;
    }

    tracing::info!(count = requirements.len(), "requirement catalog synced to database");
    Ok(())
}
