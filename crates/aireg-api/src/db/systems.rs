//! AI system persistence operations.
//!
//! Registration is the transactional boundary: the system row and its
//! tracking-record rows commit together or not at all.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use aireg_core::{RiskCategory, SystemId};
use aireg_registry::{AiSystemRecord, TrackingRecord};

/// Insert a system and its tracking records in one transaction.
pub async fn persist_registration(
    pool: &PgPool,
    system: &AiSystemRecord,
    mappings: &[TrackingRecord],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO ai_systems (id, name, description, risk_category, organization, department, owner_contact, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(*system.id.as_uuid())
    .bind(&system.name)
    .bind(&system.description)
    .bind(system.risk_category.as_str())
    .bind(&system.organization)
    .bind(&system.department)
    .bind(&system.owner_contact)
    .bind(system.created_at)
    .bind(system.updated_at)
    .execute(&mut *tx)
    .await?;

    for mapping in mappings {
        crate::db::mappings::insert(&mut *tx, mapping).await?;
    }

    tx.commit().await
}

/// Load all systems from the database into the in-memory store on startup.
pub async fn load_all(pool: &PgPool) -> Result<Vec<AiSystemRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, SystemRow>(
        "SELECT id, name, description, risk_category, organization, department, owner_contact, created_at, updated_at
         FROM ai_systems ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().filter_map(SystemRow::into_record).collect())
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct SystemRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    risk_category: String,
    organization: Option<String>,
    department: Option<String>,
    owner_contact: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SystemRow {
    fn into_record(self) -> Option<AiSystemRecord> {
        let risk_category: RiskCategory = match self.risk_category.parse() {
            Ok(category) => category,
            Err(e) => {
                tracing::error!(
                    id = %self.id,
                    risk_category = %self.risk_category,
                    error = %e,
                    "unknown risk category in database — skipping row"
                );
                return None;
            }
        };

        Some(AiSystemRecord {
            id: SystemId::from(self.id),
            name: self.name,
            description: self.description,
            risk_category,
            organization: self.organization,
            department: self.department,
            owner_contact: self.owner_contact,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
