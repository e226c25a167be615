//! Evidence persistence operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use aireg_core::{EvidenceId, MappingId, SystemId};
use aireg_registry::EvidenceRecord;

/// Load all evidence records from the database into the in-memory store
/// on startup.
pub async fn load_all(pool: &PgPool) -> Result<Vec<EvidenceRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, EvidenceRow>(
        "SELECT id, ai_system_id, requirement_mapping_id, title, description, file_url, created_at
         FROM evidence ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(EvidenceRow::into_record).collect())
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct EvidenceRow {
    id: Uuid,
    ai_system_id: Uuid,
    requirement_mapping_id: Option<Uuid>,
    title: String,
    description: Option<String>,
    file_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl EvidenceRow {
    fn into_record(self) -> EvidenceRecord {
        EvidenceRecord {
            id: EvidenceId::from(self.id),
            system_id: SystemId::from(self.ai_system_id),
            mapping_id: self.requirement_mapping_id.map(MappingId::from),
            title: self.title,
            description: self.description,
            file_url: self.file_url,
            created_at: self.created_at,
        }
    }
}
