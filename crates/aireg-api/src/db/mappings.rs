//! Tracking record persistence operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use aireg_core::{ComplianceStatus, MappingId, RequirementId, SystemId};
use aireg_registry::TrackingRecord;

/// Insert a tracking record. Takes any executor so registration can run
/// it inside the system's transaction.
pub async fn insert<'e>(
    executor: impl sqlx::PgExecutor<'e>,
    record: &TrackingRecord,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO requirement_mappings (id, ai_system_id, requirement_id, status, notes, updated_by, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(*record.id.as_uuid())
    .bind(*record.system_id.as_uuid())
    .bind(*record.requirement_id.as_uuid())
    .bind(record.status.as_str())
    .bind(&record.notes)
    .bind(&record.updated_by)
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(executor)
    .await?;

    Ok(())
}

/// Persist the mutable fields of a tracking record after a status update.
pub async fn update(pool: &PgPool, record: &TrackingRecord) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE requirement_mappings SET status = $1, notes = $2, updated_by = $3, updated_at = $4 WHERE id = $5",
    )
    .bind(record.status.as_str())
    .bind(&record.notes)
    .bind(&record.updated_by)
    .bind(record.updated_at)
    .bind(*record.id.as_uuid())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Load all tracking records from the database into the in-memory store
/// on startup.
pub async fn load_all(pool: &PgPool) -> Result<Vec<TrackingRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, MappingRow>(
        "SELECT id, ai_system_id, requirement_id, status, notes, updated_by, created_at, updated_at
         FROM requirement_mappings ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().filter_map(MappingRow::into_record).collect())
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct MappingRow {
    id: Uuid,
    ai_system_id: Uuid,
    requirement_id: Uuid,
    status: String,
    notes: Option<String>,
    updated_by: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MappingRow {
    fn into_record(self) -> Option<TrackingRecord> {
        let status: ComplianceStatus = match self.status.parse() {
            Ok(status) => status,
            Err(e) => {
                tracing::error!(
                    id = %self.id,
                    status = %self.status,
                    error = %e,
                    "unknown compliance status in database — skipping row"
                );
                return None;
            }
        };

        Some(TrackingRecord {
            id: MappingId::from(self.id),
            system_id: SystemId::from(self.ai_system_id),
            requirement_id: RequirementId::from(self.requirement_id),
            status,
            notes: self.notes,
            updated_by: self.updated_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
