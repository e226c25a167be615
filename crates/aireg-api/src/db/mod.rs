//! # Database Persistence
//!
//! Optional Postgres write-through. The in-memory stores remain the
//! read path; the database exists so state survives restarts. When
//! `DATABASE_URL` is unset the API runs in-memory only.
//!
//! Enum columns store the closed enums' wire strings (`"high"`,
//! `"not_started"`). The read path parses them back through `FromStr`;
//! rows that fail to parse are skipped with an error log, never
//! defaulted to some other value.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub mod evidence;
pub mod mappings;
pub mod requirements;
pub mod systems;

/// Table definitions, executed one statement at a time on startup.
///
/// `requirement_mappings` enforces the at-most-one-record-per-pair
/// invariant with a UNIQUE constraint; deleting a system cascades to
/// its mappings and evidence.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS ai_systems (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        risk_category TEXT NOT NULL,
        organization TEXT,
        department TEXT,
        owner_contact TEXT,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS requirements (
        id UUID PRIMARY KEY,
        article TEXT NOT NULL,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        applies_to JSONB NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS requirement_mappings (
        id UUID PRIMARY KEY,
        ai_system_id UUID NOT NULL REFERENCES ai_systems(id) ON DELETE CASCADE,
        requirement_id UUID NOT NULL REFERENCES requirements(id),
        status TEXT NOT NULL,
        notes TEXT,
        updated_by TEXT,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL,
        UNIQUE (ai_system_id, requirement_id)
    )",
    "CREATE TABLE IF NOT EXISTS evidence (
        id UUID PRIMARY KEY,
        ai_system_id UUID NOT NULL REFERENCES ai_systems(id) ON DELETE CASCADE,
        requirement_mapping_id UUID REFERENCES requirement_mappings(id) ON DELETE SET NULL,
        title TEXT NOT NULL,
        description TEXT,
        file_url TEXT,
        created_at TIMESTAMPTZ NOT NULL
    )",
];

/// Initialize the connection pool from `DATABASE_URL` and ensure the
/// schema exists. Returns `Ok(None)` when the variable is unset.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::info!("DATABASE_URL not set — running in-memory only");
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await?;
    ensure_schema(&pool).await?;
    tracing::info!("database connected, schema ensured");
    Ok(Some(pool))
}

/// Create the tables if they do not exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
