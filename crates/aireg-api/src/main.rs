//! # aireg-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the AI compliance register.
//! Binds to configurable port (default 8080).

use std::sync::Arc;

use aireg_api::state::{AppConfig, AppState};
use aireg_catalog::seed::eu_ai_act_catalog;
use aireg_catalog::RequirementSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Build configuration from environment.
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let database_url = std::env::var("DATABASE_URL").ok();
    let config = AppConfig { port, database_url };

    // Initialize database pool (optional — absent means in-memory only).
    let db_pool = aireg_api::db::init_pool().await.map_err(|e| {
        tracing::error!("Database initialization failed: {e}");
        anyhow::anyhow!(e)
    })?;

    // Seed the requirement catalog and keep the database copy in sync.
    let catalog = eu_ai_act_catalog()?;
    if let Some(pool) = &db_pool {
        aireg_api::db::requirements::sync_catalog(pool, &catalog.list_all()?).await?;
    }

    let state = AppState::with_config(config, Arc::new(catalog), db_pool);

    // Hydrate in-memory stores from database (if connected).
    state.hydrate_from_db().await.map_err(|e| {
        tracing::error!("Database hydration failed: {e}");
        anyhow::anyhow!(e)
    })?;

    let app = aireg_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("AI compliance register API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
