//! Startup sequence shared by every entry point.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::Config;
use crate::infrastructure::database;
use crate::state::AppState;

/// Opens the database, applies migrations and wires the services.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrated.
pub async fn init(config: &Config) -> Result<AppState> {
    let pool = database::connect(
        &config.database_url,
        config.db_max_connections,
        config.connect_timeout(),
    )
    .await
    .context("Failed to open database")?;
    tracing::info!("Connected to database");

    database::migrate(&pool)
        .await
        .context("Failed to apply migrations")?;

    Ok(AppState::new(Arc::new(pool)))
}
