//! SQLite pool construction and schema migrations.

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

/// Opens a pool with foreign key enforcement enabled on every connection.
///
/// # Errors
///
/// Returns [`AppError::Storage`] if the URL is malformed or the database file
/// cannot be opened.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    connect_timeout: Duration,
) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(connect_timeout)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Applies the embedded migrations.
pub async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::debug!("Migrations applied");
    Ok(())
}

/// Opens a migrated in-memory database.
///
/// The pool holds exactly one connection that never expires: every
/// connection to `sqlite::memory:` is a separate empty database.
pub async fn connect_in_memory() -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}
