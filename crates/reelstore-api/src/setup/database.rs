//! Database setup and initialization

use anyhow::{Context, Result};
use reelstore_core::Config;
use reelstore_db::VideoRepository;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

/// Open the metadata index and create its schema.
pub async fn setup_database(config: &Config) -> Result<SqlitePool> {
    tracing::info!(database_url = %config.database_url(), "Connecting to database...");

    let in_memory = config.database_url().contains(":memory:");

    let options = SqliteConnectOptions::from_str(config.database_url())
        .context("Invalid DATABASE_URL")?
        .create_if_missing(true)
        .synchronous(SqliteSynchronous::Normal)
        // Concurrent request writers wait instead of failing with "database is locked".
        .busy_timeout(Duration::from_secs(5));
    let options = if in_memory {
        options
    } else {
        options.journal_mode(SqliteJournalMode::Wal)
    };

    // Every connection to an in-memory database is a separate database.
    let max_connections = if in_memory {
        1
    } else {
        config.db_max_connections()
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds()))
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(max_connections, "Database connected successfully");

    VideoRepository::new(pool.clone())
        .migrate()
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}
