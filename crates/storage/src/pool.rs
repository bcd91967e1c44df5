// SPDX-License-Identifier: MIT

//! Connection-pool bootstrap: open the SQLite file (or an in-memory
//! database for tests), set WAL mode, and run embedded migrations.

use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Open (creating if absent) the SQLite database at `path` and apply
/// migrations. WAL journal mode lets the worker pool's readers run
/// alongside the serial-allocation writer without blocking on it.
pub async fn open(path: &Path) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5));
    let pool = SqlitePoolOptions::new().max_connections(5).connect_with(options).await?;
    MIGRATOR.run(&pool).await?;
    tracing::debug!(path = %path.display(), "opened storage pool");
    Ok(pool)
}

/// Open a private, process-local in-memory database. Each call gets its
/// own isolated database (single connection, so callers see a consistent
/// view of their own writes) — used by tests only.
pub async fn open_in_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new().filename(":memory:").create_if_missing(true);
    let pool = SqlitePoolOptions::new().max_connections(1).connect_with(options).await?;
    MIGRATOR.run(&pool).await?;
    Ok(pool)
}
