// SPDX-License-Identifier: MIT

//! Per-repository serial allocation.
//!
//! Serials are unique but not gap-free: the counter is committed before the
//! caller parses the challenge or enqueues the task, so a later failure
//! still consumes the serial it was given. See `judge-engine::intake`.

use crate::error::Result;
use sqlx::SqlitePool;

/// Allocate the next serial for `repository_id`, creating its counter row
/// on first use. `BEGIN IMMEDIATE` takes the write lock up front so two
/// concurrent submissions to the same repository serialize instead of
/// racing a read-then-write.
pub async fn allocate_next_serial(pool: &SqlitePool, repository_id: &str) -> Result<i64> {
    let mut conn = pool.acquire().await?;
    sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;

    let allocated: Result<i64> = async {
        let existing: Option<i64> =
            sqlx::query_scalar("SELECT next_serial FROM testing_serials WHERE repository_id = ?")
                .bind(repository_id)
                .fetch_optional(&mut *conn)
                .await?;
        let serial = existing.unwrap_or(0) + 1;
        if existing.is_some() {
            sqlx::query("UPDATE testing_serials SET next_serial = ? WHERE repository_id = ?")
                .bind(serial)
                .bind(repository_id)
                .execute(&mut *conn)
                .await?;
        } else {
            sqlx::query("INSERT INTO testing_serials (repository_id, next_serial) VALUES (?, ?)")
                .bind(repository_id)
                .bind(serial)
                .execute(&mut *conn)
                .await?;
        }
        Ok(serial)
    }
    .await;

    match allocated {
        Ok(serial) => {
            sqlx::query("COMMIT").execute(&mut *conn).await?;
            Ok(serial)
        }
        Err(err) => {
            tracing::warn!(repository_id, %err, "serial allocation rolled back");
            let _ = sqlx::query("ROLLBACK").execute(&mut *conn).await;
            Err(err)
        }
    }
}

#[cfg(test)]
#[path = "testing_serial_tests.rs"]
mod tests;
