// SPDX-License-Identifier: MIT

//! CRUD for the `testing` table: one row per submission attempt.

use crate::error::{Result, StorageError};
use judge_core::{Testing, TestingStatus};
use sqlx::SqlitePool;
use std::str::FromStr;

#[derive(Debug, sqlx::FromRow)]
struct TestingRow {
    repository_id: String,
    serial: i64,
    stage: i64,
    status: String,
    message: String,
    log: String,
    create_time: String,
    run_start_time: String,
    run_end_time: String,
}

impl TryFrom<TestingRow> for Testing {
    type Error = StorageError;

    fn try_from(row: TestingRow) -> std::result::Result<Self, Self::Error> {
        let status = TestingStatus::from_str(&row.status)
            .map_err(|err| StorageError::Database(sqlx::Error::Decode(Box::new(err))))?;
        Ok(Testing {
            repository_id: row.repository_id,
            serial: row.serial,
            stage: row.stage,
            status,
            message: row.message,
            log: row.log,
            create_time: row.create_time,
            run_start_time: row.run_start_time,
            run_end_time: row.run_end_time,
        })
    }
}

pub async fn insert_pending(pool: &SqlitePool, testing: &Testing) -> Result<()> {
    sqlx::query(
        "INSERT INTO testing \
         (repository_id, serial, stage, status, message, log, create_time, run_start_time, run_end_time) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&testing.repository_id)
    .bind(testing.serial)
    .bind(testing.stage)
    .bind(testing.status.as_str())
    .bind(&testing.message)
    .bind(&testing.log)
    .bind(&testing.create_time)
    .bind(&testing.run_start_time)
    .bind(&testing.run_end_time)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get(pool: &SqlitePool, repository_id: &str, serial: i64) -> Result<Testing> {
    let row = sqlx::query_as::<_, TestingRow>(
        "SELECT repository_id, serial, stage, status, message, log, create_time, run_start_time, \
         run_end_time FROM testing WHERE repository_id = ? AND serial = ?",
    )
    .bind(repository_id)
    .bind(serial)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StorageError::TestingNotFound {
        repository_id: repository_id.to_string(),
        serial,
    })?;
    row.try_into()
}

/// List the most recent testing attempts for a repository, newest first.
/// Read-only query used by the operator CLI's `status` command.
pub async fn list_recent(pool: &SqlitePool, repository_id: &str, limit: i64) -> Result<Vec<Testing>> {
    let rows = sqlx::query_as::<_, TestingRow>(
        "SELECT repository_id, serial, stage, status, message, log, create_time, run_start_time, \
         run_end_time FROM testing WHERE repository_id = ? ORDER BY serial DESC LIMIT ?",
    )
    .bind(repository_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(TryInto::try_into).collect()
}

/// Move a record to `Running` and stamp `run_start_time`. Called once, when
/// a worker picks the task up off the queue.
pub async fn mark_running(
    pool: &SqlitePool,
    repository_id: &str,
    serial: i64,
    run_start_time: &str,
) -> Result<()> {
    sqlx::query("UPDATE testing SET status = ?, run_start_time = ? WHERE repository_id = ? AND serial = ?")
        .bind(TestingStatus::Running.as_str())
        .bind(run_start_time)
        .bind(repository_id)
        .bind(serial)
        .execute(pool)
        .await?;
    Ok(())
}

/// Write a terminal outcome: status, message, log, and `run_end_time`. The
/// Task Runner calls this exactly once per record, as its last act before
/// cleanup.
pub async fn finish(
    pool: &SqlitePool,
    repository_id: &str,
    serial: i64,
    status: TestingStatus,
    message: &str,
    log: &str,
    run_end_time: &str,
) -> Result<()> {
    debug_assert!(status.is_terminal(), "finish() called with a non-terminal status");
    sqlx::query(
        "UPDATE testing SET status = ?, message = ?, log = ?, run_end_time = ? \
         WHERE repository_id = ? AND serial = ?",
    )
    .bind(status.as_str())
    .bind(message)
    .bind(log)
    .bind(run_end_time)
    .bind(repository_id)
    .bind(serial)
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
#[path = "testing_tests.rs"]
mod tests;
