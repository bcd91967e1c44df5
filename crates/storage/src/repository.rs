// SPDX-License-Identifier: MIT

//! CRUD for the `repositories` table.

use crate::error::{Result, StorageError};
use judge_core::Repository;
use sqlx::SqlitePool;

#[derive(Debug, sqlx::FromRow)]
struct RepositoryRow {
    repository_id: String,
    subject: String,
    provider: String,
    challenge_folder_name: String,
    startpoint: String,
    stage: i64,
    total_stages: i64,
    create_time: String,
    update_time: String,
}

impl From<RepositoryRow> for Repository {
    fn from(row: RepositoryRow) -> Self {
        Repository {
            repository_id: row.repository_id,
            subject: row.subject,
            provider: row.provider,
            challenge_folder_name: row.challenge_folder_name,
            startpoint: row.startpoint,
            stage: row.stage,
            total_stages: row.total_stages,
            create_time: row.create_time,
            update_time: row.update_time,
        }
    }
}

pub async fn insert(pool: &SqlitePool, repo: &Repository) -> Result<()> {
    sqlx::query(
        "INSERT INTO repositories \
         (repository_id, subject, provider, challenge_folder_name, startpoint, stage, total_stages, create_time, update_time) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&repo.repository_id)
    .bind(&repo.subject)
    .bind(&repo.provider)
    .bind(&repo.challenge_folder_name)
    .bind(&repo.startpoint)
    .bind(repo.stage)
    .bind(repo.total_stages)
    .bind(&repo.create_time)
    .bind(&repo.update_time)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get(pool: &SqlitePool, repository_id: &str) -> Result<Repository> {
    let row = sqlx::query_as::<_, RepositoryRow>(
        "SELECT repository_id, subject, provider, challenge_folder_name, startpoint, stage, \
         total_stages, create_time, update_time FROM repositories WHERE repository_id = ?",
    )
    .bind(repository_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StorageError::RepositoryNotFound(repository_id.to_string()))?;
    Ok(row.into())
}

/// Raise `stage` to `target` if `target` is further along, in one atomic
/// statement. A no-op (not an error) if the repository is already there
/// or past it — callers never need to read-before-write to avoid moving
/// stage backwards.
pub async fn advance_stage_if_behind(
    pool: &SqlitePool,
    repository_id: &str,
    target_stage: i64,
    update_time: &str,
) -> Result<()> {
    sqlx::query(
        "UPDATE repositories SET stage = ?, update_time = ? WHERE repository_id = ? AND stage < ?",
    )
    .bind(target_stage)
    .bind(update_time)
    .bind(repository_id)
    .bind(target_stage)
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
