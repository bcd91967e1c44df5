// SPDX-License-Identifier: MIT

//! Submission Intake: `submit()`. One-to-one port of the source's
//! `pushToPending`, with the non-blocking queue-admission semantics this
//! spec calls for instead of the source's blocking channel send.

use std::sync::Arc;

use judge_core::{Clock, Testing, TestingTask};

use crate::error::IntakeError;
use crate::queue::JudgeEngine;

pub struct IntakeContext {
    pub pool: sqlx::SqlitePool,
    pub engine: Arc<JudgeEngine>,
    pub clock: Arc<dyn Clock>,
    pub challenge_storage_folder: std::path::PathBuf,
}

/// Submit `repository_id` for testing at `stage` (or the repository's
/// current stage, if omitted). `caller_provider`/`caller_subject` must match
/// the repository's owner.
pub async fn submit(
    ctx: &IntakeContext,
    repository_id: &str,
    caller_provider: &str,
    caller_subject: &str,
    stage: Option<i64>,
) -> Result<(), IntakeError> {
    let repo = judge_storage::repository::get(&ctx.pool, repository_id)
        .await
        .map_err(|err| match err {
            judge_storage::StorageError::RepositoryNotFound(id) => IntakeError::NotFound(id),
            other => IntakeError::Storage(other),
        })?;

    if !repo.owner_matches(caller_provider, caller_subject) {
        return Err(IntakeError::Unauthorized);
    }

    let stage = stage.unwrap_or(repo.stage);

    // Serial allocation must precede both challenge parsing and queue
    // admission: duplicate submissions racing on the same repository must
    // never collide on the composite (repository_id, serial) key, even if
    // one of them goes on to fail later in this function.
    let serial = judge_storage::testing_serial::allocate_next_serial(&ctx.pool, repository_id).await?;

    let challenge = judge_core::parse_challenge(&ctx.challenge_storage_folder, &repo.challenge_folder_name)
        .map_err(|source| IntakeError::Challenge { folder_name: repo.challenge_folder_name.clone(), source })?;

    let create_time = ctx.clock.now_utc_rfc3339();
    let testing = Testing::new_pending(repository_id.to_string(), serial, stage, create_time);
    judge_storage::testing::insert_pending(&ctx.pool, &testing).await?;

    let task = TestingTask::new(repository_id.to_string(), serial, stage, challenge, ctx.clock.now());
    ctx.engine.try_submit(task).await
}

#[cfg(test)]
#[path = "intake_tests.rs"]
mod tests;
