// SPDX-License-Identifier: MIT

//! Task Runner: one job's state machine, steps 1-9. A straight-line port of
//! `runTask`/`cleanUp` in the source — persist after every transition,
//! independent of which branch got there, and guarantee cleanup runs even
//! when an early step fails.
//!
//! The Task Runner never propagates an error of its own: every path below
//! ends by writing a terminal `Testing` status. Failures that happen while
//! *writing* that status are logged (there is nothing else a runner can do
//! with them) rather than returned, since there is no caller left to
//! receive them — the dispatch loop that invoked this function already
//! moved on to its next iteration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use judge_core::{Clock, TestingStatus, TestingTask};
use judge_container::{BuildSpec, ContainerDriver, RunSpec};

use crate::run_id;

pub struct RunnerContext {
    pub pool: sqlx::SqlitePool,
    pub driver: Arc<dyn ContainerDriver>,
    pub clock: Arc<dyn Clock>,
    pub repository_storage_root: PathBuf,
    pub tmp_storage_root: PathBuf,
    pub pending_queue_timeout: Duration,
    pub running_timeout: Duration,
}

/// Outcome of everything from "begin running" through report interpretation.
/// Computed in one place so cleanup (below) always runs regardless of which
/// step produced it.
struct Outcome {
    status: TestingStatus,
    message: String,
    log: String,
    advance_to_stage: Option<i64>,
}

impl Outcome {
    fn terminal(status: TestingStatus, message: impl Into<String>, log: impl Into<String>) -> Self {
        Self { status, message: message.into(), log: log.into(), advance_to_stage: None }
    }
}

pub async fn run(ctx: &RunnerContext, task: TestingTask) {
    // Step 1: wait-timeout check, before anything is built.
    let waited = ctx.clock.now().saturating_duration_since(task.waiting_since);
    if waited > ctx.pending_queue_timeout {
        let run_end_time = ctx.clock.now_utc_rfc3339();
        finish(ctx, &task, TestingStatus::WaitingTimeout, "", "", &run_end_time).await;
        return;
    }

    // Step 2: begin running.
    let run_start_time = ctx.clock.now_utc_rfc3339();
    if let Err(err) =
        judge_storage::testing::mark_running(&ctx.pool, &task.repository_id, task.serial, &run_start_time).await
    {
        tracing::error!(%err, repository_id = %task.repository_id, serial = task.serial, "failed to mark testing running");
        return;
    }

    // Step 3: resolve repository + startpoint.
    let repo = match judge_storage::repository::get(&ctx.pool, &task.repository_id).await {
        Ok(repo) => repo,
        Err(err) => {
            let run_end_time = ctx.clock.now_utc_rfc3339();
            finish(ctx, &task, TestingStatus::Error, format!("failed to load repository: {err}"), "", &run_end_time)
                .await;
            return;
        }
    };
    let Some(startpoint) = task.challenge.find_start_point(&repo.startpoint) else {
        let run_end_time = ctx.clock.now_utc_rfc3339();
        finish(
            ctx,
            &task,
            TestingStatus::Error,
            format!("startpoint {} not found in challenge snapshot", repo.startpoint),
            "",
            &run_end_time,
        )
        .await;
        return;
    };

    // Step 4: prepare paths and names.
    let repo_path = ctx
        .repository_storage_root
        .join(&repo.provider)
        .join(&repo.subject)
        .join(&repo.challenge_folder_name)
        .join(&repo.repository_id);
    let dockerfile = repo_path.join(&startpoint.dockerfile);
    let run_id = run_id::build_run_id(
        &task.repository_id,
        &repo.provider,
        &repo.subject,
        task.serial,
        task.stage,
        ctx.clock.now_epoch_ms(),
    );
    let image_name = run_id::image_name(&run_id);
    let container_name = run_id::container_name(&run_id);
    let temp_path = ctx.tmp_storage_root.join(&run_id);
    let report_mount_path = temp_path.join("report");

    if let Err(err) = tokio::fs::create_dir_all(&report_mount_path).await {
        let run_end_time = ctx.clock.now_utc_rfc3339();
        finish(
            ctx,
            &task,
            TestingStatus::Error,
            format!("failed to create report mount path: {err}"),
            "",
            &run_end_time,
        )
        .await;
        return;
    }

    // Steps 5-8: build, run, read report. Cleanup (step 9) always runs
    // afterward, whichever branch below produced `outcome`.
    let outcome = execute(ctx, &task, &dockerfile, &image_name, &container_name, &report_mount_path).await;

    ctx.driver.cleanup(&image_name, &container_name, &temp_path).await;

    let run_end_time = ctx.clock.now_utc_rfc3339();
    finish(ctx, &task, outcome.status, &outcome.message, &outcome.log, &run_end_time).await;

    if let Some(target_stage) = outcome.advance_to_stage {
        if let Err(err) =
            judge_storage::repository::advance_stage_if_behind(&ctx.pool, &task.repository_id, target_stage, &run_end_time)
                .await
        {
            tracing::error!(%err, repository_id = %task.repository_id, target_stage, "failed to advance repository stage");
        }
    }
}

async fn execute(
    ctx: &RunnerContext,
    task: &TestingTask,
    dockerfile: &PathBuf,
    image_name: &str,
    container_name: &str,
    report_mount_path: &PathBuf,
) -> Outcome {
    let build_spec = BuildSpec {
        context_dir: dockerfile.parent().map(PathBuf::from).unwrap_or_else(|| dockerfile.clone()),
        dockerfile: dockerfile.clone(),
        image_name: image_name.to_string(),
    };
    let build_log = match ctx.driver.build(&build_spec).await {
        Ok(log) => log,
        Err(judge_container::DriverError::Build { message, log }) => {
            return Outcome::terminal(TestingStatus::Error, format!("build failed: {message}"), log);
        }
        Err(err) => return Outcome::terminal(TestingStatus::Error, format!("build failed: {err}"), ""),
    };

    let run_spec = RunSpec {
        image_name: image_name.to_string(),
        container_name: container_name.to_string(),
        report_mount_path: report_mount_path.clone(),
        stage_env_value: task.stage.to_string(),
        timeout: ctx.running_timeout,
    };
    let run_outcome = match ctx.driver.run_and_wait(&run_spec).await {
        Ok(outcome) => outcome,
        Err(err) => return Outcome::terminal(TestingStatus::Error, format!("container run failed: {err}"), build_log),
    };

    if run_outcome.timed_out {
        return Outcome::terminal(TestingStatus::RunningTimeout, "", run_outcome.logs);
    }

    let report = match judge_container::read_report(report_mount_path) {
        Ok(report) => report,
        Err(err) => return Outcome::terminal(TestingStatus::Error, format!("failed to read report: {err}"), run_outcome.logs),
    };

    if !report.pass {
        return Outcome::terminal(TestingStatus::Failed, report.message, run_outcome.logs);
    }

    Outcome {
        status: TestingStatus::Success,
        message: report.message,
        log: run_outcome.logs,
        advance_to_stage: Some(task.stage + 1),
    }
}

async fn finish(
    ctx: &RunnerContext,
    task: &TestingTask,
    status: TestingStatus,
    message: impl AsRef<str>,
    log: impl AsRef<str>,
    run_end_time: &str,
) {
    if let Err(err) = judge_storage::testing::finish(
        &ctx.pool,
        &task.repository_id,
        task.serial,
        status,
        message.as_ref(),
        log.as_ref(),
        run_end_time,
    )
    .await
    {
        tracing::error!(%err, repository_id = %task.repository_id, serial = task.serial, "failed to persist terminal testing status");
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
