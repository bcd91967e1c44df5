use super::*;
use judge_container::{DriverCall, FakeDriver};
use judge_core::test_support::sample_repository;
use judge_core::FakeClock;
use std::time::Duration;
use tempfile::TempDir;

const ATTRIBUTE_TOML: &str = r#"
[basic]
title = "Queue Test Challenge"

[[startpoints]]
name = "default"
root = "starter"
dockerfile = "starter/Dockerfile"

[[stages]]
name = "stage-0"
"#;

struct Harness {
    pool: sqlx::SqlitePool,
    _challenge_root: TempDir,
    _tmp_storage_root: TempDir,
    intake_ctx: IntakeContext,
    engine: Arc<JudgeEngine>,
    driver: Arc<FakeDriver>,
}

async fn build_harness(pending_queue_size: usize, max_concurrent_workers: usize) -> (Harness, mpsc::Receiver<judge_core::TestingTask>) {
    let pool = judge_storage::pool::open_in_memory().await.expect("open pool");
    let challenge_root = TempDir::new().expect("challenge root");
    let challenge_dir = challenge_root.path().join("queue-challenge");
    std::fs::create_dir_all(&challenge_dir).expect("create challenge dir");
    std::fs::write(challenge_dir.join("attribute.toml"), ATTRIBUTE_TOML).expect("write attribute.toml");

    let (engine, receiver) = JudgeEngine::new(pending_queue_size, max_concurrent_workers);
    let clock: Arc<dyn judge_core::Clock> = Arc::new(FakeClock::default());
    let intake_ctx = IntakeContext {
        pool: pool.clone(),
        engine: engine.clone(),
        clock,
        challenge_storage_folder: challenge_root.path().to_path_buf(),
    };
    let driver = Arc::new(FakeDriver::new());

    let harness = Harness {
        pool,
        _challenge_root: challenge_root,
        _tmp_storage_root: TempDir::new().expect("tmp storage root"),
        intake_ctx,
        engine,
        driver,
    };
    (harness, receiver)
}

fn runner_ctx(harness: &Harness) -> Arc<RunnerContext> {
    Arc::new(RunnerContext {
        pool: harness.pool.clone(),
        driver: harness.driver.clone(),
        clock: Arc::new(FakeClock::default()),
        repository_storage_root: harness._tmp_storage_root.path().join("repos"),
        tmp_storage_root: harness._tmp_storage_root.path().join("tmp"),
        pending_queue_timeout: Duration::from_secs(60),
        running_timeout: Duration::from_secs(60),
    })
}

async fn submit_repo(harness: &Harness, repository_id: &str) {
    let repo = sample_repository(repository_id, 0);
    let mut repo = repo;
    repo.challenge_folder_name = "queue-challenge".to_string();
    judge_storage::repository::insert(&harness.pool, &repo).await.expect("insert repo");
    submit(&harness.intake_ctx, repository_id, "github", "alice", None).await.expect("submit");
}

#[tokio::test]
async fn submitted_task_runs_to_a_terminal_status() {
    let (harness, receiver) = build_harness(4, 2).await;
    submit_repo(&harness, "repo-a").await;

    let ctx = runner_ctx(&harness);
    harness.engine.start(receiver, ctx).await;
    harness.engine.shutdown().await;

    let testing = judge_storage::testing::get(&harness.pool, "repo-a", 1).await.expect("get testing");
    assert!(testing.status.is_terminal());
}

#[tokio::test]
async fn shutdown_drains_every_buffered_task_to_a_terminal_status() {
    let (harness, receiver) = build_harness(8, 2).await;
    for id in ["repo-a", "repo-b", "repo-c"] {
        submit_repo(&harness, id).await;
    }

    let ctx = runner_ctx(&harness);
    harness.engine.start(receiver, ctx).await;
    harness.engine.shutdown().await;

    for id in ["repo-a", "repo-b", "repo-c"] {
        let testing = judge_storage::testing::get(&harness.pool, id, 1).await.expect("get testing");
        assert!(testing.status.is_terminal(), "{id} did not reach a terminal status");
    }
}

#[tokio::test]
async fn single_worker_never_interleaves_two_tasks() {
    let (harness, receiver) = build_harness(8, 1).await;
    for id in ["repo-a", "repo-b"] {
        submit_repo(&harness, id).await;
    }

    let ctx = runner_ctx(&harness);
    harness.engine.start(receiver, ctx).await;
    harness.engine.shutdown().await;

    let calls = harness.driver.calls();
    // With exactly one permit outstanding at a time, every call belonging to
    // one job's Build/RunAndWait/Cleanup triple must appear contiguously
    // before the next job's triple starts. Collapse consecutive repeats of
    // the same image name; if a name reappears non-consecutively, the jobs
    // were interleaved.
    let mut transitions: Vec<String> = Vec::new();
    for call in &calls {
        let image_name = match call {
            DriverCall::Build { image_name } => image_name.clone(),
            DriverCall::RunAndWait { image_name, .. } => image_name.clone(),
            DriverCall::Cleanup { image_name, .. } => image_name.clone(),
        };
        if transitions.last() != Some(&image_name) {
            transitions.push(image_name);
        }
    }
    let mut deduped = transitions.clone();
    deduped.dedup();
    assert_eq!(transitions, deduped, "a job's calls were split across another job's calls");
    assert_eq!(transitions.len(), 2);
}

#[tokio::test]
async fn start_is_idempotent_and_only_spawns_one_dispatcher() {
    let (harness, receiver) = build_harness(4, 2).await;
    submit_repo(&harness, "repo-a").await;

    let ctx = runner_ctx(&harness);
    harness.engine.start(receiver, ctx.clone()).await;
    // A dummy receiver is never used by the second `start` call, since the
    // dispatcher is already running; this just proves the second call
    // returns without panicking on a previously-consumed channel.
    let (_unused_engine, unused_receiver) = JudgeEngine::new(1, 1);
    harness.engine.start(unused_receiver, ctx).await;

    harness.engine.shutdown().await;
    let testing = judge_storage::testing::get(&harness.pool, "repo-a", 1).await.expect("get testing");
    assert!(testing.status.is_terminal());
}
