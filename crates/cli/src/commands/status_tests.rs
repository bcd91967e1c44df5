use super::*;
use judge_core::test_support::sample_repository;

#[tokio::test]
async fn run_reports_missing_database_file() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let db = dir.path().join("does-not-exist").join("judged.db");
    let args = StatusArgs { db, repo: "repo-1".to_string(), limit: 10 };
    assert!(run(args).await.is_err());
}

#[tokio::test]
async fn run_reports_unknown_repository() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let db = dir.path().join("judged.db");
    let pool = judge_storage::pool::open(&db).await.expect("open db");
    drop(pool);

    let args = StatusArgs { db, repo: "does-not-exist".to_string(), limit: 10 };
    let err = run(args).await.unwrap_err();
    assert!(matches!(err, CliError::Storage(judge_storage::StorageError::RepositoryNotFound(id)) if id == "does-not-exist"));
}

#[tokio::test]
async fn run_succeeds_for_a_repository_with_no_attempts_yet() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let db = dir.path().join("judged.db");
    let pool = judge_storage::pool::open(&db).await.expect("open db");
    judge_storage::repository::insert(&pool, &sample_repository("repo-1", 0)).await.expect("insert repo");
    drop(pool);

    let args = StatusArgs { db, repo: "repo-1".to_string(), limit: 10 };
    run(args).await.expect("status");
}
