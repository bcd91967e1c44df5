use super::*;
use judge_core::test_support::sample_repository;

async fn pool_with_repo(repository_id: &str) -> sqlx::SqlitePool {
    let pool = crate::pool::open_in_memory().await.expect("open in-memory db");
    crate::repository::insert(&pool, &sample_repository(repository_id, 0)).await.expect("insert repo");
    pool
}

#[tokio::test]
async fn insert_pending_then_get_round_trips() {
    let pool = pool_with_repo("repo-1").await;
    let testing = Testing::new_pending("repo-1".to_string(), 1, 0, "2024-01-01T00:00:00Z".to_string());
    insert_pending(&pool, &testing).await.expect("insert");
    let loaded = get(&pool, "repo-1", 1).await.expect("get");
    assert_eq!(loaded, testing);
}

#[tokio::test]
async fn mark_running_then_finish_writes_terminal_fields_once() {
    let pool = pool_with_repo("repo-1").await;
    let testing = Testing::new_pending("repo-1".to_string(), 1, 0, "2024-01-01T00:00:00Z".to_string());
    insert_pending(&pool, &testing).await.expect("insert");

    mark_running(&pool, "repo-1", 1, "2024-01-01T00:00:01Z").await.expect("mark running");
    let loaded = get(&pool, "repo-1", 1).await.expect("get");
    assert_eq!(loaded.status, TestingStatus::Running);
    assert_eq!(loaded.run_start_time, "2024-01-01T00:00:01Z");

    finish(&pool, "repo-1", 1, TestingStatus::Success, "all stages passed", "build log", "2024-01-01T00:00:05Z")
        .await
        .expect("finish");
    let loaded = get(&pool, "repo-1", 1).await.expect("get");
    assert_eq!(loaded.status, TestingStatus::Success);
    assert_eq!(loaded.message, "all stages passed");
    assert_eq!(loaded.log, "build log");
    assert_eq!(loaded.run_end_time, "2024-01-01T00:00:05Z");
}

#[tokio::test]
async fn get_missing_testing_is_not_found() {
    let pool = pool_with_repo("repo-1").await;
    let err = get(&pool, "repo-1", 99).await.unwrap_err();
    assert!(matches!(err, StorageError::TestingNotFound { repository_id, serial } if repository_id == "repo-1" && serial == 99));
}

#[tokio::test]
async fn list_recent_returns_newest_first_and_respects_the_limit() {
    let pool = pool_with_repo("repo-1").await;
    for serial in 1..=3 {
        let testing = Testing::new_pending("repo-1".to_string(), serial, 0, format!("2024-01-0{serial}T00:00:00Z"));
        insert_pending(&pool, &testing).await.expect("insert");
    }

    let recent = list_recent(&pool, "repo-1", 2).await.expect("list recent");
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].serial, 3);
    assert_eq!(recent[1].serial, 2);
}

#[tokio::test]
async fn list_recent_for_unknown_repository_is_empty() {
    let pool = pool_with_repo("repo-1").await;
    let recent = list_recent(&pool, "does-not-exist", 10).await.expect("list recent");
    assert!(recent.is_empty());
}
