use super::*;
use judge_core::test_support::sample_repository;

async fn pool_with_repo(repository_id: &str) -> sqlx::SqlitePool {
    let pool = crate::pool::open_in_memory().await.expect("open in-memory db");
    crate::repository::insert(&pool, &sample_repository(repository_id, 0)).await.expect("insert repo");
    pool
}

#[tokio::test]
async fn first_allocation_starts_at_one() {
    let pool = pool_with_repo("repo-1").await;
    let serial = allocate_next_serial(&pool, "repo-1").await.expect("allocate");
    assert_eq!(serial, 1);
}

#[tokio::test]
async fn allocations_are_sequential_and_dense() {
    let pool = pool_with_repo("repo-1").await;
    let mut serials = Vec::new();
    for _ in 0..5 {
        serials.push(allocate_next_serial(&pool, "repo-1").await.expect("allocate"));
    }
    assert_eq!(serials, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn separate_repositories_have_independent_counters() {
    let pool = crate::pool::open_in_memory().await.expect("open in-memory db");
    crate::repository::insert(&pool, &sample_repository("repo-a", 0)).await.expect("insert a");
    crate::repository::insert(&pool, &sample_repository("repo-b", 0)).await.expect("insert b");

    assert_eq!(allocate_next_serial(&pool, "repo-a").await.expect("allocate"), 1);
    assert_eq!(allocate_next_serial(&pool, "repo-b").await.expect("allocate"), 1);
    assert_eq!(allocate_next_serial(&pool, "repo-a").await.expect("allocate"), 2);
}

#[tokio::test]
async fn concurrent_allocations_are_unique() {
    let pool = pool_with_repo("repo-1").await;
    let mut handles = Vec::new();
    for _ in 0..10 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move { allocate_next_serial(&pool, "repo-1").await.expect("allocate") }));
    }
    let mut serials: Vec<i64> = Vec::new();
    for handle in handles {
        serials.push(handle.await.expect("join"));
    }
    serials.sort_unstable();
    assert_eq!(serials, (1..=10).collect::<Vec<_>>());
}
