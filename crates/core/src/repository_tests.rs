use super::*;

fn sample() -> Repository {
    Repository {
        repository_id: "repo-1".to_string(),
        subject: "alice".to_string(),
        provider: "github".to_string(),
        challenge_folder_name: "reverse-list".to_string(),
        startpoint: "rust".to_string(),
        stage: 0,
        total_stages: 3,
        create_time: "2024-01-01T00:00:00Z".to_string(),
        update_time: "2024-01-01T00:00:00Z".to_string(),
    }
}

#[test]
fn owner_matches_same_identity() {
    let repo = sample();
    assert!(repo.owner_matches("github", "alice"));
}

#[test]
fn owner_matches_rejects_different_subject_or_provider() {
    let repo = sample();
    assert!(!repo.owner_matches("github", "bob"));
    assert!(!repo.owner_matches("gitlab", "alice"));
}
