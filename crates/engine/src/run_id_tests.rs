use super::*;

#[test]
fn run_id_is_lowercased_and_dash_joined() {
    let run_id = build_run_id("Repo1", "GitHub", "Alice", 3, 0, 1_700_000_000_000);
    assert_eq!(run_id, "repo1-github-alice-3-0-1700000000000");
}

#[test]
fn image_and_container_names_are_prefixed() {
    let run_id = "repo1-github-alice-3-0-1700000000000";
    assert_eq!(image_name(run_id), "image-repo1-github-alice-3-0-1700000000000");
    assert_eq!(container_name(run_id), "container-repo1-github-alice-3-0-1700000000000");
}

#[test]
fn differing_timestamps_make_run_ids_unique_across_retries() {
    let a = build_run_id("repo1", "github", "alice", 3, 0, 1_700_000_000_000);
    let b = build_run_id("repo1", "github", "alice", 3, 0, 1_700_000_000_001);
    assert_ne!(a, b);
}
