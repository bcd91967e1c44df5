use super::*;

#[test]
fn status_round_trips_through_its_wire_string() {
    for status in [
        TestingStatus::Pending,
        TestingStatus::Running,
        TestingStatus::Success,
        TestingStatus::Failed,
        TestingStatus::Error,
        TestingStatus::WaitingTimeout,
        TestingStatus::RunningTimeout,
    ] {
        let s = status.as_str();
        let parsed: TestingStatus = s.parse().expect("parse status");
        assert_eq!(parsed, status);
    }
}

#[test]
fn unknown_status_string_is_rejected() {
    let err = "bogus".parse::<TestingStatus>().unwrap_err();
    assert_eq!(err.0, "bogus");
}

#[test]
fn terminal_classification_matches_the_state_machine() {
    assert!(!TestingStatus::Pending.is_terminal());
    assert!(!TestingStatus::Running.is_terminal());
    for status in [
        TestingStatus::Success,
        TestingStatus::Failed,
        TestingStatus::Error,
        TestingStatus::WaitingTimeout,
        TestingStatus::RunningTimeout,
    ] {
        assert!(status.is_terminal());
    }
}

#[test]
fn new_pending_testing_has_empty_terminal_fields() {
    let testing = Testing::new_pending("repo-1".to_string(), 1, 0, "2024-01-01T00:00:00Z".to_string());
    assert_eq!(testing.status, TestingStatus::Pending);
    assert!(testing.message.is_empty());
    assert!(testing.run_start_time.is_empty());
    assert!(testing.run_end_time.is_empty());
}
