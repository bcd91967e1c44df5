use super::*;
use std::fs;

fn write_report(dir: &Path, message: &str, result: &str) {
    fs::write(dir.join(MESSAGE_FILE), message).expect("write message");
    fs::write(dir.join(RESULT_FILE), result).expect("write result");
}

#[test]
fn lowercase_t_prefix_is_pass() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_report(dir.path(), "nice", "true\n");
    let report = read_report(dir.path()).expect("read report");
    assert!(report.pass);
    assert_eq!(report.message, "nice");
}

#[test]
fn uppercase_f_prefix_is_fail() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_report(dir.path(), "nope", "False");
    let report = read_report(dir.path()).expect("read report");
    assert!(!report.pass);
}

#[test]
fn malformed_result_falls_back_to_fail() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_report(dir.path(), "huh", "maybe");
    let report = read_report(dir.path()).expect("read report");
    assert!(!report.pass);
    assert_eq!(report.message, "huh");
}

#[test]
fn missing_message_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join(RESULT_FILE), "true").expect("write result");
    let err = read_report(dir.path()).unwrap_err();
    assert!(matches!(err, ReportError::MissingFile(_)));
}

#[test]
fn missing_result_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join(MESSAGE_FILE), "hi").expect("write message");
    let err = read_report(dir.path()).unwrap_err();
    assert!(matches!(err, ReportError::MissingFile(_)));
}
