use super::*;
use crate::config::LoggerConfig;

fn logger_config(file: std::path::PathBuf, max_size_mb: u64, max_backups: u32, compress: bool) -> LoggerConfig {
    LoggerConfig { file, max_size_mb, max_backups, compress, level: "info".to_string() }
}

#[test]
fn rotate_is_a_no_op_when_the_log_is_under_the_size_threshold() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let log_path = dir.path().join("judged.log");
    std::fs::write(&log_path, b"small").expect("write log");

    let logger = logger_config(log_path.clone(), 10, 3, false);
    rotate_log_if_needed(&logger).expect("rotate");

    assert!(log_path.exists());
    assert!(!dir.path().join("judged.log.1").exists());
}

#[test]
fn rotate_shifts_the_oversized_log_to_backup_one() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let log_path = dir.path().join("judged.log");
    let oversized = vec![b'x'; 2 * 1024 * 1024];
    std::fs::write(&log_path, &oversized).expect("write log");

    let logger = logger_config(log_path.clone(), 1, 3, false);
    rotate_log_if_needed(&logger).expect("rotate");

    assert!(!log_path.exists());
    assert!(dir.path().join("judged.log.1").exists());
}

#[test]
fn rotate_compresses_the_backup_when_compress_is_set() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let log_path = dir.path().join("judged.log");
    let oversized = vec![b'y'; 2 * 1024 * 1024];
    std::fs::write(&log_path, &oversized).expect("write log");

    let logger = logger_config(log_path.clone(), 1, 3, true);
    rotate_log_if_needed(&logger).expect("rotate");

    assert!(!log_path.exists());
    assert!(dir.path().join("judged.log.1.gz").exists());
    assert!(!dir.path().join("judged.log.1").exists());
}

#[test]
fn missing_log_file_is_not_an_error() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let log_path = dir.path().join("does-not-exist.log");

    let logger = logger_config(log_path, 1, 3, false);
    rotate_log_if_needed(&logger).expect("rotate is a no-op for a missing log");
}
