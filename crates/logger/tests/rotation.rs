//! Rotation behavior through the full pipeline

use ember_logger::{Logger, LoggerConfig};
use std::path::Path;
use tempfile::TempDir;

fn config(dir: &Path, max_bytes: u64, max_backups: usize) -> LoggerConfig {
    LoggerConfig::builder()
        .log_dir(dir)
        .base_name("svc")
        .console_enabled(false)
        .max_bytes_per_file(max_bytes)
        .max_backup_files(max_backups)
        .build()
}

fn read_file(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name)).unwrap_or_default()
}

#[test]
fn test_crossing_the_size_threshold_rotates_once() {
    let dir = TempDir::new().unwrap();
    let logger = Logger::new("svc", config(dir.path(), 180, 5)).unwrap();

    // Three lines stay under the threshold, the fourth crosses it
    for i in 0..4 {
        logger.info("net", &format!("payload-{i}"));
    }
    logger.shutdown();

    assert!(dir.path().join("svc.1.log").exists());
    assert!(!dir.path().join("svc.2.log").exists());

    let backup = read_file(dir.path(), "svc.1.log");
    assert!(backup.contains("payload-0"));
    assert!(backup.contains("payload-3"));
    assert_eq!(read_file(dir.path(), "svc.log"), "");
}

#[test]
fn test_backup_chain_evicts_oldest_content() {
    let dir = TempDir::new().unwrap();
    // Every line exceeds the threshold, so each write rotates
    let logger = Logger::new("svc", config(dir.path(), 1, 2)).unwrap();

    logger.info("net", "first");
    logger.info("net", "second");
    logger.info("net", "third");
    logger.shutdown();

    // Three rotations with two backups: the oldest content is gone
    assert!(read_file(dir.path(), "svc.1.log").contains("third"));
    assert!(read_file(dir.path(), "svc.2.log").contains("second"));
    assert!(!dir.path().join("svc.3.log").exists());

    let everything = format!(
        "{}{}{}",
        read_file(dir.path(), "svc.log"),
        read_file(dir.path(), "svc.1.log"),
        read_file(dir.path(), "svc.2.log"),
    );
    assert!(!everything.contains("first"));
}

#[test]
fn test_resumes_byte_count_from_existing_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("svc.log"), "x".repeat(190) + "\n").unwrap();

    let logger = Logger::new("svc", config(dir.path(), 200, 5)).unwrap();
    // The pre-existing 191 bytes count toward the threshold
    logger.info("net", "tip-over");
    logger.shutdown();

    assert!(dir.path().join("svc.1.log").exists());
    assert!(read_file(dir.path(), "svc.1.log").contains("tip-over"));
}
