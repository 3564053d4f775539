//! Scoped timing through the full pipeline

use ember_logger::{Context, Logger, LoggerConfig, TimedOperation};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn test_logger(dir: &Path) -> Arc<Logger> {
    let config = LoggerConfig::builder()
        .log_dir(dir)
        .base_name("svc")
        .console_enabled(false)
        .build();
    Arc::new(Logger::new("svc", config).unwrap())
}

fn read_lines(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("svc.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_stop_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let logger = test_logger(dir.path());

    let mut op = TimedOperation::start(Arc::clone(&logger), "chunk-load");
    std::thread::sleep(Duration::from_millis(20));

    let first = op.stop();
    assert!(first >= Duration::from_millis(20));

    // A second stop reports nothing and costs nothing
    assert_eq!(op.stop(), Duration::ZERO);
    drop(op);
    logger.shutdown();

    let lines = read_lines(dir.path());
    let starts = lines.iter().filter(|l| l.contains("Starting timed operation: chunk-load")).count();
    let stops = lines.iter().filter(|l| l.contains("finished in")).count();
    assert_eq!(starts, 1);
    assert_eq!(stops, 1);
}

#[test]
fn test_drop_reports_exactly_once() {
    let dir = TempDir::new().unwrap();
    let logger = test_logger(dir.path());

    {
        let _op = TimedOperation::start(Arc::clone(&logger), "save-world");
        // Leaves scope without an explicit stop
    }
    logger.shutdown();

    let lines = read_lines(dir.path());
    let stops = lines.iter().filter(|l| l.contains("Operation save-world finished in")).count();
    assert_eq!(stops, 1);
}

#[test]
fn test_context_carries_through_both_records() {
    let dir = TempDir::new().unwrap();
    let logger = test_logger(dir.path());

    let ctx = Context::builder().correlation_id("batch-9").build();
    let mut op = TimedOperation::start_with_context(Arc::clone(&logger), "sync", ctx);
    op.stop();
    logger.shutdown();

    let lines = read_lines(dir.path());
    let correlated = lines.iter().filter(|l| l.contains("[corr=batch-9]")).count();
    assert_eq!(correlated, 2);
}
