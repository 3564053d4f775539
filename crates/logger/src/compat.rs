//! Bridge from the `log` crate into the pipeline
//!
//! Lets records emitted through the `log` crate's macros (by dependencies
//! that know nothing about this crate) flow into an installed [`Logger`],
//! with the record target as the category.

use crate::{Level, Logger, Record};
use log::{Log, Metadata, Record as LogRecord};
use std::sync::Arc;

/// Wrapper implementing the log crate's `Log` trait
pub struct LogBridge {
    logger: Arc<Logger>,
}

impl LogBridge {
    /// Create a new log bridge
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.logger
            .should_log(map_level(metadata.level()), metadata.target())
    }

    fn log(&self, record: &LogRecord) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = map_level(record.level());
        let message = record.args().to_string();
        let category = record.target().to_string();

        self.logger
            .log(Record::new(level, message).in_category(category));
    }

    fn flush(&self) {}
}

/// Map log crate levels to pipeline levels
fn map_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug => Level::Debug,
        log::Level::Trace => Level::Trace,
    }
}

/// Install a bridge as the log crate's global logger
///
/// Captures all records from crates using the `log` macros. The bridge is
/// leaked because `log::set_logger` requires `'static`.
pub fn init_log_bridge(logger: Arc<Logger>) -> Result<(), log::SetLoggerError> {
    let bridge = Box::leak(Box::new(LogBridge::new(logger)));
    log::set_logger(bridge)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
