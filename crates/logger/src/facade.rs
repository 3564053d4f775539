//! Process-wide convenience layer over an installed [`Logger`]
//!
//! Hosts that want explicit ownership construct a [`Logger`] themselves and
//! pass it around. Everything else goes through this module: [`init`]
//! installs the one pipeline for the process, the leveled free functions
//! and the crate macros delegate to it, and [`shutdown`] tears it down so
//! a later `init` can succeed.

use crate::config::LoggerConfig;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::level::Level;
use crate::manager::Logger;
use crate::record::Record;
use crate::timed::TimedOperation;
use parking_lot::RwLock;
use std::error::Error as StdError;
use std::sync::Arc;

static GLOBAL: RwLock<Option<Arc<Logger>>> = RwLock::new(None);

/// Construct a pipeline and install it as the process-wide logger
///
/// Fails with [`Error::AlreadyInitialized`] if a pipeline is already
/// installed; call [`shutdown`] first to replace it.
pub fn init(name: impl Into<String>, config: LoggerConfig) -> Result<()> {
    let mut slot = GLOBAL.write();
    if slot.is_some() {
        return Err(Error::AlreadyInitialized);
    }
    *slot = Some(Arc::new(Logger::new(name, config)?));
    Ok(())
}

/// Shut the installed pipeline down and clear the slot
///
/// Idempotent; safe to call without a prior [`init`]. Drains everything
/// accepted so far before returning.
pub fn shutdown() {
    let logger = GLOBAL.write().take();
    if let Some(logger) = logger {
        logger.shutdown();
    }
}

/// The installed pipeline, if any
pub fn logger() -> Option<Arc<Logger>> {
    GLOBAL.read().clone()
}

/// The installed pipeline, or [`Error::NotInitialized`]
///
/// For hosts that want to propagate the lifecycle misuse instead of
/// relying on the debug-build precondition checks.
pub fn try_logger() -> Result<Arc<Logger>> {
    GLOBAL.read().clone().ok_or(Error::NotInitialized)
}

/// True if the installed pipeline would accept a record
///
/// False when no pipeline is installed, so macro callers skip message
/// construction entirely.
pub fn enabled(level: Level, category: &str) -> bool {
    GLOBAL
        .read()
        .as_ref()
        .is_some_and(|logger| logger.should_log(level, category))
}

/// Route a record to the installed pipeline
///
/// Logging without an installed pipeline is a programming error: debug
/// builds fail a precondition check, release builds drop the record.
pub fn log(record: Record<'_>) {
    let logger = GLOBAL.read().clone();
    match logger {
        Some(logger) => logger.log(record),
        None => debug_assert!(false, "logging before init or after shutdown"),
    }
}

/// Log a Trace record
pub fn trace(category: &str, message: &str) {
    log(Record::new(Level::Trace, message).in_category(category));
}

/// Log a Debug record
pub fn debug(category: &str, message: &str) {
    log(Record::new(Level::Debug, message).in_category(category));
}

/// Log an Info record
pub fn info(category: &str, message: &str) {
    log(Record::new(Level::Info, message).in_category(category));
}

/// Log a Warn record
pub fn warn(category: &str, message: &str) {
    log(Record::new(Level::Warn, message).in_category(category));
}

/// Log an Error record
pub fn error(category: &str, message: &str) {
    log(Record::new(Level::Error, message).in_category(category));
}

/// Log a Fatal record
pub fn fatal(category: &str, message: &str) {
    log(Record::new(Level::Fatal, message).in_category(category));
}

/// Log an Error record carrying a caught error
pub fn error_cause(category: &str, message: &str, error: &(dyn StdError + 'static)) {
    log(Record::new(Level::Error, message)
        .in_category(category)
        .with_error(error));
}

/// Log a record with an explicit context
pub fn log_with(level: Level, category: &str, message: &str, context: &Context) {
    log(Record::new(level, message)
        .in_category(category)
        .with_context(context));
}

/// Start a timed operation on the installed pipeline
///
/// Returns `None` (after the same precondition check as [`log`]) when no
/// pipeline is installed.
pub fn start_timed(name: impl Into<String>) -> Option<TimedOperation> {
    match logger() {
        Some(logger) => Some(TimedOperation::start(logger, name)),
        None => {
            debug_assert!(false, "timing before init or after shutdown");
            None
        }
    }
}

/// Set the global severity threshold on the installed pipeline
pub fn set_global_level(level: Level) {
    if let Some(logger) = logger() {
        logger.set_global_level(level);
    }
}

/// Override the severity threshold for one category
pub fn set_category_level(category: impl Into<String>, level: Level) {
    if let Some(logger) = logger() {
        logger.set_category_level(category, level);
    }
}

/// Increment a named counter on the installed pipeline
pub fn increment_counter(name: &str) {
    if let Some(logger) = logger() {
        logger.increment_counter(name);
    }
}
