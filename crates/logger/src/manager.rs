//! The logging pipeline: filtering, console echo, and the write queue

use crate::config::LoggerConfig;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::format::{JsonFormatter, LogFormatter, PlainTextFormatter};
use crate::level::Level;
use crate::record::Record;
use crate::writer::{self, AsyncLogWriter};
use chrono::format::{Item, StrftimeItems};
use crossbeam::channel::{self, Receiver, Sender};
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use std::error::Error as StdError;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor};

/// The logging pipeline handle
///
/// Owns the bounded write queue, the background writer thread, the
/// per-category severity thresholds, and the named counters. The host
/// constructs exactly one per process (the facade enforces this for
/// callers that go through it), passes it by reference to producers, and
/// tears it down with [`Logger::shutdown`] or by dropping it.
pub struct Logger {
    name: String,
    config: LoggerConfig,
    formatter: Box<dyn LogFormatter>,
    console: Mutex<StandardStream>,
    sender: Sender<String>,
    receiver: Receiver<String>,
    stop: Arc<AtomicBool>,
    writer_thread: Mutex<Option<JoinHandle<()>>>,
    global_level: RwLock<Level>,
    category_levels: DashMap<String, Level>,
    counters: DashMap<String, AtomicU64>,
}

impl Logger {
    /// Build the pipeline: validate the config, start the writer thread
    ///
    /// Fails on an invalid timestamp pattern or if the writer thread cannot
    /// be spawned. I/O trouble with the log directory or file does not fail
    /// construction; the pipeline degrades to console-only output and
    /// reports the fault on the fallback channel.
    pub fn new(name: impl Into<String>, config: LoggerConfig) -> Result<Self> {
        let name = name.into();
        validate_timestamp_format(&config.timestamp_format)?;

        let (sender, receiver) = channel::bounded(config.queue_capacity);
        let stop = Arc::new(AtomicBool::new(false));

        let writer = AsyncLogWriter::new(receiver.clone(), Arc::clone(&stop), config.clone());
        let handle = thread::Builder::new()
            .name("logger-writer".to_string())
            .spawn(move || writer.run())
            .map_err(Error::Io)?;

        let formatter: Box<dyn LogFormatter> = if config.json_format {
            Box::new(JsonFormatter::new(&config))
        } else {
            Box::new(PlainTextFormatter::new(&config))
        };
        let color_choice = if config.use_colors {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };

        tracing::debug!("logger initialized for '{name}'");
        Ok(Self {
            name,
            config,
            formatter,
            console: Mutex::new(StandardStream::stdout(color_choice)),
            sender,
            receiver,
            stop,
            writer_thread: Mutex::new(Some(handle)),
            global_level: RwLock::new(Level::Debug),
            category_levels: DashMap::new(),
            counters: DashMap::new(),
        })
    }

    /// The name this pipeline was initialized with
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configuration snapshot
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// True if a record at `level` in `category` would be accepted
    ///
    /// Runs on the caller's thread before any formatting, so a filtered-out
    /// record costs one map lookup.
    #[inline]
    pub fn should_log(&self, level: Level, category: &str) -> bool {
        let threshold = self
            .category_levels
            .get(category)
            .map(|entry| *entry.value())
            .unwrap_or_else(|| *self.global_level.read());
        level >= threshold
    }

    /// Accept a record: filter, format, echo, enqueue
    ///
    /// Never blocks the caller: the console echo is synchronous, the file
    /// write is queued for the background writer with an evict-oldest
    /// overflow policy.
    pub fn log(&self, record: Record<'_>) {
        if !self.should_log(record.level, &record.category) {
            return;
        }
        let line = self.formatter.format_line(&record);
        if self.config.console_enabled {
            self.echo(&record, &line);
        }
        self.enqueue(line);
    }

    fn echo(&self, record: &Record<'_>, line: &str) {
        let mut stdout = self.console.lock();
        if self.config.json_format || !self.config.use_colors {
            let _ = writeln!(stdout, "{line}");
        } else {
            let _ = stdout.set_color(ColorSpec::new().set_fg(Some(record.level.color())));
            let _ = write!(stdout, "{line}");
            let _ = stdout.reset();
            let _ = writeln!(stdout);
        }
        if let Some(err) = record.error {
            let mut source = err.source();
            while let Some(cause) = source {
                let _ = writeln!(stdout, "  caused by: {cause}");
                source = cause.source();
            }
        }
        let _ = stdout.flush();
    }

    fn enqueue(&self, line: String) {
        if self.stop.load(Ordering::Acquire) {
            // Accepted but dropped once shutdown has begun
            return;
        }
        writer::enqueue(&self.sender, &self.receiver, line);
    }

    // ---- leveled convenience ----

    /// Log a Trace record
    pub fn trace(&self, category: &str, message: &str) {
        self.log(Record::new(Level::Trace, message).in_category(category));
    }

    /// Log a Debug record
    pub fn debug(&self, category: &str, message: &str) {
        self.log(Record::new(Level::Debug, message).in_category(category));
    }

    /// Log an Info record
    pub fn info(&self, category: &str, message: &str) {
        self.log(Record::new(Level::Info, message).in_category(category));
    }

    /// Log a Warn record
    pub fn warn(&self, category: &str, message: &str) {
        self.log(Record::new(Level::Warn, message).in_category(category));
    }

    /// Log an Error record
    pub fn error(&self, category: &str, message: &str) {
        self.log(Record::new(Level::Error, message).in_category(category));
    }

    /// Log a Fatal record
    pub fn fatal(&self, category: &str, message: &str) {
        self.log(Record::new(Level::Fatal, message).in_category(category));
    }

    /// Log a Trace record with a context
    pub fn trace_with(&self, category: &str, message: &str, context: &Context) {
        self.log(
            Record::new(Level::Trace, message)
                .in_category(category)
                .with_context(context),
        );
    }

    /// Log a Debug record with a context
    pub fn debug_with(&self, category: &str, message: &str, context: &Context) {
        self.log(
            Record::new(Level::Debug, message)
                .in_category(category)
                .with_context(context),
        );
    }

    /// Log an Info record with a context
    pub fn info_with(&self, category: &str, message: &str, context: &Context) {
        self.log(
            Record::new(Level::Info, message)
                .in_category(category)
                .with_context(context),
        );
    }

    /// Log a Warn record with a context
    pub fn warn_with(&self, category: &str, message: &str, context: &Context) {
        self.log(
            Record::new(Level::Warn, message)
                .in_category(category)
                .with_context(context),
        );
    }

    /// Log an Error record with a context
    pub fn error_with(&self, category: &str, message: &str, context: &Context) {
        self.log(
            Record::new(Level::Error, message)
                .in_category(category)
                .with_context(context),
        );
    }

    /// Log a Fatal record with a context
    pub fn fatal_with(&self, category: &str, message: &str, context: &Context) {
        self.log(
            Record::new(Level::Fatal, message)
                .in_category(category)
                .with_context(context),
        );
    }

    /// Log an Error record carrying a caught error
    pub fn error_cause(&self, category: &str, message: &str, error: &(dyn StdError + 'static)) {
        self.log(
            Record::new(Level::Error, message)
                .in_category(category)
                .with_error(error),
        );
    }

    // ---- thresholds ----

    /// Set the global severity threshold
    ///
    /// Takes effect for subsequent calls only; already-accepted records are
    /// unaffected.
    pub fn set_global_level(&self, level: Level) {
        *self.global_level.write() = level;
    }

    /// The current global severity threshold
    pub fn global_level(&self) -> Level {
        *self.global_level.read()
    }

    /// Override the severity threshold for one category
    pub fn set_category_level(&self, category: impl Into<String>, level: Level) {
        self.category_levels.insert(category.into(), level);
    }

    // ---- counters ----

    /// Increment a named counter
    ///
    /// Counters are atomic and independent of the logging path: no
    /// formatting, no I/O, no threshold check.
    pub fn increment_counter(&self, name: &str) {
        self.counters
            .entry(name.to_string())
            .or_default()
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Read a named counter; zero if it was never incremented
    pub fn counter(&self, name: &str) -> u64 {
        self.counters
            .get(name)
            .map(|entry| entry.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    // ---- lifecycle ----

    /// Drain the queue, stop the writer, release the file
    ///
    /// Idempotent: the first call performs the shutdown, later calls (and
    /// `Drop`) are no-ops. Records accepted before this call are written
    /// out before it returns; records logged afterwards are dropped.
    pub fn shutdown(&self) {
        if self.stop.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(handle) = self.writer_thread.lock().take() {
            let _ = handle.join();
        }
        tracing::debug!("logger '{}' shut down", self.name);
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Reject patterns chrono would refuse at format time
fn validate_timestamp_format(pattern: &str) -> Result<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(Error::Configuration(format!(
            "invalid timestamp pattern: {pattern}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_logger(dir: &TempDir) -> Logger {
        let config = LoggerConfig::builder()
            .log_dir(dir.path())
            .base_name("svc")
            .console_enabled(false)
            .build();
        Logger::new("svc", config).unwrap()
    }

    #[test]
    fn test_should_log_uses_global_threshold() {
        let dir = TempDir::new().unwrap();
        let logger = test_logger(&dir);

        // Default global threshold is Debug
        assert!(!logger.should_log(Level::Trace, "net"));
        assert!(logger.should_log(Level::Debug, "net"));

        logger.set_global_level(Level::Warn);
        assert!(!logger.should_log(Level::Info, "net"));
        assert!(logger.should_log(Level::Warn, "net"));
    }

    #[test]
    fn test_category_override_beats_global() {
        let dir = TempDir::new().unwrap();
        let logger = test_logger(&dir);

        logger.set_global_level(Level::Error);
        logger.set_category_level("net", Level::Trace);

        assert!(logger.should_log(Level::Trace, "net"));
        assert!(!logger.should_log(Level::Warn, "render"));
    }

    #[test]
    fn test_counters() {
        let dir = TempDir::new().unwrap();
        let logger = test_logger(&dir);

        assert_eq!(logger.counter("packets"), 0);
        logger.increment_counter("packets");
        logger.increment_counter("packets");
        assert_eq!(logger.counter("packets"), 2);
        assert_eq!(logger.counter("other"), 0);
    }

    #[test]
    fn test_invalid_timestamp_pattern_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config = LoggerConfig::builder()
            .log_dir(dir.path())
            .timestamp_format("%Y %")
            .console_enabled(false)
            .build();

        assert!(matches!(
            Logger::new("svc", config),
            Err(Error::Configuration(_))
        ));
    }
}
