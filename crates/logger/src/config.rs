//! Configuration for the logging pipeline

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default size threshold that triggers rotation (5 MiB)
pub const DEFAULT_MAX_BYTES_PER_FILE: u64 = 5 * 1024 * 1024;

/// Default number of rotated backup files to retain
pub const DEFAULT_MAX_BACKUP_FILES: usize = 5;

/// Default capacity of the pending-write queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;

/// Clock used when rendering timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timezone {
    /// Coordinated universal time
    Utc,

    /// The host system's local time
    Local,
}

/// Immutable configuration snapshot for the logging pipeline
///
/// Built once at startup and shared with the pipeline for its entire life;
/// there is no hot reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Directory log files are written to
    pub log_dir: PathBuf,

    /// Base file name; the active file is `<base_name>.log`
    pub base_name: String,

    /// Size threshold that triggers rotation
    pub max_bytes_per_file: u64,

    /// Number of rotated backup files to retain
    pub max_backup_files: usize,

    /// Emit structured lines instead of plain text
    pub json_format: bool,

    /// Echo accepted records to stdout
    pub console_enabled: bool,

    /// Colorize console output by level
    pub use_colors: bool,

    /// strftime-style pattern for timestamps
    pub timestamp_format: String,

    /// Clock used when rendering timestamps
    pub timezone: Timezone,

    /// Capacity of the pending-write queue
    pub queue_capacity: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            base_name: "app".to_string(),
            max_bytes_per_file: DEFAULT_MAX_BYTES_PER_FILE,
            max_backup_files: DEFAULT_MAX_BACKUP_FILES,
            json_format: false,
            console_enabled: true,
            use_colors: true,
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            timezone: Timezone::Local,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl LoggerConfig {
    /// Start building a configuration from the defaults
    pub fn builder() -> LoggerConfigBuilder {
        LoggerConfigBuilder::new()
    }
}

/// Builder for [`LoggerConfig`]
pub struct LoggerConfigBuilder {
    config: LoggerConfig,
}

impl LoggerConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
        }
    }

    /// Set the log directory
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.log_dir = dir.into();
        self
    }

    /// Set the base file name
    pub fn base_name(mut self, name: impl Into<String>) -> Self {
        self.config.base_name = name.into();
        self
    }

    /// Set the rotation size threshold
    pub fn max_bytes_per_file(mut self, bytes: u64) -> Self {
        self.config.max_bytes_per_file = bytes;
        self
    }

    /// Set the number of rotated backups to retain
    pub fn max_backup_files(mut self, count: usize) -> Self {
        self.config.max_backup_files = count;
        self
    }

    /// Emit structured lines instead of plain text
    pub fn json_format(mut self, enabled: bool) -> Self {
        self.config.json_format = enabled;
        self
    }

    /// Echo accepted records to stdout
    pub fn console_enabled(mut self, enabled: bool) -> Self {
        self.config.console_enabled = enabled;
        self
    }

    /// Colorize console output by level
    pub fn use_colors(mut self, enabled: bool) -> Self {
        self.config.use_colors = enabled;
        self
    }

    /// Set the timestamp pattern
    pub fn timestamp_format(mut self, pattern: impl Into<String>) -> Self {
        self.config.timestamp_format = pattern.into();
        self
    }

    /// Set the clock used when rendering timestamps
    pub fn timezone(mut self, timezone: Timezone) -> Self {
        self.config.timezone = timezone;
        self
    }

    /// Set the capacity of the pending-write queue
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    /// Build the configuration
    pub fn build(self) -> LoggerConfig {
        self.config
    }
}

impl Default for LoggerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
