//! Asynchronous, rotating, leveled logging
//!
//! This crate provides an in-process logging pipeline that supports:
//! - Non-blocking producers backed by a bounded queue with an evict-oldest
//!   overflow policy
//! - A dedicated background writer with size-based file rotation
//! - Per-category severity thresholds and cheap named counters
//! - Plain text or structured line formats, with optional colored console
//!   echo
//! - Scoped operation timing with exactly-once completion reporting
//!
//! The pipeline is an explicit handle: the host constructs a [`Logger`],
//! passes it to producers, and shuts it down when done. The [`facade`]
//! module layers the process-wide singleton contract (and the leveled
//! macros) on top for callers that prefer it.

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod config;
mod context;
mod error;
mod format;
mod level;
mod macros;
mod manager;
mod record;
mod timed;
mod writer;

pub mod facade;

#[cfg(feature = "log-compat")]
pub mod compat;

pub use config::{
    DEFAULT_MAX_BACKUP_FILES, DEFAULT_MAX_BYTES_PER_FILE, DEFAULT_QUEUE_CAPACITY, LoggerConfig,
    LoggerConfigBuilder, Timezone,
};
pub use context::{Context, ContextBuilder};
pub use error::{Error, Result};
pub use format::{JsonFormatter, LogFormatter, PlainTextFormatter};
pub use level::Level;
pub use manager::Logger;
pub use record::{DEFAULT_CATEGORY, Record};
pub use timed::TimedOperation;
