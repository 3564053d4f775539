//! Log severity levels

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use termcolor::Color;

/// Log severity, ordered from most verbose to most severe
///
/// Threshold filtering compares levels purely by priority, so the derived
/// `Ord` is the single source of truth for what gets accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Fine-grained tracing
    Trace,

    /// Diagnostic detail
    Debug,

    /// Normal operational messages
    Info,

    /// Unexpected but recoverable conditions
    Warn,

    /// A failed operation
    Error,

    /// The subsystem cannot continue
    Fatal,
}

impl Level {
    /// Numeric priority used for threshold comparison
    #[inline]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Trace => 0,
            Self::Debug => 1,
            Self::Info => 2,
            Self::Warn => 3,
            Self::Error => 4,
            Self::Fatal => 5,
        }
    }

    /// Console color used when echoing records at this level
    pub const fn color(self) -> Color {
        match self {
            Self::Trace => Color::White,
            Self::Debug => Color::Cyan,
            Self::Info => Color::Green,
            Self::Warn => Color::Yellow,
            Self::Error => Color::Red,
            Self::Fatal => Color::Magenta,
        }
    }

    /// Upper-case name as it appears in formatted lines
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Self::Trace),
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            "FATAL" => Ok(Self::Fatal),
            other => Err(Error::Configuration(format!("unknown log level: {other}"))),
        }
    }
}
