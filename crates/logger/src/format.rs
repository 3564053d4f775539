//! Line formatting for plain and structured output

use crate::config::{LoggerConfig, Timezone};
use crate::record::Record;
use chrono::{Local, Utc};
use std::fmt::Write;

/// Renders an accepted record into a single output line
///
/// The timestamp is computed at format time, on the caller's thread, so
/// lines carry the moment the record was accepted rather than the moment
/// the background writer drained them.
pub trait LogFormatter: Send + Sync {
    /// Render the record as one newline-free output line
    fn format_line(&self, record: &Record<'_>) -> String;
}

fn timestamp(pattern: &str, timezone: Timezone) -> String {
    match timezone {
        Timezone::Utc => Utc::now().format(pattern).to_string(),
        Timezone::Local => Local::now().format(pattern).to_string(),
    }
}

/// Plain text formatter
///
/// Layout: `<timestamp> [LEVEL] [category] [corr=<id>] <message> | EX: <error>`,
/// where the correlation and error segments appear only when supplied.
pub struct PlainTextFormatter {
    timestamp_format: String,
    timezone: Timezone,
}

impl PlainTextFormatter {
    /// Create a formatter using the configured pattern and clock
    pub fn new(config: &LoggerConfig) -> Self {
        Self {
            timestamp_format: config.timestamp_format.clone(),
            timezone: config.timezone,
        }
    }
}

impl LogFormatter for PlainTextFormatter {
    fn format_line(&self, record: &Record<'_>) -> String {
        let mut line = format!(
            "{} [{}] [{}]",
            timestamp(&self.timestamp_format, self.timezone),
            record.level,
            record.category
        );
        if let Some(ctx) = record.context {
            let _ = write!(line, " [corr={}]", ctx.correlation_id());
        }
        let _ = write!(line, " {}", record.message);
        if let Some(err) = record.error {
            let _ = write!(line, " | EX: {err}");
        }
        line
    }
}

/// Structured formatter emitting one flat object per line
///
/// Keys are `timestamp`, `level`, `tag`, `message`, plus `correlationId`
/// and `exception` when present. Escaping is minimal: embedded quotes in
/// values are backslash-escaped, control characters are not touched. This
/// is not a general-purpose JSON encoder.
pub struct JsonFormatter {
    timestamp_format: String,
    timezone: Timezone,
}

impl JsonFormatter {
    /// Create a formatter using the configured pattern and clock
    pub fn new(config: &LoggerConfig) -> Self {
        Self {
            timestamp_format: config.timestamp_format.clone(),
            timezone: config.timezone,
        }
    }
}

fn append_field(out: &mut String, key: &str, value: &str) {
    out.push('"');
    out.push_str(&value_escape(key));
    out.push_str("\":\"");
    out.push_str(&value_escape(value));
    out.push('"');
}

fn value_escape(value: &str) -> String {
    value.replace('"', "\\\"")
}

impl LogFormatter for JsonFormatter {
    fn format_line(&self, record: &Record<'_>) -> String {
        let mut out = String::from("{");
        append_field(
            &mut out,
            "timestamp",
            &timestamp(&self.timestamp_format, self.timezone),
        );
        out.push(',');
        append_field(&mut out, "level", record.level.as_str());
        out.push(',');
        append_field(&mut out, "tag", &record.category);
        out.push(',');
        append_field(&mut out, "message", &record.message);
        if let Some(ctx) = record.context {
            out.push(',');
            append_field(&mut out, "correlationId", ctx.correlation_id());
        }
        if let Some(err) = record.error {
            out.push(',');
            append_field(&mut out, "exception", &err.to_string());
        }
        out.push('}');
        out
    }
}
