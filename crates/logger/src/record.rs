//! Log record type

use crate::{Context, Level};
use std::borrow::Cow;
use std::error::Error as StdError;

/// Category assigned to records that do not specify one
pub const DEFAULT_CATEGORY: &str = "general";

/// A single log call, borrowed from the caller
///
/// Records are cheap to build on the hot path: the category and message
/// borrow when the caller has a `&str`, and context/error ride along by
/// reference. The pipeline formats the record into an owned line before
/// it crosses the thread boundary.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    /// Severity of this record
    pub level: Level,

    /// Category tag used for per-subsystem filtering
    pub category: Cow<'a, str>,

    /// The log message
    pub message: Cow<'a, str>,

    /// Optional correlation context
    pub context: Option<&'a Context>,

    /// Optional caught error attached to this record
    pub error: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Record<'a> {
    /// Create a new record in the default category
    #[inline]
    pub fn new(level: Level, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            level,
            category: Cow::Borrowed(DEFAULT_CATEGORY),
            message: message.into(),
            context: None,
            error: None,
        }
    }

    /// Builder-style method for setting the category
    #[inline]
    pub fn in_category(mut self, category: impl Into<Cow<'a, str>>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder-style method for attaching a context
    #[inline]
    pub fn with_context(mut self, context: &'a Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Builder-style method for attaching a caught error
    #[inline]
    pub fn with_error(mut self, error: &'a (dyn StdError + 'static)) -> Self {
        self.error = Some(error);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let record = Record::new(Level::Info, "hello");
        assert_eq!(record.category, DEFAULT_CATEGORY);
        assert_eq!(record.message, "hello");
        assert!(record.context.is_none());
        assert!(record.error.is_none());
    }

    #[test]
    fn test_builder_methods() {
        let ctx = Context::new();
        let record = Record::new(Level::Warn, format!("chunk {} stalled", 7))
            .in_category("world")
            .with_context(&ctx);

        assert_eq!(record.category, "world");
        assert_eq!(record.message, "chunk 7 stalled");
        assert!(record.context.is_some());
    }
}
