//! Contextual metadata attached to log records

use std::collections::HashMap;
use uuid::Uuid;

/// Immutable bag of metadata carried by a single log call
///
/// A context groups related records under one correlation id, optionally
/// with extra key/value data. Build one with [`Context::builder`]; once
/// built it cannot be mutated.
#[derive(Debug, Clone)]
pub struct Context {
    correlation_id: String,
    data: HashMap<String, String>,
}

impl Context {
    /// Create a context with a freshly generated correlation id and no data
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building a context
    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    /// The correlation id grouping related records
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    /// The attached key/value data
    pub fn data(&self) -> &HashMap<String, String> {
        &self.data
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Context`]
pub struct ContextBuilder {
    correlation_id: String,
    data: HashMap<String, String>,
}

impl ContextBuilder {
    /// Create a builder with a freshly generated correlation id
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4().to_string(),
            data: HashMap::new(),
        }
    }

    /// Set an explicit correlation id
    pub fn correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = id.into();
        self
    }

    /// Attach a key/value pair
    pub fn add(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Freeze the context
    pub fn build(self) -> Context {
        Context {
            correlation_id: self.correlation_id,
            data: self.data,
        }
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_contexts_get_distinct_ids() {
        let a = Context::new();
        let b = Context::new();
        assert_ne!(a.correlation_id(), b.correlation_id());
        assert!(a.data().is_empty());
    }

    #[test]
    fn test_builder() {
        let ctx = Context::builder()
            .correlation_id("req-42")
            .add("player", "alice")
            .add("dimension", "overworld")
            .build();

        assert_eq!(ctx.correlation_id(), "req-42");
        assert_eq!(ctx.data().get("player").map(String::as_str), Some("alice"));
        assert_eq!(ctx.data().len(), 2);
    }
}
