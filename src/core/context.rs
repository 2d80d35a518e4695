//! Context handle passed through scopes to enrichers
//!
//! A [`Context`] is immutable once built and cheap to clone; deriving a new
//! context with [`Context::with_value`] leaves the original untouched.

use super::field_value::{FieldValue, Fields};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Tracing identifiers for distributed request correlation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingContext {
    /// Trace ID for request correlation
    pub trace_id: String,

    /// Span ID for this operation
    pub span_id: String,

    /// Parent span ID (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<String>,
}

impl TracingContext {
    /// Create a new tracing context
    pub fn new(trace_id: impl Into<String>, span_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            span_id: span_id.into(),
            parent_span_id: None,
        }
    }

    /// Set parent span ID
    pub fn with_parent(mut self, parent_span_id: impl Into<String>) -> Self {
        self.parent_span_id = Some(parent_span_id.into());
        self
    }
}

/// Request-scoped values visible to enrichers
///
/// # Example
///
/// ```
/// use scopelog::core::{Context, TracingContext};
///
/// let ctx = Context::background()
///     .with_value("request_id", "req-42")
///     .with_tracing(TracingContext::new("trace-1", "span-1"));
///
/// assert_eq!(ctx.value("request_id").and_then(|v| v.as_str()), Some("req-42"));
/// assert_eq!(ctx.tracing().map(|t| t.span_id.as_str()), Some("span-1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: Arc<Fields>,
    tracing: Option<TracingContext>,
}

impl Context {
    /// Empty root context
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context carrying one more value
    #[must_use]
    pub fn with_value<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Arc::make_mut(&mut self.values).insert(key.into(), value.into());
        self
    }

    /// Derive a context carrying tracing identifiers
    #[must_use]
    pub fn with_tracing(mut self, tracing: TracingContext) -> Self {
        self.tracing = Some(tracing);
        self
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn values(&self) -> &Fields {
        &self.values
    }

    pub fn tracing(&self) -> Option<&TracingContext> {
        self.tracing.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.tracing.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_is_empty() {
        assert!(Context::background().is_empty());
    }

    #[test]
    fn test_with_value_does_not_affect_parent() {
        let parent = Context::background().with_value("tenant", "acme");
        let child = parent.clone().with_value("request_id", "r-1");

        assert_eq!(parent.values().len(), 1);
        assert_eq!(child.values().len(), 2);
        assert!(parent.value("request_id").is_none());
    }

    #[test]
    fn test_tracing_context() {
        let tracing = TracingContext::new("trace-abc", "span-123").with_parent("span-000");

        assert_eq!(tracing.trace_id, "trace-abc");
        assert_eq!(tracing.span_id, "span-123");
        assert_eq!(tracing.parent_span_id, Some("span-000".to_string()));

        let ctx = Context::background().with_tracing(tracing.clone());
        assert_eq!(ctx.tracing(), Some(&tracing));
        assert!(!ctx.is_empty());
    }

    #[test]
    fn test_tracing_json_skips_missing_parent() {
        let json = serde_json::to_string(&TracingContext::new("t", "s")).unwrap();
        assert_eq!(json, r#"{"trace_id":"t","span_id":"s"}"#);
    }
}
