//! Enrichers: context-aware mutators run before a record is written

use super::context::Context;
use super::field_value::{FieldValue, Fields};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Adds fields to a record based on its context
///
/// Enrichers must not fail the log call. A panicking enricher is reported on
/// stderr and skipped; the record is still written.
///
/// Any closure with the matching signature is an enricher:
///
/// ```
/// use scopelog::core::{Context, Enricher, Fields};
///
/// let host = |_: &Context, _: &str, _: &str, fields: &mut Fields| {
///     fields.insert("host".to_string(), "web-1".into());
/// };
///
/// let mut fields = Fields::new();
/// host.enrich(&Context::background(), "INFO", "started", &mut fields);
/// assert!(fields.contains_key("host"));
/// ```
pub trait Enricher: Send + Sync {
    fn enrich(&self, ctx: &Context, level: &str, message: &str, fields: &mut Fields);
}

impl<F> Enricher for F
where
    F: Fn(&Context, &str, &str, &mut Fields) + Send + Sync,
{
    fn enrich(&self, ctx: &Context, level: &str, message: &str, fields: &mut Fields) {
        self(ctx, level, message, fields)
    }
}

/// Fields shared by every record, such as service name or version
///
/// Fields already present on the record take priority.
#[derive(Debug, Clone, Default)]
pub struct StaticFieldsEnricher {
    fields: Fields,
}

impl StaticFieldsEnricher {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }
}

impl Enricher for StaticFieldsEnricher {
    fn enrich(&self, _ctx: &Context, _level: &str, _message: &str, fields: &mut Fields) {
        for (key, value) in &self.fields {
            if !fields.contains_key(key) {
                fields.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Copies `trace_id`, `span_id` and `parent_span_id` out of the context
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEnricher;

impl Enricher for TracingEnricher {
    fn enrich(&self, ctx: &Context, _level: &str, _message: &str, fields: &mut Fields) {
        let Some(tracing) = ctx.tracing() else {
            return;
        };

        fields.insert("trace_id".to_string(), tracing.trace_id.as_str().into());
        fields.insert("span_id".to_string(), tracing.span_id.as_str().into());
        if let Some(ref parent) = tracing.parent_span_id {
            fields.insert("parent_span_id".to_string(), parent.as_str().into());
        }
    }
}

/// Copies every context value not already set on the record
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextValuesEnricher;

impl Enricher for ContextValuesEnricher {
    fn enrich(&self, ctx: &Context, _level: &str, _message: &str, fields: &mut Fields) {
        for (key, value) in ctx.values() {
            if !fields.contains_key(key) {
                fields.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Run `enrichers` in order with per-enricher panic isolation.
///
/// Returns the number of enrichers that panicked.
pub(crate) fn apply_enrichers(
    enrichers: &[Arc<dyn Enricher>],
    ctx: &Context,
    level: &str,
    message: &str,
    fields: &mut Fields,
) -> usize {
    let mut failures = 0;

    for (idx, enricher) in enrichers.iter().enumerate() {
        let result = catch_unwind(AssertUnwindSafe(|| {
            enricher.enrich(ctx, level, message, fields)
        }));

        if let Err(panic_info) = result {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            eprintln!(
                "[LOGGER ERROR] Enricher #{} panicked: {}. Record is written without it.",
                idx, panic_msg
            );
            failures += 1;
        }
    }

    failures
}
