//! Scope: fields, context and enrichers accumulated for one operation
//!
//! A scope is built with chainable `with_*` methods, then emits any number of
//! records. Each record carries the scope's fields, after the enrichers have
//! run on a copy of them; the scope itself is left as it was.
//!
//! ```
//! use scopelog::prelude::*;
//! use std::sync::Arc;
//!
//! let buffer = SharedBuffer::new();
//! let logger = Logger::builder()
//!     .writer(Arc::new(TextWriter::new(buffer.clone())))
//!     .build();
//!
//! let scope = logger.with("request_id", "r-1").with("user_id", 42);
//! scope.info("loaded profile");
//! scope.debug("filtered out at the default level");
//! scope.flush().unwrap();
//!
//! assert_eq!(buffer.lines().len(), 1);
//! assert!(buffer.contents().contains(r#"request_id="r-1" user_id="42""#));
//! ```

use super::caller::with_call_site;
use super::context::Context;
use super::enricher::{apply_enrichers, Enricher};
use super::error::{ErrorText, LoggerError, Result, ScopeError};
use super::field_value::{FieldValue, Fields};
use super::log_level::{LevelFilter, LogLevel};
use super::writer::{Writer, FIELD_ERROR};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

#[derive(Clone)]
pub struct Scope {
    writer: Arc<dyn Writer>,
    levels: Arc<LevelFilter>,
    enrichers: Vec<Arc<dyn Enricher>>,
    fields: Fields,
    context: Context,
}

impl Scope {
    pub(crate) fn new(
        writer: Arc<dyn Writer>,
        levels: Arc<LevelFilter>,
        enrichers: Vec<Arc<dyn Enricher>>,
    ) -> Self {
        Self {
            writer,
            levels,
            enrichers,
            fields: Fields::new(),
            context: Context::background(),
        }
    }

    #[must_use]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn with_fields<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.extend(fields);
        self
    }

    /// Add fields from alternating keys and values
    ///
    /// # Panics
    ///
    /// Panics on an odd number of arguments or a key that is not a string.
    /// Use [`Scope::try_with_pairs`] to get the error instead.
    #[must_use]
    pub fn with_pairs<I, V>(self, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        match self.try_with_pairs(args) {
            Ok(scope) => scope,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_with_pairs<I, V>(mut self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        let args: Vec<FieldValue> = args.into_iter().map(Into::into).collect();
        if args.len() % 2 != 0 {
            return Err(LoggerError::invalid_pairs(format!(
                "pairs must have an even number of arguments, got {}",
                args.len()
            )));
        }

        let mut pairs = Fields::new();
        let mut args = args.into_iter();
        while let (Some(key), Some(value)) = (args.next(), args.next()) {
            match key {
                FieldValue::Str(key) => {
                    pairs.insert(key, value);
                }
                other => {
                    return Err(LoggerError::invalid_pairs(format!(
                        "pairs must alternate string keys and values, found a {} key",
                        other.kind()
                    )));
                }
            }
        }

        self.fields.extend(pairs);
        Ok(self)
    }

    #[must_use]
    pub fn with_context(mut self, ctx: Context) -> Self {
        self.set_context(ctx);
        self
    }

    /// Store the error's message under `error`
    #[must_use]
    pub fn with_error<E>(mut self, err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        self.set_error(err);
        self
    }

    /// Attach an enricher that runs after the logger-wide ones
    #[must_use]
    pub fn with_enricher(mut self, enricher: impl Enricher + 'static) -> Self {
        self.enrichers.push(Arc::new(enricher));
        self
    }

    pub fn insert<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn extend<I, K, V>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields
            .extend(fields.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn set_context(&mut self, ctx: Context) -> &mut Self {
        self.context = ctx;
        self
    }

    pub fn set_error<E>(&mut self, err: &E) -> &mut Self
    where
        E: std::error::Error + ?Sized,
    {
        self.fields
            .insert(FIELD_ERROR.to_string(), FieldValue::Str(err.to_string()));
        self
    }

    /// Independent copy sharing the writer and level filter
    pub fn fork(&self) -> Self {
        self.clone()
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.levels.enabled(level)
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.emit(LogLevel::Debug, &message.into(), Location::caller());
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.emit(LogLevel::Info, &message.into(), Location::caller());
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.emit(level, &message.into(), Location::caller());
    }

    /// Emit at `Error` and return the message as an error value
    ///
    /// When the scope carries an `error` field the returned error wraps it.
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) -> ScopeError {
        let message = message.into();
        self.emit(LogLevel::Error, &message, Location::caller());

        match self.fields.get(FIELD_ERROR).and_then(FieldValue::as_str) {
            Some(cause) => ScopeError::Wrapped {
                message,
                source: ErrorText(cause.to_string()),
            },
            None => ScopeError::Message(message),
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.writer.flush()
    }

    fn emit(&self, level: LogLevel, message: &str, location: &'static Location<'static>) {
        if !self.levels.enabled(level) {
            return;
        }

        let enriched;
        let fields = if self.enrichers.is_empty() {
            &self.fields
        } else {
            let mut copy = self.fields.clone();
            apply_enrichers(
                &self.enrichers,
                &self.context,
                level.to_str(),
                message,
                &mut copy,
            );
            enriched = copy;
            &enriched
        };

        with_call_site(location, || {
            if let Err(e) = self.writer.write(level.code(), message, fields) {
                eprintln!(
                    "[LOGGER ERROR] Writer '{}' failed: {}",
                    self.writer.name(),
                    e
                );
            }
        });
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("writer", &self.writer.name())
            .field("fields", &self.fields)
            .field("context", &self.context)
            .field("enrichers", &self.enrichers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::caller::Caller;
    use crate::core::writer::SharedBuffer;
    use crate::writers::{JsonWriter, TextWriter};
    use serde_json::Value;
    use std::io;

    fn text_scope(buffer: &SharedBuffer, minimum: LogLevel) -> Scope {
        let writer = TextWriter::new(buffer.clone()).with_caller_info(|_: usize| Caller::new("t.rs", 1));
        Scope::new(Arc::new(writer), Arc::new(LevelFilter::new(minimum)), Vec::new())
    }

    fn json_scope(buffer: &SharedBuffer) -> Scope {
        Scope::new(
            Arc::new(JsonWriter::new(buffer.clone())),
            Arc::new(LevelFilter::new(LogLevel::Debug)),
            Vec::new(),
        )
    }

    fn records(buffer: &SharedBuffer) -> Vec<Value> {
        buffer
            .lines()
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_filtered_level_writes_nothing() {
        let buffer = SharedBuffer::new();
        let scope = text_scope(&buffer, LogLevel::Info).with("k", "v");

        scope.debug("hidden");
        scope.flush().unwrap();

        assert!(buffer.is_empty());
        assert_eq!(scope.fields().len(), 1);
        assert!(!scope.enabled(LogLevel::Debug));
        assert!(scope.enabled(LogLevel::Error));
    }

    #[test]
    fn test_later_writes_overwrite() {
        let buffer = SharedBuffer::new();
        let scope = json_scope(&buffer)
            .with("attempt", 1)
            .with_fields([("attempt", 2), ("limit", 5)]);

        scope.info("retrying");
        scope.flush().unwrap();

        let entry = &records(&buffer)[0];
        assert_eq!(entry["attempt"], 2);
        assert_eq!(entry["limit"], 5);
    }

    #[test]
    fn test_in_place_chain() {
        let buffer = SharedBuffer::new();
        let mut scope = json_scope(&buffer);
        scope
            .insert("a", 1)
            .extend(vec![("b", "two")])
            .set_context(Context::background().with_value("tenant", "acme"));

        assert_eq!(scope.fields().len(), 2);
        assert!(scope.context().value("tenant").is_some());
    }

    #[test]
    fn test_pairs() {
        let buffer = SharedBuffer::new();
        let scope = json_scope(&buffer).with_pairs(vec![
            FieldValue::from("user"),
            FieldValue::from("ana"),
            FieldValue::from("age"),
            FieldValue::from(31),
        ]);

        assert_eq!(scope.fields()["user"].as_str(), Some("ana"));
        assert_eq!(scope.fields().len(), 2);
    }

    #[test]
    fn test_try_with_pairs_errors() {
        let buffer = SharedBuffer::new();

        let odd = json_scope(&buffer).try_with_pairs(vec!["only-key"]);
        assert!(matches!(odd, Err(LoggerError::InvalidPairs(_))));

        let bad_key = json_scope(&buffer).try_with_pairs(vec![FieldValue::from(1), "v".into()]);
        let err = bad_key.unwrap_err();
        assert!(err.to_string().contains("int key"));
    }

    #[test]
    #[should_panic(expected = "even number of arguments")]
    fn test_with_pairs_panics_on_odd_length() {
        let buffer = SharedBuffer::new();
        let _ = json_scope(&buffer).with_pairs(vec!["a", "b", "c"]);
    }

    #[test]
    fn test_error_without_cause() {
        let buffer = SharedBuffer::new();
        let err = json_scope(&buffer).error(format!("failed: {}", "bad input"));

        assert_eq!(err.to_string(), "failed: bad input");
        assert!(err.cause().is_none());
    }

    #[test]
    fn test_error_wraps_stored_error() {
        let buffer = SharedBuffer::new();
        let cause = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let scope = json_scope(&buffer).with_error(&cause);

        let err = scope.error("loading config");
        scope.flush().unwrap();

        assert_eq!(err.to_string(), "loading config: file not found");
        assert_eq!(err.message(), "loading config");

        let entry = &records(&buffer)[0];
        assert_eq!(entry["level"], "ERROR");
        assert_eq!(entry["error"], "file not found");
    }

    #[test]
    fn test_fork_is_independent() {
        let buffer = SharedBuffer::new();
        let parent = json_scope(&buffer).with("shared", true);
        let child = parent.fork().with("child_only", 1);

        parent.info("parent");
        child.info("child");
        parent.flush().unwrap();

        let entries = records(&buffer);
        assert_eq!(entries.len(), 2);
        assert!(entries[0].get("child_only").is_none());
        assert_eq!(entries[1]["child_only"], 1);
        assert_eq!(entries[1]["shared"], true);
    }

    #[test]
    fn test_enrichers_see_context_and_do_not_persist() {
        let buffer = SharedBuffer::new();
        let ctx = Context::background().with_value("request_id", "r-7");
        let scope = json_scope(&buffer)
            .with_context(ctx)
            .with_enricher(|ctx: &Context, level: &str, _: &str, fields: &mut Fields| {
                if let Some(id) = ctx.value("request_id") {
                    fields.insert("request_id".to_string(), id.clone());
                }
                fields.insert("seen_level".to_string(), level.into());
            });

        scope.log(LogLevel::Info, "handled");
        scope.flush().unwrap();

        let entry = &records(&buffer)[0];
        assert_eq!(entry["request_id"], "r-7");
        assert_eq!(entry["seen_level"], "INFO");
        assert!(scope.fields().is_empty());
    }

    struct ClosedWriter;

    impl Writer for ClosedWriter {
        fn write(&self, _level: i32, _message: &str, _fields: &Fields) -> Result<()> {
            Err(LoggerError::writer("sink closed"))
        }

        fn flush(&self) -> Result<()> {
            Err(LoggerError::writer("sink closed"))
        }

        fn name(&self) -> &str {
            "closed"
        }
    }

    #[test]
    fn test_writer_errors_are_not_returned_from_emission() {
        let scope = Scope::new(
            Arc::new(ClosedWriter),
            Arc::new(LevelFilter::default()),
            Vec::new(),
        );

        scope.info("dropped on the floor");
        let err = scope.fork().with("error", "upstream").error("still returns");

        assert_eq!(err.to_string(), "still returns: upstream");
        assert!(matches!(scope.flush(), Err(LoggerError::WriterError(_))));
    }

    #[test]
    fn test_call_site_points_at_caller() {
        let buffer = SharedBuffer::new();
        let scope = json_scope(&buffer);

        let line = line!() + 1;
        scope.info("here");
        scope.flush().unwrap();

        let entry = &records(&buffer)[0];
        assert_eq!(entry["caller"], format!("scope.rs:{}", line));
    }
}
