//! Logger: the shared writer, level filter and enricher chain scopes start from

use super::context::Context;
use super::enricher::Enricher;
use super::error::{Result, ScopeError};
use super::field_value::FieldValue;
use super::log_level::{LevelFilter, LogLevel};
use super::scope::Scope;
use super::writer::Writer;
use crate::writers::TextWriter;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Explicit logging context
///
/// Every setter takes `&self`, so one logger can be shared between threads
/// (and is, as the process-wide default in [`crate::global`]). Changes apply
/// to scopes created afterwards; the level filter is shared with existing
/// scopes as well.
///
/// # Example
///
/// ```
/// use scopelog::prelude::*;
/// use std::sync::Arc;
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .writer(Arc::new(JsonWriter::new(buffer.clone())))
///     .build();
///
/// logger.with("port", 8080).info("listening");
/// logger.flush().unwrap();
///
/// assert!(buffer.contents().contains(r#""port":8080"#));
/// ```
pub struct Logger {
    writer: RwLock<Arc<dyn Writer>>,
    levels: Arc<LevelFilter>,
    enrichers: RwLock<Vec<Arc<dyn Enricher>>>,
    skip_frames: RwLock<Option<usize>>,
}

impl Logger {
    /// Text writer on stdout, minimum level `Info`
    #[must_use]
    pub fn new() -> Self {
        Self::with_writer(Arc::new(TextWriter::stdout()))
    }

    #[must_use]
    pub fn with_writer(writer: Arc<dyn Writer>) -> Self {
        Self {
            writer: RwLock::new(writer),
            levels: Arc::new(LevelFilter::default()),
            enrichers: RwLock::new(Vec::new()),
            skip_frames: RwLock::new(None),
        }
    }

    /// Replace the active writer
    ///
    /// The old writer is not flushed. A skip depth set with
    /// [`Logger::set_skip_frames`] is applied to the new writer.
    pub fn set_writer(&self, writer: Arc<dyn Writer>) {
        if let Some(skip) = *self.skip_frames.read() {
            writer.set_skip_frames(skip);
        }
        *self.writer.write() = writer;
    }

    pub fn writer(&self) -> Arc<dyn Writer> {
        Arc::clone(&self.writer.read())
    }

    /// Append to the logger-wide enricher chain
    ///
    /// Runs for every scope created afterwards, before that scope's own
    /// enrichers.
    pub fn register_enricher(&self, enricher: impl Enricher + 'static) {
        self.enrichers.write().push(Arc::new(enricher));
    }

    pub fn enricher_count(&self) -> usize {
        self.enrichers.read().len()
    }

    /// Set the minimum level from a raw code; unknown codes are ignored
    pub fn set_level(&self, code: i32) -> bool {
        self.levels.set_minimum(code)
    }

    pub fn set_min_level(&self, level: LogLevel) {
        self.levels.set_level(level);
    }

    /// Set the minimum level by name, case-insensitively
    pub fn set_level_name(&self, name: &str) -> bool {
        match LogLevel::parse(name) {
            Some(level) => {
                self.set_min_level(level);
                true
            }
            None => false,
        }
    }

    pub fn min_level(&self) -> LogLevel {
        self.levels.minimum()
    }

    pub fn should_emit(&self, code: i32) -> bool {
        self.levels.should_emit(code)
    }

    /// Frame-skip depth for the active writer and any writer set later
    pub fn set_skip_frames(&self, skip: usize) {
        *self.skip_frames.write() = Some(skip);
        self.writer.read().set_skip_frames(skip);
    }

    /// Empty scope bound to the current writer and enricher chain
    pub fn scope(&self) -> Scope {
        Scope::new(
            self.writer(),
            Arc::clone(&self.levels),
            self.enrichers.read().clone(),
        )
    }

    pub fn with<K, V>(&self, key: K, value: V) -> Scope
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.scope().with(key, value)
    }

    pub fn with_fields<I, K, V>(&self, fields: I) -> Scope
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.scope().with_fields(fields)
    }

    /// See [`Scope::with_pairs`]
    pub fn with_pairs<I, V>(&self, args: I) -> Scope
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        self.scope().with_pairs(args)
    }

    pub fn try_with_pairs<I, V>(&self, args: I) -> Result<Scope>
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        self.scope().try_with_pairs(args)
    }

    pub fn with_context(&self, ctx: Context) -> Scope {
        self.scope().with_context(ctx)
    }

    pub fn with_error<E>(&self, err: &E) -> Scope
    where
        E: std::error::Error + ?Sized,
    {
        self.scope().with_error(err)
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.scope().debug(message);
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.scope().info(message);
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.scope().log(level, message);
    }

    #[track_caller]
    pub fn error(&self, message: impl Into<String>) -> ScopeError {
        self.scope().error(message)
    }

    pub fn flush(&self) -> Result<()> {
        self.writer.read().flush()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("writer", &self.writer.read().name())
            .field("min_level", &self.min_level())
            .field("enrichers", &self.enricher_count())
            .finish()
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use scopelog::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .writer(Arc::new(JsonWriter::stdout()))
///     .enricher(StaticFieldsEnricher::new().with_field("service", "billing"))
///     .build();
///
/// assert_eq!(logger.min_level(), LogLevel::Debug);
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    writer: Option<Arc<dyn Writer>>,
    enrichers: Vec<Arc<dyn Enricher>>,
    skip_frames: Option<usize>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            writer: None,
            enrichers: Vec::new(),
            skip_frames: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Defaults to a text writer on stdout
    #[must_use = "builder methods return a new value"]
    pub fn writer(mut self, writer: Arc<dyn Writer>) -> Self {
        self.writer = Some(writer);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn enricher(mut self, enricher: impl Enricher + 'static) -> Self {
        self.enrichers.push(Arc::new(enricher));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn skip_frames(mut self, skip: usize) -> Self {
        self.skip_frames = Some(skip);
        self
    }

    pub fn build(self) -> Logger {
        let logger = match self.writer {
            Some(writer) => Logger::with_writer(writer),
            None => Logger::new(),
        };

        logger.set_min_level(self.min_level);
        logger.enrichers.write().extend(self.enrichers);
        if let Some(skip) = self.skip_frames {
            logger.set_skip_frames(skip);
        }

        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
