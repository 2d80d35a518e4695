//! Process-wide default logger
//!
//! Free functions mirroring [`Logger`]'s methods, backed by one lazily
//! created logger (text on stdout, minimum level `Info`). Configure it once at
//! startup:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! scopelog::set_writer(Arc::new(scopelog::JsonWriter::stdout()));
//! scopelog::set_level_name("debug");
//!
//! scopelog::with("port", 8080).info("listening");
//! scopelog::flush().unwrap();
//! ```

use crate::core::{
    Context, Enricher, FieldValue, LogLevel, Logger, Result, Scope, ScopeError, Writer,
};
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger, created on first use
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(Logger::new)
}

pub fn set_writer(writer: Arc<dyn Writer>) {
    global().set_writer(writer);
}

pub fn register_enricher(enricher: impl Enricher + 'static) {
    global().register_enricher(enricher);
}

/// Set the minimum level from a raw code; unknown codes are ignored
pub fn set_level(code: i32) -> bool {
    global().set_level(code)
}

pub fn set_min_level(level: LogLevel) {
    global().set_min_level(level);
}

pub fn set_level_name(name: &str) -> bool {
    global().set_level_name(name)
}

pub fn set_skip_frames(skip: usize) {
    global().set_skip_frames(skip);
}

pub fn scope() -> Scope {
    global().scope()
}

pub fn with<K, V>(key: K, value: V) -> Scope
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    global().with(key, value)
}

pub fn with_fields<I, K, V>(fields: I) -> Scope
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<FieldValue>,
{
    global().with_fields(fields)
}

/// # Panics
///
/// Panics on an odd number of arguments or a non-string key.
pub fn with_pairs<I, V>(args: I) -> Scope
where
    I: IntoIterator<Item = V>,
    V: Into<FieldValue>,
{
    global().with_pairs(args)
}

pub fn with_context(ctx: Context) -> Scope {
    global().with_context(ctx)
}

pub fn with_error<E>(err: &E) -> Scope
where
    E: std::error::Error + ?Sized,
{
    global().with_error(err)
}

#[track_caller]
pub fn debug(message: impl Into<String>) {
    global().debug(message);
}

#[track_caller]
pub fn info(message: impl Into<String>) {
    global().info(message);
}

#[track_caller]
pub fn error(message: impl Into<String>) -> ScopeError {
    global().error(message)
}

pub fn flush() -> Result<()> {
    global().flush()
}
