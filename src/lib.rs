//! # scopelog
//!
//! Structured logging built around scopes: fields accumulated across call
//! sites, enriched from a request context, filtered by level and written as
//! text or JSON lines.
//!
//! ## Features
//!
//! - **Scopes**: chainable field builders, forkable per code path
//! - **Two writers**: `file:line [LEVEL][time] msg k="v"` text, or JSON lines
//! - **Enrichers**: logger-wide and per-scope, isolated from panics
//! - **Explicit or global**: pass a [`Logger`] around, or use the free functions
//!
//! ```
//! use scopelog::prelude::*;
//! use std::sync::Arc;
//!
//! let buffer = SharedBuffer::new();
//! let logger = Logger::builder()
//!     .writer(Arc::new(JsonWriter::new(buffer.clone())))
//!     .enricher(StaticFieldsEnricher::new().with_field("service", "checkout"))
//!     .build();
//!
//! let err = logger
//!     .with("order_id", 1042)
//!     .with_error(&std::io::Error::new(std::io::ErrorKind::Other, "card declined"))
//!     .error("payment failed");
//! logger.flush().unwrap();
//!
//! assert_eq!(err.to_string(), "payment failed: card declined");
//! assert!(buffer.contents().contains(r#""service":"checkout""#));
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod writers;

pub mod prelude {
    pub use crate::core::{
        Caller, CallerInfo, Context, ContextValuesEnricher, Enricher, FieldValue, Fields,
        LogLevel, Logger, LoggerBuilder, LoggerError, Result, Scope, ScopeError, SharedBuffer,
        Sink, StaticFieldsEnricher, TimestampFormat, TracingContext, TracingEnricher, Writer,
    };
    pub use crate::writers::{JsonWriter, TextWriter};
}

pub use crate::core::{
    level_name, parse_level, Caller, CallerInfo, Context, ContextValuesEnricher, Enricher,
    ErrorText, ErrorValue, FieldValue, Fields, LevelFilter, LogLevel, Logger, LoggerBuilder,
    LoggerError, Result, Scope, ScopeError, SharedBuffer, Sink, StaticFieldsEnricher,
    StructuredValue, TimestampFormat, TracingContext, TracingEnricher, TrackedCaller, Writer,
    WriterMetrics, DEFAULT_BUFFER_SIZE, DEFAULT_SKIP_FRAMES, FIELD_CALLER, FIELD_ERROR, FIELD_LEVEL, FIELD_MESSAGE,
    FIELD_TIME, INVALID_LEVEL, UNKNOWN_LEVEL_NAME,
};
pub use global::{
    debug, error, flush, global, info, register_enricher, scope, set_level, set_level_name,
    set_min_level, set_skip_frames, set_writer, with, with_context, with_error, with_fields,
    with_pairs,
};
pub use writers::{JsonWriter, TextWriter};
