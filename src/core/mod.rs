//! Core logger types and traits

pub mod caller;
pub mod context;
pub mod enricher;
pub mod error;
pub mod field_value;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod scope;
pub mod timestamp;
pub mod writer;

pub use caller::{Caller, CallerInfo, TrackedCaller, DEFAULT_SKIP_FRAMES};
pub use context::{Context, TracingContext};
pub use enricher::{ContextValuesEnricher, Enricher, StaticFieldsEnricher, TracingEnricher};
pub use error::{ErrorText, LoggerError, Result, ScopeError};
pub use field_value::{ErrorValue, FieldValue, Fields, StructuredValue};
pub use log_level::{
    level_name, parse_level, LevelFilter, LogLevel, INVALID_LEVEL, UNKNOWN_LEVEL_NAME,
};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::WriterMetrics;
pub use scope::Scope;
pub use timestamp::TimestampFormat;
pub use writer::{
    SharedBuffer, Sink, Writer, DEFAULT_BUFFER_SIZE, FIELD_CALLER, FIELD_ERROR, FIELD_LEVEL,
    FIELD_MESSAGE, FIELD_TIME,
};
