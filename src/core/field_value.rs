//! Field values and their rendering
//!
//! A field value renders two ways, one per writer mode:
//!
//! - text mode ([`FieldValue::render_text`]) produces a flat string and
//!   reports categories it cannot represent as [`LoggerError::UnsupportedValue`];
//! - structured mode (the [`Serialize`] impl) produces a nested value and
//!   reports the same categories as a serde error, which the JSON writer turns
//!   into a degraded record.

use super::error::{LoggerError, Result};
use super::timestamp::TimestampFormat;
use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

/// Field set carried by a scope and handed to writers
///
/// Ordered by key so a record renders the same way every time.
pub type Fields = BTreeMap<String, FieldValue>;

/// A value that is encoded through `serde_json` rather than rendered directly
///
/// Implemented for every `Serialize + Debug` type, so maps, vectors and user
/// structs can be logged as fields.
pub trait StructuredValue: fmt::Debug + Send + Sync {
    fn encode(&self) -> serde_json::Result<serde_json::Value>;
}

impl<T> StructuredValue for T
where
    T: Serialize + fmt::Debug + Send + Sync + ?Sized,
{
    fn encode(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Captured error: short message plus the full source chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    message: String,
    detail: String,
}

impl ErrorValue {
    pub fn new(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: detail.into(),
        }
    }

    /// Capture `err`, walking `source()` for the detail string
    pub fn from_error<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let message = err.to_string();
        let mut detail = message.clone();
        let mut source = err.source();
        while let Some(cause) = source {
            detail.push_str(": ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }
        Self { message, detail }
    }

    /// Display text of the outermost error
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message followed by every cause, separated by `": "`
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Value type for structured logging fields
#[derive(Debug, Clone)]
pub enum FieldValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Float32(f32),
    Time(DateTime<FixedOffset>),
    Error(ErrorValue),
    Null,
    /// Fallback delegated to `serde_json`
    Structured(Arc<dyn StructuredValue>),
    /// Complex numbers have no encoding in either mode
    Complex { re: f64, im: f64 },
    /// Handles with no data representation (channels, functions, sockets)
    Opaque(&'static str),
}

impl FieldValue {
    pub fn structured<T>(value: T) -> Self
    where
        T: Serialize + fmt::Debug + Send + Sync + 'static,
    {
        FieldValue::Structured(Arc::new(value))
    }

    pub fn error<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        FieldValue::Error(ErrorValue::from_error(err))
    }

    pub fn complex(re: f64, im: f64) -> Self {
        FieldValue::Complex { re, im }
    }

    /// A handle of the named kind, e.g. `FieldValue::opaque("channel")`
    pub fn opaque(kind: &'static str) -> Self {
        FieldValue::Opaque(kind)
    }

    /// Category name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Str(_) => "string",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Uint(_) => "uint",
            FieldValue::Float(_) => "float64",
            FieldValue::Float32(_) => "float32",
            FieldValue::Time(_) => "time",
            FieldValue::Error(_) => "error",
            FieldValue::Null => "null",
            FieldValue::Structured(_) => "structured",
            FieldValue::Complex { .. } => "complex",
            FieldValue::Opaque(kind) => kind,
        }
    }

    /// String payload of `Str` values and message of `Error` values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            FieldValue::Error(e) => Some(e.message()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Render for the text writer.
    ///
    /// Floats use the shortest representation that round-trips, times use
    /// RFC 3339, errors use their message. Anything else is encoded as JSON.
    pub fn render_text(&self) -> Result<String> {
        let rendered = match self {
            FieldValue::Str(s) => s.clone(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Uint(u) => u.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Float32(f) => f.to_string(),
            FieldValue::Time(t) => TimestampFormat::Rfc3339.format(t),
            FieldValue::Error(e) => e.message().to_string(),
            FieldValue::Null => "null".to_string(),
            FieldValue::Structured(value) => {
                let encoded = value
                    .encode()
                    .map_err(|err| LoggerError::unsupported_value(self.kind(), err.to_string()))?;
                serde_json::to_string(&encoded)?
            }
            FieldValue::Complex { re, im } => {
                return Err(LoggerError::unsupported_value(
                    self.kind(),
                    format!("complex number ({}{:+}i) is not supported", re, im),
                ));
            }
            FieldValue::Opaque(kind) => {
                return Err(LoggerError::unsupported_value(
                    *kind,
                    format!("{} values cannot be encoded", kind),
                ));
            }
        };
        Ok(rendered)
    }
}

fn unsupported<E: serde::ser::Error>(message: impl fmt::Display) -> E {
    E::custom(message)
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Str(s) => serializer.serialize_str(s),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Int(i) => serializer.serialize_i64(*i),
            FieldValue::Uint(u) => serializer.serialize_u64(*u),
            FieldValue::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            FieldValue::Float32(f) if f.is_finite() => serializer.serialize_f32(*f),
            FieldValue::Float(f) => Err(unsupported(format!("unsupported value: {}", f))),
            FieldValue::Float32(f) => Err(unsupported(format!("unsupported value: {}", f))),
            FieldValue::Time(t) => serializer.serialize_str(&TimestampFormat::Rfc3339.format(t)),
            FieldValue::Error(e) => serializer.serialize_str(e.detail()),
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Structured(value) => value
                .encode()
                .map_err(|err| unsupported::<S::Error>(err))?
                .serialize(serializer),
            FieldValue::Complex { .. } => Err(unsupported("unsupported type: complex number")),
            FieldValue::Opaque(kind) => Err(unsupported(format!("unsupported type: {}", kind))),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::Str(s.clone())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

macro_rules! impl_from_integer {
    ($variant:ident => $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for FieldValue {
                fn from(value: $source) -> Self {
                    FieldValue::$variant(value as $target)
                }
            }
        )+
    };
}

impl_from_integer!(Int => i64: i8, i16, i32, i64, isize);
impl_from_integer!(Uint => u64: u8, u16, u32, u64, usize);

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float32(f)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(t: DateTime<FixedOffset>) -> Self {
        FieldValue::Time(t)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(t: DateTime<Utc>) -> Self {
        FieldValue::Time(t.into())
    }
}

impl From<DateTime<Local>> for FieldValue {
    fn from(t: DateTime<Local>) -> Self {
        FieldValue::Time(t.into())
    }
}

impl From<SystemTime> for FieldValue {
    fn from(t: SystemTime) -> Self {
        DateTime::<Utc>::from(t).into()
    }
}

impl From<ErrorValue> for FieldValue {
    fn from(e: ErrorValue) -> Self {
        FieldValue::Error(e)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            other => FieldValue::Structured(Arc::new(other)),
        }
    }
}

impl<T> From<Vec<T>> for FieldValue
where
    T: Serialize + fmt::Debug + Send + Sync + 'static,
{
    fn from(values: Vec<T>) -> Self {
        FieldValue::structured(values)
    }
}

impl<T> From<Option<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}
