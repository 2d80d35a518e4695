//! JSON lines writer
//!
//! Each record is one object with the reserved keys `time`, `level`, `msg`
//! and `caller`, followed by every user field at the top level. A user field
//! named like a reserved key replaces the reserved value.
//!
//! A record that cannot be serialized is replaced by a degraded record
//! carrying the reserved keys and an `error` key describing the failure.

use super::{open_append, CallerLookup};
use crate::core::writer::{
    RecordBuffer, FIELD_CALLER, FIELD_ERROR, FIELD_LEVEL, FIELD_MESSAGE, FIELD_TIME,
};
use crate::core::{
    level_name, CallerInfo, Fields, Result, Sink, TimestampFormat, Writer, WriterMetrics,
    DEFAULT_BUFFER_SIZE,
};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::json;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

pub struct JsonWriter<W: Sink = io::Stdout> {
    records: RecordBuffer<W>,
    caller: CallerLookup,
    timestamp_format: TimestampFormat,
}

/// Borrowed view of one record, serialized as a flat map
struct JsonRecord<'a> {
    time: &'a str,
    level: &'a str,
    message: &'a str,
    caller: &'a str,
    fields: &'a Fields,
}

impl Serialize for JsonRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let reserved = [
            (FIELD_TIME, self.time),
            (FIELD_LEVEL, self.level),
            (FIELD_MESSAGE, self.message),
            (FIELD_CALLER, self.caller),
        ];

        let mut map = serializer.serialize_map(None)?;
        for (key, value) in reserved {
            if !self.fields.contains_key(key) {
                map.serialize_entry(key, value)?;
            }
        }
        for (key, value) in self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl JsonWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl JsonWriter<File> {
    /// Append JSON lines to the file at `path`, creating it if needed
    ///
    /// # Example
    ///
    /// ```no_run
    /// use scopelog::JsonWriter;
    ///
    /// let writer = JsonWriter::file("/var/log/app.jsonl").unwrap();
    /// ```
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(open_append(path.as_ref())?))
    }
}

impl<W: Sink> JsonWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            records: RecordBuffer::new(sink, DEFAULT_BUFFER_SIZE),
            caller: CallerLookup::default(),
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_caller_info(mut self, provider: impl CallerInfo + 'static) -> Self {
        self.caller.set_provider(Arc::new(provider));
        self
    }

    #[must_use]
    pub fn with_skip_frames(self, skip: usize) -> Self {
        self.caller.set_skip(skip);
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_buffer_size(mut self, capacity: usize) -> Self {
        self.records = self.records.resize(capacity);
        self
    }

    pub fn metrics(&self) -> &WriterMetrics {
        self.records.metrics()
    }

    pub fn skip_frames(&self) -> usize {
        self.caller.skip()
    }
}

impl<W: Sink> Writer for JsonWriter<W> {
    fn write(&self, level: i32, message: &str, fields: &Fields) -> Result<()> {
        let time = self.timestamp_format.now();
        let caller = self.caller.resolve().to_string();
        let record = JsonRecord {
            time: &time,
            level: level_name(level),
            message,
            caller: &caller,
            fields,
        };

        let bytes = match serde_json::to_vec(&record) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.records.metrics().record_marshal_failure();
                let degraded = json!({
                    FIELD_TIME: record.time,
                    FIELD_LEVEL: record.level,
                    FIELD_MESSAGE: record.message,
                    FIELD_CALLER: record.caller,
                    FIELD_ERROR: format!("failed to marshal log entry: {}", err),
                });
                serde_json::to_vec(&degraded)?
            }
        };

        self.records.append(&bytes)
    }

    fn flush(&self) -> Result<()> {
        self.records.flush()
    }

    fn name(&self) -> &str {
        "json"
    }

    fn set_skip_frames(&self, skip: usize) {
        self.caller.set_skip(skip);
    }
}
