//! Plain text writer
//!
//! One record per line:
//!
//! ```text
//! main.rs:42 [INFO][2025-01-08T10:30:45Z] user logged in action="login" user_id="123"
//! ```

use super::{open_append, CallerLookup};
use crate::core::writer::RecordBuffer;
use crate::core::{
    level_name, CallerInfo, Fields, Result, Sink, TimestampFormat, Writer, WriterMetrics,
    DEFAULT_BUFFER_SIZE,
};
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

pub struct TextWriter<W: Sink = io::Stdout> {
    records: RecordBuffer<W>,
    caller: CallerLookup,
    timestamp_format: TimestampFormat,
    #[cfg(feature = "console")]
    use_colors: bool,
}

impl TextWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl TextWriter<File> {
    /// Append to the file at `path`, creating it if needed
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(open_append(path.as_ref())?))
    }
}

impl<W: Sink> TextWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            records: RecordBuffer::new(sink, DEFAULT_BUFFER_SIZE),
            caller: CallerLookup::default(),
            timestamp_format: TimestampFormat::default(),
            #[cfg(feature = "console")]
            use_colors: false,
        }
    }

    /// Replace the provider that resolves `file:line` for each record
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

    /// Set the timestamp precision
    ///
    /// # Example
    ///
    /// ```
    /// use scopelog::{TextWriter, TimestampFormat};
    ///
    /// let writer = TextWriter::new(Vec::new())
    ///     .with_timestamp_format(TimestampFormat::Rfc3339Millis);
    /// ```
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

    /// Color the level tag with ANSI escapes
    #[cfg(feature = "console")]
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn metrics(&self) -> &WriterMetrics {
        self.records.metrics()
    }

    pub fn skip_frames(&self) -> usize {
        self.caller.skip()
    }

    #[cfg(feature = "console")]
    fn level_tag(&self, level: i32) -> String {
        use colored::Colorize;

        match crate::core::LogLevel::from_code(level) {
            Some(known) if self.use_colors => {
                known.to_str().color(known.color_code()).to_string()
            }
            _ => level_name(level).to_string(),
        }
    }

    #[cfg(not(feature = "console"))]
    fn level_tag(&self, level: i32) -> String {
        level_name(level).to_string()
    }
}

impl<W: Sink> Writer for TextWriter<W> {
    /// # Panics
    ///
    /// Panics when a field value cannot be rendered as text. Nothing is
    /// buffered for that record.
    fn write(&self, level: i32, message: &str, fields: &Fields) -> Result<()> {
        let rendered = match format_fields(fields) {
            Ok(rendered) => rendered,
            Err(err) => panic!("{}", err),
        };

        let line = format!(
            "{} [{}][{}] {}{}",
            self.caller.resolve(),
            self.level_tag(level),
            self.timestamp_format.now(),
            escape_message(message),
            rendered
        );

        self.records.append(line.as_bytes())
    }

    fn flush(&self) -> Result<()> {
        self.records.flush()
    }

    fn name(&self) -> &str {
        "text"
    }

    fn set_skip_frames(&self, skip: usize) {
        self.caller.set_skip(skip);
    }
}

/// Render every field as ` key="value"`, in key order
pub(crate) fn format_fields(fields: &Fields) -> Result<String> {
    let mut out = String::new();
    for (key, value) in fields {
        let rendered = value.render_text()?;
        out.push(' ');
        out.push_str(&escape_key(key));
        out.push_str("=\"");
        out.push_str(&escape_value(&rendered));
        out.push('"');
    }
    Ok(out)
}

fn escape_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Quoted values may not close their quotes or end the line
fn escape_value(value: &str) -> String {
    escape_message(&value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Keys keep only characters that cannot be mistaken for record syntax
fn escape_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect()
}
