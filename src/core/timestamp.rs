//! Timestamp formatting utilities
//!
//! Every format here is RFC 3339, so records stay parseable by the same
//! consumer regardless of the precision a writer is configured with.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// RFC 3339 timestamp precision options
///
/// # Examples
///
/// ```
/// use scopelog::core::TimestampFormat;
/// use chrono::Utc;
///
/// let timestamp = TimestampFormat::Rfc3339.format(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Whole seconds: `2025-01-08T10:30:45Z`
    #[default]
    Rfc3339,

    /// Milliseconds: `2025-01-08T10:30:45.123Z`
    Rfc3339Millis,

    /// Microseconds: `2025-01-08T10:30:45.123456Z`
    ///
    /// Useful for ordering records written in the same second.
    Rfc3339Micros,
}

impl TimestampFormat {
    /// Format a timestamp, keeping its offset (`Z` for UTC)
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let precision = match self {
            TimestampFormat::Rfc3339 => SecondsFormat::Secs,
            TimestampFormat::Rfc3339Millis => SecondsFormat::Millis,
            TimestampFormat::Rfc3339Micros => SecondsFormat::Micros,
        };
        datetime.to_rfc3339_opts(precision, true)
    }

    /// Format the current wall-clock time
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Utc::now())
    }
}
