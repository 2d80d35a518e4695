//! Log level definitions and the minimum-level filter

use super::error::LoggerError;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Code returned by [`parse_level`] for names outside the registry
pub const INVALID_LEVEL: i32 = -1;

/// Name returned by [`level_name`] for codes outside the registry
pub const UNKNOWN_LEVEL_NAME: &str = "UNKNOWN";

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Error = 2,
}

impl LogLevel {
    pub const ALL: [LogLevel; 3] = [LogLevel::Debug, LogLevel::Info, LogLevel::Error];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
        }
    }

    /// Numeric code used on the writer interface
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(LogLevel::Debug),
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// Case-insensitive lookup; `None` for empty or unknown names
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "DEBUG" => Some(LogLevel::Debug),
            "INFO" => Some(LogLevel::Info),
            "ERROR" => Some(LogLevel::Error),
            _ => None,
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Error => Red,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::parse(s).ok_or_else(|| LoggerError::InvalidLevel(s.to_string()))
    }
}

/// Convert a level name to its code, or [`INVALID_LEVEL`]
pub fn parse_level(name: &str) -> i32 {
    LogLevel::parse(name).map_or(INVALID_LEVEL, LogLevel::code)
}

/// Convert a level code to its name, or `"UNKNOWN"`
pub fn level_name(code: i32) -> &'static str {
    LogLevel::from_code(code).map_or(UNKNOWN_LEVEL_NAME, |level| level.to_str())
}

/// Minimum-level gate shared by a logger and every scope it creates
///
/// Changes are visible to subsequent checks on any thread; there is no
/// stronger ordering guarantee than that.
#[derive(Debug)]
pub struct LevelFilter {
    minimum: RwLock<LogLevel>,
}

impl LevelFilter {
    pub fn new(minimum: LogLevel) -> Self {
        Self {
            minimum: RwLock::new(minimum),
        }
    }

    pub fn minimum(&self) -> LogLevel {
        *self.minimum.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.minimum.write() = level;
    }

    /// Update the minimum from a raw code.
    ///
    /// Unknown codes are ignored and `false` is returned.
    pub fn set_minimum(&self, code: i32) -> bool {
        match LogLevel::from_code(code) {
            Some(level) => {
                self.set_level(level);
                true
            }
            None => false,
        }
    }

    pub fn should_emit(&self, code: i32) -> bool {
        match LogLevel::from_code(code) {
            Some(level) => level >= self.minimum(),
            None => false,
        }
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.minimum()
    }
}

impl Default for LevelFilter {
    fn default() -> Self {
        Self::new(LogLevel::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_codes() {
        assert_eq!(LogLevel::Debug.code(), 0);
        assert_eq!(LogLevel::Info.code(), 1);
        assert_eq!(LogLevel::Error.code(), 2);
        assert!(LogLevel::Debug < LogLevel::Info && LogLevel::Info < LogLevel::Error);
    }

    #[test]
    fn test_parse_level() {
        let cases = [
            ("debug", LogLevel::Debug.code()),
            ("INFO", LogLevel::Info.code()),
            ("Error", LogLevel::Error.code()),
            ("invalid", INVALID_LEVEL),
            ("", INVALID_LEVEL),
        ];

        for (input, expected) in cases {
            assert_eq!(parse_level(input), expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("dEbUg".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!(matches!(
            "warn".parse::<LogLevel>(),
            Err(LoggerError::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_level_name() {
        assert_eq!(level_name(0), "DEBUG");
        assert_eq!(level_name(1), "INFO");
        assert_eq!(level_name(2), "ERROR");
        assert_eq!(level_name(999), "UNKNOWN");
        assert_eq!(level_name(-1), "UNKNOWN");
    }

    #[test]
    fn test_set_minimum() {
        let filter = LevelFilter::default();
        assert_eq!(filter.minimum(), LogLevel::Info);

        assert!(filter.set_minimum(LogLevel::Debug.code()));
        assert_eq!(filter.minimum(), LogLevel::Debug);

        assert!(filter.set_minimum(LogLevel::Error.code()));
        assert_eq!(filter.minimum(), LogLevel::Error);

        assert!(!filter.set_minimum(999));
        assert_eq!(filter.minimum(), LogLevel::Error);

        assert!(!filter.set_minimum(-3));
        assert_eq!(filter.minimum(), LogLevel::Error);
    }

    #[test]
    fn test_should_emit() {
        let cases = [
            (LogLevel::Debug, 0, true),
            (LogLevel::Info, 0, false),
            (LogLevel::Debug, 1, true),
            (LogLevel::Info, 2, true),
            (LogLevel::Debug, 999, false),
            (LogLevel::Debug, -1, false),
        ];

        for (minimum, code, expected) in cases {
            let filter = LevelFilter::new(minimum);
            assert_eq!(
                filter.should_emit(code),
                expected,
                "minimum {} code {}",
                minimum,
                code
            );
        }
    }
}
