//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A field value the text renderer cannot represent
    #[error("unsupported field value ({kind}): {message}")]
    UnsupportedValue { kind: String, message: String },

    /// Malformed alternating key/value input
    #[error("invalid key/value pairs: {0}")]
    InvalidPairs(String),

    /// Level name that is not part of the registry
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// File writer error with path
    #[error("File writer error for '{path}': {message}")]
    FileWriterError { path: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an unsupported value error
    pub fn unsupported_value(kind: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::UnsupportedValue {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create an invalid pairs error
    pub fn invalid_pairs<S: Into<String>>(msg: S) -> Self {
        LoggerError::InvalidPairs(msg.into())
    }

    /// Create a file writer error
    pub fn file_writer(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileWriterError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }
}

/// Error text kept after the original error value has been discarded.
///
/// `Scope::with_error` only stores the message of the error it is given, so
/// this is all that survives as the source of a [`ScopeError::Wrapped`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ErrorText(pub String);

/// Error value returned by `Scope::error`
///
/// Lets a call site log and return in one expression:
///
/// ```
/// use scopelog::prelude::*;
///
/// fn load(logger: &Logger) -> std::result::Result<(), ScopeError> {
///     Err(logger.with("path", "/etc/app.toml").error("config missing"))
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    /// No error was attached to the scope
    #[error("{0}")]
    Message(String),

    /// The scope carried an `error` field; the new message wraps it
    #[error("{message}: {source}")]
    Wrapped {
        message: String,
        #[source]
        source: ErrorText,
    },
}

impl ScopeError {
    /// The message passed to `Scope::error`, without the wrapped cause
    pub fn message(&self) -> &str {
        match self {
            ScopeError::Message(message) => message,
            ScopeError::Wrapped { message, .. } => message,
        }
    }

    /// Text of the error that was attached with `with_error`, if any
    pub fn cause(&self) -> Option<&str> {
        match self {
            ScopeError::Message(_) => None,
            ScopeError::Wrapped { source, .. } => Some(&source.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::unsupported_value("complex", "complex128 is not supported");
        assert!(matches!(err, LoggerError::UnsupportedValue { .. }));

        let err = LoggerError::invalid_pairs("odd number of arguments");
        assert!(matches!(err, LoggerError::InvalidPairs(_)));

        let err = LoggerError::file_writer("/var/log/app.log", "Permission denied");
        assert!(matches!(err, LoggerError::FileWriterError { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::unsupported_value("channel", "cannot encode channel");
        assert_eq!(
            err.to_string(),
            "unsupported field value (channel): cannot encode channel"
        );

        let err = LoggerError::InvalidLevel("bogus".to_string());
        assert_eq!(err.to_string(), "Invalid log level: 'bogus'");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("flushing log buffer", "cannot write to sink", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("flushing log buffer"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_scope_error_wrapping() {
        let plain = ScopeError::Message("failed: bad input".to_string());
        assert_eq!(plain.to_string(), "failed: bad input");
        assert!(plain.cause().is_none());
        assert!(plain.source().is_none());

        let wrapped = ScopeError::Wrapped {
            message: "saving user".to_string(),
            source: ErrorText("disk full".to_string()),
        };
        assert_eq!(wrapped.to_string(), "saving user: disk full");
        assert_eq!(wrapped.message(), "saving user");
        assert_eq!(wrapped.cause(), Some("disk full"));
        assert_eq!(wrapped.source().map(|s| s.to_string()), Some("disk full".to_string()));
    }
}
