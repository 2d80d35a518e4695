//! Logging macros for ergonomic log message formatting.
//!
//! These macros accept a [`Logger`](crate::Logger) or a [`Scope`](crate::Scope)
//! and format the message like `format!`.
//!
//! # Examples
//!
//! ```
//! use scopelog::prelude::*;
//! use scopelog::info;
//!
//! let logger = Logger::new();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // On a scope
//! let scope = logger.with("user_id", 42);
//! info!(scope, "User {} performed action: {}", 42, "login");
//! ```

/// Log a message at the given level with automatic formatting.
///
/// # Examples
///
/// ```
/// # use scopelog::prelude::*;
/// # let logger = Logger::new();
/// use scopelog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use scopelog::prelude::*;
/// # let logger = Logger::new();
/// # logger.set_min_level(LogLevel::Debug);
/// use scopelog::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(format!($($arg)+))
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use scopelog::prelude::*;
/// # let logger = Logger::new();
/// use scopelog::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(format!($($arg)+))
    };
}

/// Log an error-level message and evaluate to the resulting
/// [`ScopeError`](crate::ScopeError).
///
/// # Examples
///
/// ```
/// # use scopelog::prelude::*;
/// # let logger = Logger::new();
/// use scopelog::error;
/// let err = error!(logger, "failed: {}", "bad input");
/// assert_eq!(err.to_string(), "failed: bad input");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(format!($($arg)+))
    };
}

/// Build a [`Fields`](crate::Fields) map from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use scopelog::fields;
///
/// let fields = fields! { "user_id" => 123, "action" => "login" };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(
            fields.insert(::std::string::String::from($key), $crate::FieldValue::from($value));
        )+
        fields
    }};
}
