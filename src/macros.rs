//! Logging macros for ergonomic message formatting.
//!
//! Each macro takes a [`Logger`](crate::Logger) followed by `format!` arguments.
//!
//! # Examples
//!
//! ```
//! use rust_structured_logger::prelude::*;
//! use rust_structured_logger::info;
//!
//! let logger = Logger::with_config(
//!     Caller::new().function("serve"),
//!     LoggerConfig::builder().sink(MemorySink::new()).build(),
//! );
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// Evaluates to `true` if the record passed the level gate.
///
/// # Examples
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::with_config(Caller::new(), LoggerConfig::builder().sink(MemorySink::new()).build());
/// use rust_structured_logger::log;
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
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(format!($($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(format!($($arg)+))
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(format!($($arg)+))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(format!($($arg)+))
    };
}

/// Log a fatal-level message, evaluating to the [`FatalExit`](crate::FatalExit).
///
/// # Examples
///
/// ```no_run
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::new(Caller::new().function("main"));
/// use rust_structured_logger::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full").exit();
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(format!($($arg)+))
    };
}
