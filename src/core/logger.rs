//! Chainable logger
//!
//! A [`Logger`] is a value: every `with_*` call returns a new logger and leaves
//! the receiver untouched, so a base logger can be shared across threads and
//! extended independently by each of them.

use super::{
    caller::{non_empty, Caller},
    config::LoggerConfig,
    field_value::{DataMap, FieldValue},
    log_level::LogLevel,
    log_record::LogRecord,
};
use std::fmt;
use std::process::ExitCode;

/// Exit status requested by a fatal record
pub const FATAL_EXIT_CODE: u8 = 1;

/// Immutable record builder bound to a configuration.
///
/// # Example
///
/// ```
/// use rust_structured_logger::prelude::*;
///
/// let sink = MemorySink::new();
/// let config = LoggerConfig::builder().sink(sink.clone()).build();
///
/// let base = Logger::with_config(Caller::new().package("orders").function("place"), config);
/// let request = base.with_request_id("req-42");
///
/// request.with_data("items", 3).info("order placed");
/// base.warn("no request context");
///
/// let lines = sink.lines();
/// assert!(lines[0].ends_with("INFO orders:place RequestID: req-42 | Data: {items: 3} | order placed"));
/// assert!(lines[1].ends_with("WARN orders:place no request context"));
/// ```
#[derive(Clone)]
pub struct Logger {
    record: LogRecord,
    config: LoggerConfig,
}

impl Logger {
    /// Create a logger bound to the process-wide configuration
    #[must_use]
    pub fn new(caller: Caller) -> Self {
        Self::with_config(caller, LoggerConfig::global().clone())
    }

    /// Create a logger bound to an explicit configuration
    #[must_use]
    pub fn with_config(caller: Caller, config: LoggerConfig) -> Self {
        Self {
            record: LogRecord::new(caller),
            config,
        }
    }

    pub fn caller(&self) -> &Caller {
        &self.record.caller
    }

    /// Fields accumulated so far; time, level and message are unset until emission
    pub fn record(&self) -> &LogRecord {
        &self.record
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    fn derive(&self, apply: impl FnOnce(&mut LogRecord)) -> Self {
        let mut next = self.clone();
        apply(&mut next.record);
        next
    }

    /// Attach an error's message
    #[must_use = "with_* methods return a new logger"]
    pub fn with_error(&self, err: impl fmt::Display) -> Self {
        self.derive(|record| record.error = non_empty(err.to_string()))
    }

    /// Set the request ID; an empty string clears it
    #[must_use = "with_* methods return a new logger"]
    pub fn with_request_id(&self, id: impl Into<String>) -> Self {
        self.derive(|record| record.request_id = non_empty(id.into()))
    }

    /// Set the trace ID; an empty string clears it
    #[must_use = "with_* methods return a new logger"]
    pub fn with_trace_id(&self, id: impl Into<String>) -> Self {
        self.derive(|record| record.trace_id = non_empty(id.into()))
    }

    /// Set the span ID; an empty string clears it
    #[must_use = "with_* methods return a new logger"]
    pub fn with_span_id(&self, id: impl Into<String>) -> Self {
        self.derive(|record| record.span_id = non_empty(id.into()))
    }

    /// Insert a data entry, replacing any previous value under `key`.
    ///
    /// The returned logger owns its own copy of the data map.
    #[must_use = "with_* methods return a new logger"]
    pub fn with_data(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.derive(|record| {
            record
                .data
                .get_or_insert_with(DataMap::new)
                .insert(key.into(), value.into());
        })
    }

    /// Check whether a record at `level` would pass the gate right now
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.config.is_enabled(level)
    }

    /// Emit at `level`. Returns `true` if the record passed the gate.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) -> bool {
        self.config.emit(level, &self.record, message.into())
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Emit a fatal record regardless of the minimum level.
    ///
    /// The line is written and the sink flushed before this returns. Ending
    /// the process is left to the caller through the returned [`FatalExit`].
    ///
    /// ```no_run
    /// use rust_structured_logger::prelude::*;
    ///
    /// let logger = Logger::new(Caller::new().function("main"));
    /// logger.fatal("cannot bind port").exit();
    /// ```
    pub fn fatal(&self, message: impl Into<String>) -> FatalExit {
        self.log(LogLevel::Fatal, message);
        FatalExit {
            code: FATAL_EXIT_CODE,
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

/// Termination request returned by [`Logger::fatal`]
#[must_use = "a fatal record requests process termination"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FatalExit {
    code: u8,
}

impl FatalExit {
    /// Exit status to terminate with
    pub fn code(&self) -> u8 {
        self.code
    }

    /// Terminate the process with the fatal exit status
    pub fn exit(self) -> ! {
        std::process::exit(i32::from(self.code))
    }
}

impl From<FatalExit> for ExitCode {
    fn from(fatal: FatalExit) -> Self {
        ExitCode::from(fatal.code)
    }
}
