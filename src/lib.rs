//! # Rust Structured Logger
//!
//! A structured logging core: immutable, chainable loggers that carry the call
//! site, correlation IDs, arbitrary data and an attached error, gated by a
//! minimum level and rendered as an inline line or a JSON object.
//!
//! ## Features
//!
//! - **Value semantics**: `with_*` calls never mutate the logger they are called on
//! - **Two formats**: fixed-order inline text or one JSON object per line
//! - **Thread safe**: configuration swaps are atomic and lines never interleave
//! - **Fail-open configuration**: unknown level or format names fall back to
//!   `Debug` and `Inline` instead of failing
//!
//! ```
//! use rust_structured_logger::prelude::*;
//!
//! let sink = MemorySink::new();
//! let config = LoggerConfig::builder()
//!     .sink(sink.clone())
//!     .format(OutputFormat::Structured)
//!     .min_level(LogLevel::Info)
//!     .build();
//!
//! let logger = Logger::with_config(Caller::new().service("api").function("handle"), config);
//! logger.with_trace_id("t-1").info("handled");
//! logger.debug("filtered out");
//!
//! let record = LogRecord::from_json(&sink.lines()[0]).unwrap();
//! assert_eq!(record.trace_id.as_deref(), Some("t-1"));
//! assert_eq!(sink.len(), 1);
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Caller, DataMap, FatalExit, FieldValue, LogLevel, LogRecord, Logger, LoggerConfig,
        LoggerConfigBuilder, LoggerError, LoggerMetrics, OutputFormat, Result, Sink,
        TimestampFormat,
    };
    pub use crate::sinks::{ConsoleSink, MemorySink, WriterSink};
    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
}

#[cfg(feature = "file")]
pub use crate::sinks::FileSink;
pub use crate::sinks::{ConsoleSink, MemorySink, WriterSink};
pub use crate::core::{
    set_log_format, set_log_level, set_output, Caller, ConfigSnapshot, DataMap, FatalExit,
    FieldValue, LogLevel, LogRecord, Logger, LoggerConfig, LoggerConfigBuilder, LoggerError,
    LoggerMetrics, OutputFormat, Result, Sink, TimestampFormat, FATAL_EXIT_CODE,
};
