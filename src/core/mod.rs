//! Core logger types and traits

pub mod caller;
pub mod config;
pub mod error;
pub mod field_value;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod sink;
pub mod timestamp;

pub use caller::Caller;
pub use config::{
    set_log_format, set_log_level, set_output, ConfigSnapshot, LoggerConfig, LoggerConfigBuilder,
};
pub use error::{LoggerError, Result};
pub use field_value::{DataMap, FieldValue};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use logger::{FatalExit, Logger, FATAL_EXIT_CODE};
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use sink::Sink;
pub use timestamp::TimestampFormat;
