//! Shared logger configuration
//!
//! A [`LoggerConfig`] owns the sink, the output format and the minimum level.
//! Readers take one immutable [`ConfigSnapshot`] per emission; setters build a
//! new snapshot and swap it in, so a record is never rendered with half of an
//! update applied.

use super::{
    error::{LoggerError, Result},
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
    output_format::OutputFormat,
    sink::Sink,
    timestamp::TimestampFormat,
};
use crate::sinks::ConsoleSink;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::{Arc, OnceLock};

type SharedSink = Arc<Mutex<Box<dyn Sink>>>;

static GLOBAL_CONFIG: OnceLock<LoggerConfig> = OnceLock::new();

/// Configuration values in effect for one emission
#[derive(Clone)]
pub struct ConfigSnapshot {
    sink: SharedSink,
    sink_name: String,
    pub format: OutputFormat,
    pub min_level: LogLevel,
    pub timestamp_format: TimestampFormat,
}

impl ConfigSnapshot {
    fn new(sink: Box<dyn Sink>) -> Self {
        Self {
            sink_name: sink.name().to_string(),
            sink: Arc::new(Mutex::new(sink)),
            format: OutputFormat::default(),
            min_level: LogLevel::default(),
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Level gate. Fatal always passes.
    #[inline]
    pub fn allows(&self, level: LogLevel) -> bool {
        level == LogLevel::Fatal || level >= self.min_level
    }

    pub fn sink_name(&self) -> &str {
        &self.sink_name
    }
}

impl fmt::Debug for ConfigSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigSnapshot")
            .field("sink", &self.sink_name)
            .field("format", &self.format)
            .field("min_level", &self.min_level)
            .field("timestamp_format", &self.timestamp_format)
            .finish()
    }
}

/// Cloneable handle to a shared configuration.
///
/// Clones observe each other's updates. Updates only affect emissions that
/// start after the setter returns.
///
/// # Example
///
/// ```
/// use rust_structured_logger::prelude::*;
///
/// let config = LoggerConfig::new();
/// config.set_log_level(LogLevel::Warn);
/// config.set_log_format(OutputFormat::Structured);
///
/// assert_eq!(config.min_level(), LogLevel::Warn);
/// assert_eq!(config.format(), OutputFormat::Structured);
/// ```
#[derive(Clone)]
pub struct LoggerConfig {
    current: Arc<RwLock<Arc<ConfigSnapshot>>>,
    metrics: Arc<LoggerMetrics>,
}

impl LoggerConfig {
    /// Stdout sink, inline format, Debug minimum level
    #[must_use]
    pub fn new() -> Self {
        Self::from_snapshot(ConfigSnapshot::new(Box::new(ConsoleSink::new())))
    }

    fn from_snapshot(snapshot: ConfigSnapshot) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(snapshot))),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    #[must_use]
    pub fn builder() -> LoggerConfigBuilder {
        LoggerConfigBuilder::new()
    }

    /// Process-wide configuration used by [`Logger::new`](super::Logger::new)
    pub fn global() -> &'static LoggerConfig {
        GLOBAL_CONFIG.get_or_init(LoggerConfig::new)
    }

    /// Current configuration values
    pub fn snapshot(&self) -> Arc<ConfigSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Apply `apply` to a copy of the current snapshot and swap it in,
    /// returning the snapshot it replaced.
    fn update(&self, apply: impl FnOnce(&mut ConfigSnapshot)) -> Arc<ConfigSnapshot> {
        let mut current = self.current.write();
        let mut next = ConfigSnapshot::clone(&current);
        apply(&mut next);
        std::mem::replace(&mut *current, Arc::new(next))
    }

    /// Replace the sink. The previous sink is flushed before this returns.
    pub fn set_output<S: Sink + 'static>(&self, sink: S) {
        self.set_boxed_output(Box::new(sink));
    }

    pub fn set_boxed_output(&self, sink: Box<dyn Sink>) {
        let previous = self.update(|snapshot| {
            snapshot.sink_name = sink.name().to_string();
            snapshot.sink = Arc::new(Mutex::new(sink));
        });
        let flushed = previous.sink.lock().flush();
        if let Err(e) = flushed {
            self.report_write_failure(&previous, e);
        }
    }

    pub fn set_log_format(&self, format: OutputFormat) {
        self.update(|snapshot| snapshot.format = format);
    }

    pub fn set_log_level(&self, level: LogLevel) {
        self.update(|snapshot| snapshot.min_level = level);
    }

    /// Set the minimum level from a numeric ordinal; out-of-range values reset to Debug
    pub fn set_log_level_ordinal(&self, ordinal: u8) {
        self.set_log_level(LogLevel::from_ordinal(ordinal));
    }

    pub fn set_timestamp_format(&self, format: TimestampFormat) {
        self.update(|snapshot| snapshot.timestamp_format = format);
    }

    pub fn format(&self) -> OutputFormat {
        self.current.read().format
    }

    pub fn min_level(&self) -> LogLevel {
        self.current.read().min_level
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.current.read().allows(level)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        let snapshot = self.snapshot();
        let mut sink = snapshot.sink.lock();
        sink.flush()
    }

    /// Gate, stamp, render and write one record.
    ///
    /// Returns `true` when the record passed the gate. Sink errors are counted
    /// and reported on stderr, never returned.
    ///
    /// # Panics
    ///
    /// Panics if the record cannot be rendered. A record that cannot be
    /// encoded is a programming error and is not silently dropped.
    pub(crate) fn emit(&self, level: LogLevel, record: &LogRecord, message: String) -> bool {
        let snapshot = self.snapshot();
        if !snapshot.allows(level) {
            self.metrics.record_suppressed();
            return false;
        }

        let finalized = record.finalize(snapshot.timestamp_format.now(), level, message);
        let line = match snapshot.format.render(&finalized) {
            Ok(line) => line,
            Err(e) => panic!(
                "[LOGGER CRITICAL] Failed to render {} record: {}",
                snapshot.format, e
            ),
        };

        let result = {
            let mut sink = snapshot.sink.lock();
            write_line(&mut **sink, &line, level == LogLevel::Fatal)
        };

        match result {
            Ok(()) => self.metrics.record_emitted(),
            Err(e) => self.report_write_failure(&snapshot, e),
        }
        true
    }

    /// Report the first failure and every thousandth one after it
    fn report_write_failure(&self, snapshot: &ConfigSnapshot, error: LoggerError) {
        let previous = self.metrics.record_write_failure();
        if previous == 0 || (previous + 1) % 1000 == 0 {
            let err = LoggerError::sink(snapshot.sink_name(), error.to_string());
            eprintln!("[LOGGER ERROR] {} ({} failed writes)", err, previous + 1);
        }
    }
}

fn write_line(sink: &mut dyn Sink, line: &str, flush: bool) -> Result<()> {
    sink.write_line(line)?;
    if flush {
        sink.flush()?;
    }
    Ok(())
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("current", &self.snapshot())
            .field("metrics", &self.metrics)
            .finish()
    }
}

/// Builder for constructing a [`LoggerConfig`] with a fluent API
///
/// # Example
/// ```
/// use rust_structured_logger::prelude::*;
///
/// let config = LoggerConfig::builder()
///     .min_level_str("info")
///     .format_str("json")
///     .sink(MemorySink::new())
///     .build();
///
/// assert_eq!(config.min_level(), LogLevel::Info);
/// assert_eq!(config.format(), OutputFormat::Structured);
/// ```
pub struct LoggerConfigBuilder {
    sink: Option<Box<dyn Sink>>,
    format: OutputFormat,
    min_level: LogLevel,
    timestamp_format: TimestampFormat,
}

impl LoggerConfigBuilder {
    pub fn new() -> Self {
        Self {
            sink: None,
            format: OutputFormat::default(),
            min_level: LogLevel::default(),
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the format by name, falling back to `Inline` for unknown names
    #[must_use = "builder methods return a new value"]
    pub fn format_str(self, format: &str) -> Self {
        self.format(OutputFormat::parse_or_default(format))
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the minimum level by name, falling back to `Debug` for unknown names
    #[must_use = "builder methods return a new value"]
    pub fn min_level_str(self, level: &str) -> Self {
        self.min_level(LogLevel::parse_or_default(level))
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn build(self) -> LoggerConfig {
        let sink = self
            .sink
            .unwrap_or_else(|| Box::new(ConsoleSink::new()));

        let mut snapshot = ConfigSnapshot::new(sink);
        snapshot.format = self.format;
        snapshot.min_level = self.min_level;
        snapshot.timestamp_format = self.timestamp_format;

        LoggerConfig::from_snapshot(snapshot)
    }
}

impl Default for LoggerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace the sink of the process-wide configuration
pub fn set_output<S: Sink + 'static>(sink: S) {
    LoggerConfig::global().set_output(sink);
}

/// Set the output format of the process-wide configuration
pub fn set_log_format(format: OutputFormat) {
    LoggerConfig::global().set_log_format(format);
}

/// Set the minimum level of the process-wide configuration
pub fn set_log_level(level: LogLevel) {
    LoggerConfig::global().set_log_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Caller;
    use crate::sinks::MemorySink;

    fn memory_config(level: LogLevel) -> (LoggerConfig, MemorySink) {
        let sink = MemorySink::new();
        let config = LoggerConfig::builder()
            .sink(sink.clone())
            .min_level(level)
            .build();
        (config, sink)
    }

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::new();
        assert_eq!(config.format(), OutputFormat::Inline);
        assert_eq!(config.min_level(), LogLevel::Debug);
        assert_eq!(config.snapshot().sink_name(), "stdout");
        assert_eq!(config.snapshot().timestamp_format, TimestampFormat::Rfc3339);
    }

    #[test]
    fn test_setters() {
        let config = LoggerConfig::new();
        for level in LogLevel::ALL {
            config.set_log_level(level);
            assert_eq!(config.min_level(), level);
        }

        config.set_log_format(OutputFormat::Structured);
        assert_eq!(config.format(), OutputFormat::Structured);

        config.set_output(MemorySink::new());
        assert_eq!(config.snapshot().sink_name(), "memory");
    }

    #[test]
    fn test_out_of_range_ordinal_resets_to_debug() {
        let config = LoggerConfig::new();
        config.set_log_level(LogLevel::Error);
        config.set_log_level_ordinal(2);
        assert_eq!(config.min_level(), LogLevel::Warn);

        config.set_log_level_ordinal(9);
        assert_eq!(config.min_level(), LogLevel::Debug);
    }

    #[test]
    fn test_clones_share_state() {
        let config = LoggerConfig::new();
        let clone = config.clone();
        clone.set_log_level(LogLevel::Error);
        assert_eq!(config.min_level(), LogLevel::Error);
    }

    #[test]
    fn test_snapshot_is_stable_across_updates() {
        let config = LoggerConfig::new();
        let before = config.snapshot();
        config.set_log_format(OutputFormat::Structured);

        assert_eq!(before.format, OutputFormat::Inline);
        assert_eq!(config.snapshot().format, OutputFormat::Structured);
    }

    #[test]
    fn test_gate() {
        let (config, sink) = memory_config(LogLevel::Warn);
        let record = LogRecord::new(Caller::new().function("f"));

        assert!(!config.emit(LogLevel::Debug, &record, "d".to_string()));
        assert!(!config.emit(LogLevel::Info, &record, "i".to_string()));
        assert!(config.emit(LogLevel::Warn, &record, "w".to_string()));
        assert!(config.emit(LogLevel::Error, &record, "e".to_string()));

        assert_eq!(sink.len(), 2);
        assert_eq!(config.metrics().suppressed(), 2);
        assert_eq!(config.metrics().emitted(), 2);
    }

    #[test]
    fn test_fatal_bypasses_gate() {
        let snapshot = ConfigSnapshot {
            min_level: LogLevel::Fatal,
            ..ConfigSnapshot::new(Box::new(MemorySink::new()))
        };
        assert!(snapshot.allows(LogLevel::Fatal));
        assert!(!snapshot.allows(LogLevel::Error));
    }

    #[test]
    fn test_builder_permissive_strings() {
        let config = LoggerConfig::builder()
            .min_level_str("nope")
            .format_str("xml")
            .build();
        assert_eq!(config.min_level(), LogLevel::Debug);
        assert_eq!(config.format(), OutputFormat::Inline);
    }

    struct CountingSink {
        flushes: Arc<std::sync::atomic::AtomicUsize>,
    }

    impl Sink for CountingSink {
        fn write_line(&mut self, _line: &str) -> Result<()> {
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.flushes
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn test_replaced_sink_flushed_exactly_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let counters: Vec<Arc<AtomicUsize>> =
            (0..9).map(|_| Arc::new(AtomicUsize::new(0))).collect();
        let config = LoggerConfig::builder()
            .sink(CountingSink {
                flushes: Arc::clone(&counters[0]),
            })
            .build();

        std::thread::scope(|scope| {
            for counter in &counters[1..] {
                let config = &config;
                scope.spawn(move || {
                    config.set_output(CountingSink {
                        flushes: Arc::clone(counter),
                    });
                });
            }
        });

        let flushed: Vec<usize> = counters.iter().map(|c| c.load(Ordering::SeqCst)).collect();
        assert!(flushed.iter().all(|&n| n <= 1), "flush counts: {:?}", flushed);
        assert_eq!(flushed.iter().sum::<usize>(), counters.len() - 1);
    }

    #[test]
    fn test_write_failure_is_counted() {
        struct FailingSink;

        impl Sink for FailingSink {
            fn write_line(&mut self, _line: &str) -> Result<()> {
                Err(LoggerError::sink("failing", "simulated failure"))
            }

            fn flush(&mut self) -> Result<()> {
                Ok(())
            }

            fn name(&self) -> &str {
                "failing"
            }
        }

        let config = LoggerConfig::builder().sink(FailingSink).build();
        let record = LogRecord::default();
        for _ in 0..3 {
            assert!(config.emit(LogLevel::Info, &record, "lost".to_string()));
        }

        assert_eq!(config.metrics().write_failures(), 3);
        assert_eq!(config.metrics().emitted(), 0);
    }
}
