//! Stress tests for concurrent use
//!
//! These tests verify:
//! - Chains built off a shared base logger never see each other's fields
//! - Lines are never interleaved, even on a writer that accepts one byte per call
//! - Configuration can be swapped while other threads are emitting

use parking_lot::Mutex;
use rust_structured_logger::prelude::*;
use std::io::Write;
use std::sync::Arc;
use std::thread;

const THREADS: usize = 16;
const PER_THREAD: usize = 50;

fn structured(sink: &MemorySink) -> LoggerConfig {
    LoggerConfig::builder()
        .sink(sink.clone())
        .format(OutputFormat::Structured)
        .build()
}

#[test]
fn test_shared_base_no_cross_contamination() {
    let sink = MemorySink::new();
    let base = Logger::with_config(Caller::new().service("stress"), structured(&sink))
        .with_data("base", true);

    thread::scope(|scope| {
        for t in 0..THREADS {
            let base = &base;
            scope.spawn(move || {
                for i in 0..PER_THREAD {
                    base.with_data(format!("key_{}", t), i)
                        .with_request_id(format!("req-{}-{}", t, i))
                        .info(format!("thread {}", t));
                }
            });
        }
    });

    let lines = sink.lines();
    assert_eq!(lines.len(), THREADS * PER_THREAD);

    for line in &lines {
        let record = LogRecord::from_json(line).expect("valid JSON line");
        let thread_id: usize = record
            .message
            .trim_start_matches("thread ")
            .parse()
            .expect("thread number in message");

        let data = record.data.expect("data present");
        assert_eq!(data.len(), 2, "unexpected data in {}", line);
        assert_eq!(data["base"], FieldValue::Bool(true));

        let own_key = format!("key_{}", thread_id);
        let FieldValue::Int(i) = &data[own_key.as_str()] else {
            panic!("missing own key in {}", line);
        };
        assert_eq!(
            record.request_id.as_deref(),
            Some(format!("req-{}-{}", thread_id, i).as_str())
        );
    }

    assert!(base.record().request_id.is_none());
    assert_eq!(base.record().data.as_ref().map(|d| d.len()), Some(1));
}

#[test]
fn test_sibling_chains_from_shared_parent() {
    let sink = MemorySink::new();
    let parent = Logger::with_config(Caller::new().function("parent"), structured(&sink))
        .with_trace_id("shared-trace");

    thread::scope(|scope| {
        for t in 0..THREADS {
            let parent = &parent;
            scope.spawn(move || {
                let child = parent.with_span_id(format!("span-{}", t));
                for i in 0..PER_THREAD {
                    child.with_data("i", i).debug("tick");
                }
            });
        }
    });

    let mut per_span = std::collections::HashMap::new();
    for line in sink.lines() {
        let record = LogRecord::from_json(&line).expect("valid JSON line");
        assert_eq!(record.trace_id.as_deref(), Some("shared-trace"));
        assert_eq!(record.data.as_ref().map(|d| d.len()), Some(1));
        *per_span.entry(record.span_id.expect("span set")).or_insert(0) += 1;
    }

    assert_eq!(per_span.len(), THREADS);
    assert!(per_span.values().all(|count| *count == PER_THREAD));
}

/// Accepts a single byte per write call, so unguarded writers would interleave
#[derive(Clone, Default)]
struct TrickleWriter {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl Write for TrickleWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match buf.first() {
            Some(byte) => {
                self.bytes.lock().push(*byte);
                thread::yield_now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_lines_never_interleave() {
    let writer = TrickleWriter::default();
    let config = LoggerConfig::builder()
        .sink(WriterSink::new(writer.clone()))
        .timestamp_format(TimestampFormat::Custom("T".to_string()))
        .build();
    let logger = Logger::with_config(Caller::new().function("w"), config);

    thread::scope(|scope| {
        for t in 0..8 {
            let logger = &logger;
            scope.spawn(move || {
                for _ in 0..20 {
                    logger.with_data("t", t).info("payload-payload-payload");
                }
            });
        }
    });

    let bytes = writer.bytes.lock().clone();
    let content = String::from_utf8(bytes).expect("utf8 output");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 160);

    for line in lines {
        assert!(line.starts_with("T INFO w Data: {t: "), "torn line: {:?}", line);
        assert!(line.ends_with("} | payload-payload-payload"), "torn line: {:?}", line);
    }
}

#[test]
fn test_config_swaps_during_emission() {
    let sink = MemorySink::new();
    let config = LoggerConfig::builder().sink(sink.clone()).build();
    let logger = Logger::with_config(Caller::new().function("swap"), config.clone());

    thread::scope(|scope| {
        for _ in 0..4 {
            let logger = &logger;
            scope.spawn(move || {
                for i in 0..200 {
                    logger.with_data("i", i).error("swapping");
                }
            });
        }

        scope.spawn(|| {
            for i in 0..200 {
                let format = if i % 2 == 0 {
                    OutputFormat::Structured
                } else {
                    OutputFormat::Inline
                };
                config.set_log_format(format);
                config.set_log_level(LogLevel::from_ordinal((i % 4) as u8));
            }
        });
    });

    let lines = sink.lines();
    assert_eq!(lines.len(), 800, "Error passes every gate set by the writer thread");
    for line in lines {
        if line.starts_with('{') {
            let record = LogRecord::from_json(&line).expect("whole JSON line");
            assert_eq!(record.message, "swapping");
        } else {
            assert!(line.ends_with(" | swapping"), "torn inline line: {:?}", line);
        }
    }
}
