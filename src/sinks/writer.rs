//! Adapter from any byte stream to a sink

use crate::core::{Result, Sink};
use std::io::Write;

/// Wraps any [`Write`] implementation, such as a socket or a pipe.
///
/// # Example
///
/// ```
/// use rust_structured_logger::sinks::WriterSink;
/// use rust_structured_logger::Sink;
///
/// let mut sink = WriterSink::new(Vec::new());
/// sink.write_line("hello").unwrap();
/// assert_eq!(sink.into_inner(), b"hello\n");
/// ```
pub struct WriterSink<W> {
    writer: W,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            name: "writer".to_string(),
        }
    }

    /// Set the name reported in error messages
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        // One write per line keeps lines whole on writers shared outside the logger
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        self.writer.write_all(buf.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
