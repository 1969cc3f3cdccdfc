//! Sink trait for rendered log lines

use super::error::Result;

/// Destination for rendered lines.
///
/// Each call receives one complete line without its trailing newline. The
/// logger serializes calls through its own mutex, so implementations do not
/// need internal locking.
pub trait Sink: Send {
    fn write_line(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
