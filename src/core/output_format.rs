//! Output format configuration for log records
//!
//! Provides the two renderings of a finalized record:
//! - Inline: fixed-order human-readable line (default)
//! - Structured: one JSON object per line

use super::error::Result;
use super::field_value::write_map;
use super::log_record::LogRecord;
use std::fmt;
use std::str::FromStr;

/// Output format for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Human-readable single line (default)
    ///
    /// Example: `2025-01-08T10:30:45Z INFO api|http:Server.serve RequestID: r-1 | Request processed`
    #[default]
    Inline,

    /// JSON object per line
    ///
    /// Example: `{"service":"api","time":"2025-01-08T10:30:45Z","level":"INFO","message":"Request processed"}`
    Structured,
}

impl OutputFormat {
    pub fn to_str(&self) -> &'static str {
        match self {
            OutputFormat::Inline => "inline",
            OutputFormat::Structured => "structured",
        }
    }

    /// Parse a format name, falling back to `Inline` when nothing matches.
    ///
    /// Accepts `inline`/`inline-string` and `structured`/`json`, case-insensitively.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Render a finalized record as one line, without the trailing newline
    pub fn render(&self, record: &LogRecord) -> Result<String> {
        match self {
            OutputFormat::Inline => Ok(render_inline(record)),
            OutputFormat::Structured => Ok(serde_json::to_string(record)?),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inline" | "inline-string" => Ok(OutputFormat::Inline),
            "structured" | "json" => Ok(OutputFormat::Structured),
            _ => Err(format!("Invalid output format: '{}'", s)),
        }
    }
}

/// `<time> <LEVEL> <caller>[ RequestID: x |][ TraceID: x |][ SpanID: x |][ Data: {..} |][ Error: x |] <message>`
fn render_inline(record: &LogRecord) -> String {
    use fmt::Write;

    let mut out = format!(
        "{} {} {}",
        sanitize(record.time.as_deref().unwrap_or_default()),
        record.level.map(|level| level.to_str()).unwrap_or_default(),
        sanitize(&record.caller.render())
    );

    let clauses = [
        ("RequestID", &record.request_id),
        ("TraceID", &record.trace_id),
        ("SpanID", &record.span_id),
    ];
    for (label, value) in clauses {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            let _ = write!(out, " {}: {} |", label, sanitize(value));
        }
    }

    if let Some(data) = record.data.as_ref().filter(|d| !d.is_empty()) {
        out.push_str(" Data: ");
        let mut rendered = String::new();
        let _ = write_map(&mut rendered, data);
        out.push_str(&sanitize(&rendered));
        out.push_str(" |");
    }

    if let Some(error) = record.error.as_deref().filter(|e| !e.is_empty()) {
        let _ = write!(out, " Error: {} |", sanitize(error));
    }

    out.push(' ');
    out.push_str(&sanitize(&record.message));
    out
}

/// Escape line breaks and tabs so one record always stays on one line
fn sanitize(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
