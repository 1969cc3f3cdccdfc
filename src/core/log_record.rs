//! Log record accumulated by a [`Logger`](super::Logger) chain

use super::caller::{is_unset, Caller};
use super::field_value::DataMap;
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};

/// A single log line before rendering.
///
/// The serialized field names form the structured wire schema. Every optional
/// field is omitted when unset, and the caller's fields are flattened into the
/// same object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(flatten)]
    pub caller: Caller,

    /// Emission time, already formatted
    #[serde(default, skip_serializing_if = "is_unset")]
    pub time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    #[serde(default, skip_serializing_if = "is_unset")]
    pub error: Option<String>,

    #[serde(rename = "requestID", default, skip_serializing_if = "is_unset")]
    pub request_id: Option<String>,

    #[serde(rename = "traceID", default, skip_serializing_if = "is_unset")]
    pub trace_id: Option<String>,

    #[serde(rename = "spanID", default, skip_serializing_if = "is_unset")]
    pub span_id: Option<String>,

    #[serde(default, skip_serializing_if = "data_is_empty")]
    pub data: Option<DataMap>,
}

impl LogRecord {
    pub fn new(caller: Caller) -> Self {
        Self {
            caller,
            ..Self::default()
        }
    }

    /// Parse a record back from its structured rendering
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Finalize a copy of this record for emission
    #[must_use]
    pub(crate) fn finalize(&self, time: String, level: LogLevel, message: String) -> Self {
        Self {
            time: Some(time),
            level: Some(level),
            message,
            ..self.clone()
        }
    }
}

fn data_is_empty(data: &Option<DataMap>) -> bool {
    data.as_ref().map_or(true, DataMap::is_empty)
}
