//! Call-site identity attached to every log record

use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin of a log statement.
///
/// Rendered as `service|package:receiver.function`, where each separator only
/// appears when the field before it and at least one field after it are set.
///
/// # Example
///
/// ```
/// use rust_structured_logger::Caller;
///
/// let caller = Caller::new()
///     .service("billing")
///     .package("invoices")
///     .function("issue");
///
/// assert_eq!(caller.render(), "billing|invoices:issue");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    #[serde(default, skip_serializing_if = "is_unset")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub package: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub receiver: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub function: Option<String>,
}

impl Caller {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = non_empty(service.into());
        self
    }

    #[must_use]
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = non_empty(package.into());
        self
    }

    #[must_use]
    pub fn receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = non_empty(receiver.into());
        self
    }

    #[must_use]
    pub fn function(mut self, function: impl Into<String>) -> Self {
        self.function = non_empty(function.into());
        self
    }

    /// Check whether no field is set
    pub fn is_empty(&self) -> bool {
        self.parts().iter().all(|(part, _)| part.is_empty())
    }

    /// Render the identity as a single delimited string.
    pub fn render(&self) -> String {
        let parts = self.parts();
        let mut out = String::new();

        for (idx, (part, separator)) in parts.iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            out.push_str(part);

            let has_more = parts[idx + 1..].iter().any(|(rest, _)| !rest.is_empty());
            if has_more {
                if let Some(separator) = separator {
                    out.push(*separator);
                }
            }
        }

        out
    }

    /// Fields in render order with the separator that may follow each one.
    fn parts(&self) -> [(&str, Option<char>); 4] {
        [
            (self.service.as_deref().unwrap_or_default(), Some('|')),
            (self.package.as_deref().unwrap_or_default(), Some(':')),
            (self.receiver.as_deref().unwrap_or_default(), Some('.')),
            (self.function.as_deref().unwrap_or_default(), None),
        ]
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// `None` and empty strings are both treated as unset.
pub(crate) fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
