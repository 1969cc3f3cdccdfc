//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    #[default]
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl LogLevel {
    /// All levels in ascending severity.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Parse a level, falling back to `Debug` when nothing matches.
    ///
    /// Matching is case-insensitive against the canonical labels. A typo in
    /// configuration never prevents the logger from starting; it just logs
    /// everything.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_structured_logger::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse_or_default("warn"), LogLevel::Warn);
    /// assert_eq!(LogLevel::parse_or_default("bogus"), LogLevel::Debug);
    /// ```
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Map a numeric ordinal to a level, resetting out-of-range values to `Debug`.
    pub fn from_ordinal(ordinal: u8) -> Self {
        Self::ALL
            .get(usize::from(ordinal))
            .copied()
            .unwrap_or_default()
    }

    #[inline]
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.to_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid log level: '{}'", s))
    }
}
