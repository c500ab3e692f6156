//! Log record and severity level types.
//!
//! A [`LogRecord`] is constructed once, at the moment the diagnostic call is
//! intercepted, and is never mutated afterwards. The timestamp is therefore
//! the time of the original call, not the time the record eventually reaches
//! the remote sink.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Severity of an intercepted diagnostic call.
///
/// This is a closed enumeration: the interception layer exposes one entry
/// point per variant and nothing else. `Trace` and `Debug` share the lowest
/// severity bucket but serialize to distinct names so the sink can tell them
/// apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Log,
    Warn,
    Error,
}

impl LogLevel {
    /// Right-padded label used in the local echo line.
    ///
    /// Padding keeps the message column aligned across levels.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO ",
            LogLevel::Log => "LOG  ",
            LogLevel::Warn => "WARN ",
            LogLevel::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label().trim_end())
    }
}

/// A single intercepted diagnostic message, queued until the remote sink
/// accepts it.
///
/// The queue treats `message` and `data` as opaque; neither is parsed or
/// rewritten between construction and delivery.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub message: String,
    pub level: LogLevel,
    /// Optional structured payload attached by the caller. Arbitrarily
    /// shaped; forwarded verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Captured when the record is constructed, not when it is drained.
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    /// Builds a record stamped with the current time.
    #[must_use]
    pub fn new(message: String, level: LogLevel, data: Option<serde_json::Value>) -> Self {
        LogRecord {
            message,
            level,
            data,
            timestamp: Utc::now(),
        }
    }
}
