//! Diagnostic interception layer.
//!
//! Instead of mutating process-global output functions, interception is an
//! explicitly injected [`Logger`] passed to every component that emits
//! diagnostics. The "original output channel" is the [`Echo`] writer the
//! logger holds: every `record` call writes a human-readable line to it
//! synchronously, before and regardless of any remote delivery, so local
//! operators always see output in real time even when the intake is
//! unreachable.
//!
//! A guarded process-wide registration is provided for callers that want
//! the old global ergonomics. The writer is captured once at construction;
//! [`install`] refuses a second logger, so the channel can never be
//! re-wrapped.

use std::io::Write;
use std::sync::{Arc, Mutex, OnceLock};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::drainer::DrainerHandle;
use crate::error::InstallError;
use crate::record::{LogLevel, LogRecord};

/// The local output channel, held explicitly instead of being rediscovered
/// through a global.
///
/// Cheap to clone; clones share the underlying writer. Write failures are
/// swallowed: a broken local pipe must never take down the caller.
#[derive(Clone)]
pub struct Echo {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Echo {
    /// Echo to the process's standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Echo::new(Box::new(std::io::stdout()))
    }

    /// Echo to an arbitrary writer. Tests use this to capture output.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Echo {
            out: Arc::new(Mutex::new(writer)),
        }
    }

    /// Writes one echo line: RFC 3339 timestamp, right-padded level label,
    /// message.
    pub fn line(&self, timestamp: DateTime<Utc>, level: LogLevel, message: &str) {
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        let ts = timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);
        if writeln!(out, "{ts} {} {message}", level.label()).is_err() {
            return;
        }
        let _ = out.flush();
    }
}

impl std::fmt::Debug for Echo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Echo").finish_non_exhaustive()
    }
}

/// Injected logging context: the only surface the application layer calls.
#[derive(Debug, Clone)]
pub struct Logger {
    echo: Echo,
    drainer: DrainerHandle,
}

impl Logger {
    #[must_use]
    pub fn new(echo: Echo, drainer: DrainerHandle) -> Self {
        Logger { echo, drainer }
    }

    /// Records one diagnostic message.
    ///
    /// Builds the record with the current time, echoes it locally, then
    /// hands it to the drainer. Never fails from the caller's perspective:
    /// remote delivery problems are the drainer's business and the echo has
    /// already happened by the time they can occur.
    pub fn record(
        &self,
        message: impl Into<String>,
        level: LogLevel,
        data: Option<serde_json::Value>,
    ) {
        let record = LogRecord::new(message.into(), level, data);
        self.echo.line(record.timestamp, record.level, &record.message);
        if self.drainer.enqueue(record).is_err() {
            // Drain task is gone; the local echo above is all we can do.
            debug!("log drainer unavailable, record not forwarded");
        }
    }

    pub fn trace(&self, message: impl Into<String>) {
        self.record(message, LogLevel::Trace, None);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.record(message, LogLevel::Debug, None);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.record(message, LogLevel::Info, None);
    }

    pub fn log(&self, message: impl Into<String>) {
        self.record(message, LogLevel::Log, None);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.record(message, LogLevel::Warn, None);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.record(message, LogLevel::Error, None);
    }

    /// The echo channel this logger writes to. The drainer reuses it to
    /// report persist failures.
    #[must_use]
    pub fn echo(&self) -> &Echo {
        &self.echo
    }
}

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Registers a process-wide logger.
///
/// May be called at most once for the lifetime of the process; a second
/// call returns [`InstallError::AlreadyInstalled`] and leaves the first
/// logger in place.
pub fn install(logger: Logger) -> Result<(), InstallError> {
    GLOBAL
        .set(logger)
        .map_err(|_| InstallError::AlreadyInstalled)
}

/// The process-wide logger, if one has been installed.
#[must_use]
pub fn global() -> Option<&'static Logger> {
    GLOBAL.get()
}
