//! Error types for the forwarding pipeline.

use thiserror::Error;

/// Failure of a single remote persist attempt.
///
/// The core does not distinguish transient from permanent failures: every
/// variant is absorbed by the drainer, reported through the local echo, and
/// the record is retried at the fixed backoff interval.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The request never completed (connection refused, timeout, TLS
    /// failure, proxy error).
    #[error("failed to reach log intake: {0}")]
    Transport(#[from] reqwest::Error),

    /// The intake answered with a non-success status.
    #[error("log intake returned unexpected status {0}")]
    UnexpectedStatus(reqwest::StatusCode),
}

/// Returned when process-wide interception is installed more than once.
///
/// Guarding against double installation keeps the original output channel
/// from ever being re-wrapped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallError {
    #[error("a global logger is already installed")]
    AlreadyInstalled,
}
