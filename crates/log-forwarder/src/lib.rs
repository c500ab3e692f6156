//! # Log Forwarder
//!
//! Process-wide diagnostic interception with queued, retried forwarding to
//! a remote log sink.
//!
//! ## Architecture
//!
//! ```text
//!   Application layer (HTTP handlers, converters, ...)
//!        │  record(message, level, data)
//!        v
//!   ┌──────────────┐   synchronous line   ┌───────────────┐
//!   │    Logger    │ ───────────────────> │ local echo    │
//!   └──────┬───────┘                      └───────────────┘
//!          │ channel send (append + wake)
//!          v
//!   ┌──────────────┐
//!   │   Drainer    │  (owns the FIFO queue, single-flight)
//!   └──────┬───────┘
//!          │ one record per step
//!          v
//!   ┌──────────────┐
//!   │     Sink     │  (HTTP POST to remote intake)
//!   └──────────────┘
//! ```
//!
//! A record is created on every intercepted call, echoed locally at once,
//! and queued until the sink accepts it. Persist failures are absorbed:
//! the record is requeued at the head and retried after a fixed backoff,
//! indefinitely. Nothing is ever dropped; an unreachable sink means
//! unbounded queue growth, which is a documented property of the design.
//!
//! ## Wiring
//!
//! ```rust,no_run
//! use log_forwarder::config::Config;
//! use log_forwarder::drainer::Drainer;
//! use log_forwarder::logger::{Echo, Logger};
//! use log_forwarder::sink::HttpSink;
//!
//! # #[tokio::main] async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new()?;
//! let echo = Echo::stdout();
//! let (drainer, handle) = Drainer::new(
//!     HttpSink::new(&config),
//!     echo.clone(),
//!     config.retry_backoff,
//!     config.drain_delay,
//! );
//! tokio::spawn(drainer.run());
//!
//! let logger = Logger::new(echo, handle);
//! log_forwarder::logger::install(logger)?;
//! # Ok(()) }
//! ```

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

/// Environment-driven configuration with documented defaults.
pub mod config;

/// Single-flight drain loop and its producer handle.
pub mod drainer;

/// Error types for the forwarding pipeline.
pub mod error;

/// Injected logging context, local echo, and the guarded global install.
pub mod logger;

/// FIFO buffer of records awaiting delivery.
pub mod queue;

/// Log record and severity level types.
pub mod record;

/// Remote persistence boundary and the HTTP intake implementation.
pub mod sink;

pub use error::{InstallError, SinkError};
pub use record::{LogLevel, LogRecord};
