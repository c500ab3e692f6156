//! Environment-driven configuration.
//!
//! The retry backoff and the absence of a retry ceiling are deliberate,
//! documented configuration rather than hidden constants: an unreachable
//! intake causes indefinite retries and unbounded queue growth, which is an
//! accepted property of this design.

use std::env;
use std::time::Duration;

/// Fixed delay before retrying after a failed persist, in seconds.
const DEFAULT_RETRY_BACKOFF_SECS: u64 = 30;
/// Delay between successful drain steps, in milliseconds. Zero still yields
/// back to the scheduler between steps.
const DEFAULT_DRAIN_DELAY_MS: u64 = 0;
/// Per-request timeout for the sink call, in seconds.
const DEFAULT_FLUSH_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    /// Remote log intake endpoint. Records are POSTed here as JSON.
    pub intake_url: String,
    /// Fixed backoff between retries of a failed record. No exponential
    /// growth and no retry ceiling.
    pub retry_backoff: Duration,
    /// Pause between successful drain steps.
    pub drain_delay: Duration,
    /// Timeout for each individual persist request.
    pub flush_timeout: Duration,
}

impl Config {
    /// Builds a config from the environment.
    ///
    /// `LOGS_INTAKE_URL` is required; `LOGS_RETRY_BACKOFF_SECS`,
    /// `LOGS_DRAIN_DELAY_MS` and `LOGS_FLUSH_TIMEOUT_SECS` fall back to
    /// their defaults when unset or unparseable.
    pub fn new() -> Result<Config, Box<dyn std::error::Error>> {
        let intake_url = env::var("LOGS_INTAKE_URL")
            .map_err(|_| anyhow::anyhow!("LOGS_INTAKE_URL environment variable is not set"))?;

        let retry_backoff_secs = env::var("LOGS_RETRY_BACKOFF_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_BACKOFF_SECS);
        let drain_delay_ms = env::var("LOGS_DRAIN_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_DRAIN_DELAY_MS);
        let flush_timeout_secs = env::var("LOGS_FLUSH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_FLUSH_TIMEOUT_SECS);

        Ok(Config {
            intake_url,
            retry_backoff: Duration::from_secs(retry_backoff_secs),
            drain_delay: Duration::from_millis(drain_delay_ms),
            flush_timeout: Duration::from_secs(flush_timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use std::env;
    use std::time::Duration;

    use crate::config;

    #[test]
    #[serial]
    fn test_error_if_no_intake_url() {
        env::remove_var("LOGS_INTAKE_URL");
        let config = config::Config::new();
        assert!(config.is_err());
        assert_eq!(
            config.unwrap_err().to_string(),
            "LOGS_INTAKE_URL environment variable is not set"
        );
    }

    #[test]
    #[serial]
    fn test_defaults() {
        env::set_var("LOGS_INTAKE_URL", "https://logs.example.com/api/logs");
        env::remove_var("LOGS_RETRY_BACKOFF_SECS");
        env::remove_var("LOGS_DRAIN_DELAY_MS");
        env::remove_var("LOGS_FLUSH_TIMEOUT_SECS");

        let config = config::Config::new().unwrap();
        assert_eq!(config.intake_url, "https://logs.example.com/api/logs");
        assert_eq!(config.retry_backoff, Duration::from_secs(30));
        assert_eq!(config.drain_delay, Duration::from_millis(0));
        assert_eq!(config.flush_timeout, Duration::from_secs(5));

        env::remove_var("LOGS_INTAKE_URL");
    }

    #[test]
    #[serial]
    fn test_custom_backoff_and_timeouts() {
        env::set_var("LOGS_INTAKE_URL", "http://127.0.0.1:3333");
        env::set_var("LOGS_RETRY_BACKOFF_SECS", "10");
        env::set_var("LOGS_DRAIN_DELAY_MS", "25");
        env::set_var("LOGS_FLUSH_TIMEOUT_SECS", "2");

        let config = config::Config::new().unwrap();
        assert_eq!(config.retry_backoff, Duration::from_secs(10));
        assert_eq!(config.drain_delay, Duration::from_millis(25));
        assert_eq!(config.flush_timeout, Duration::from_secs(2));

        env::remove_var("LOGS_INTAKE_URL");
        env::remove_var("LOGS_RETRY_BACKOFF_SECS");
        env::remove_var("LOGS_DRAIN_DELAY_MS");
        env::remove_var("LOGS_FLUSH_TIMEOUT_SECS");
    }

    #[test]
    #[serial]
    fn test_unparseable_values_fall_back_to_defaults() {
        env::set_var("LOGS_INTAKE_URL", "http://127.0.0.1:3333");
        env::set_var("LOGS_RETRY_BACKOFF_SECS", "not-a-number");

        let config = config::Config::new().unwrap();
        assert_eq!(config.retry_backoff, Duration::from_secs(30));

        env::remove_var("LOGS_INTAKE_URL");
        env::remove_var("LOGS_RETRY_BACKOFF_SECS");
    }
}
