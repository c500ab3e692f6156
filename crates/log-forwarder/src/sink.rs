//! Remote persistence boundary.
//!
//! A [`Sink`] is the only collaborator the drain loop talks to. It must be
//! assumed slow and unreliable: a persist call may block for an unbounded
//! time and fail for transient reasons (network partition, remote overload).
//! The sink itself never retries; retry policy lives entirely in the
//! drainer.

use async_trait::async_trait;

use crate::config::Config;
use crate::error::SinkError;
use crate::record::LogRecord;

/// Remote log persistence capability.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Attempts to persist one record. Success or failure is the only
    /// observable result; no response body is consumed by the core.
    async fn persist(&self, record: &LogRecord) -> Result<(), SinkError>;
}

/// Production sink: POSTs each record as JSON to the configured intake URL.
///
/// The payload carries `{message, level, data, timestamp}`. Any transport
/// error or non-2xx status is reported as a [`SinkError`]; classification
/// beyond success/failure is deliberately out of scope.
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: reqwest::Client,
    intake_url: String,
}

impl HttpSink {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.flush_timeout)
            .build()
            .unwrap_or_default();
        HttpSink {
            client,
            intake_url: config.intake_url.clone(),
        }
    }
}

#[async_trait]
impl Sink for HttpSink {
    async fn persist(&self, record: &LogRecord) -> Result<(), SinkError> {
        let resp = self
            .client
            .post(&self.intake_url)
            .json(record)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SinkError::UnexpectedStatus(status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LogLevel;
    use std::time::Duration;

    fn test_config(intake_url: String) -> Config {
        Config {
            intake_url,
            retry_backoff: Duration::from_millis(10),
            drain_delay: Duration::ZERO,
            flush_timeout: Duration::from_secs(2),
        }
    }

    fn record(message: &str) -> LogRecord {
        LogRecord::new(
            message.to_string(),
            LogLevel::Info,
            Some(serde_json::json!({"source": "test"})),
        )
    }

    #[tokio::test]
    async fn test_persist_succeeds_on_2xx() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/logs")
            .match_header("content-type", "application/json")
            .with_status(202)
            .create_async()
            .await;

        let sink = HttpSink::new(&test_config(format!("{}/api/logs", server.url())));
        let result = sink.persist(&record("hello")).await;

        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_persist_fails_on_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/logs")
            .with_status(503)
            .create_async()
            .await;

        let sink = HttpSink::new(&test_config(format!("{}/api/logs", server.url())));
        let result = sink.persist(&record("hello")).await;

        match result {
            Err(SinkError::UnexpectedStatus(status)) => assert_eq!(status.as_u16(), 503),
            other => panic!("expected UnexpectedStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_persist_fails_on_unreachable_intake() {
        // Port 9 (discard) should refuse the connection.
        let sink = HttpSink::new(&test_config("http://127.0.0.1:9/api/logs".to_string()));
        let result = sink.persist(&record("hello")).await;

        assert!(matches!(result, Err(SinkError::Transport(_))));
    }

    #[tokio::test]
    async fn test_persist_sends_record_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/logs")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"message":"hello","level":"info","data":{"source":"test"}}"#.to_string(),
            ))
            .with_status(200)
            .create_async()
            .await;

        let sink = HttpSink::new(&test_config(format!("{}/api/logs", server.url())));
        sink.persist(&record("hello")).await.unwrap();

        mock.assert_async().await;
    }
}
