//! Single-flight drain loop.
//!
//! The drainer owns the [`LogQueue`] outright and is woken by an unbounded
//! mpsc channel: a [`DrainerHandle::enqueue`] both delivers the record and
//! acts as the trigger. Because the task is the channel's only consumer, at
//! most one drain step is ever in flight. The single-flight guarantee is
//! structural rather than a busy flag: a flag cleared between steps leaves
//! a window where two triggers can both observe idle and start draining,
//! while a task that owns the queue cannot race itself (see DESIGN.md).
//!
//! One record is removed per step and offered to the sink. On success the
//! next step follows after a minimal, configurable delay (a yield point,
//! never a synchronous re-entry). On failure the record goes back to the
//! head of the queue, the failure is echoed locally at error level, and the
//! next step waits out a fixed backoff. There is no retry ceiling and no
//! dead-letter path: an unreachable sink means indefinite retries and
//! unbounded queue growth, by design.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::logger::Echo;
use crate::queue::LogQueue;
use crate::record::{LogLevel, LogRecord};
use crate::sink::Sink;

/// Producer side of the drain loop. Cheap to clone.
#[derive(Debug, Clone)]
pub struct DrainerHandle {
    tx: mpsc::UnboundedSender<LogRecord>,
}

impl DrainerHandle {
    /// Appends a record and wakes the drain loop.
    ///
    /// O(1), never blocks. If the loop is mid-step the wake coalesces: the
    /// running step will reach this record in queue order.
    pub fn enqueue(
        &self,
        record: LogRecord,
    ) -> Result<(), mpsc::error::SendError<LogRecord>> {
        self.tx.send(record)
    }
}

/// The drain task. Construct with [`Drainer::new`], then hand `run()` to
/// the runtime.
pub struct Drainer<S: Sink> {
    queue: LogQueue,
    rx: mpsc::UnboundedReceiver<LogRecord>,
    sink: S,
    echo: Echo,
    retry_backoff: Duration,
    drain_delay: Duration,
}

impl<S: Sink> Drainer<S> {
    /// Creates the drain task and its producer handle.
    ///
    /// `retry_backoff` is the fixed delay after a failed persist;
    /// `drain_delay` the pause between successful steps (zero still yields).
    pub fn new(
        sink: S,
        echo: Echo,
        retry_backoff: Duration,
        drain_delay: Duration,
    ) -> (Self, DrainerHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let drainer = Drainer {
            queue: LogQueue::new(),
            rx,
            sink,
            echo,
            retry_backoff,
            drain_delay,
        };
        (drainer, DrainerHandle { tx })
    }

    /// Runs until every producer handle is dropped and the queue has fully
    /// drained. There is no shutdown command: process termination simply
    /// stops scheduling steps.
    pub async fn run(mut self) {
        debug!("log drainer started");

        loop {
            // Idle state: nothing pending, park until a record arrives.
            if self.queue.is_empty() {
                match self.rx.recv().await {
                    Some(record) => self.queue.append(record),
                    None => break,
                }
            }
            // Pull in everything else that arrived while we were busy or
            // parked, so queue order matches arrival order.
            while let Ok(record) = self.rx.try_recv() {
                self.queue.append(record);
            }

            self.drain_step().await;
        }

        debug!("log drainer stopped");
    }

    /// One drain step: remove the oldest record, offer it to the sink.
    async fn drain_step(&mut self) {
        let Some(record) = self.queue.remove_oldest() else {
            return;
        };

        match self.sink.persist(&record).await {
            Ok(()) => {
                debug!("persisted log record, {} pending", self.queue.len());
                // Yield before the next step even when the delay is zero;
                // a step never re-enters synchronously.
                tokio::time::sleep(self.drain_delay).await;
            }
            Err(e) => {
                // The record is never dropped on failure: back to the head
                // so it is retried before anything newer.
                self.queue.requeue_at_head(record);
                error!("failed to persist log record: {e}");
                self.echo.line(
                    chrono::Utc::now(),
                    LogLevel::Error,
                    &format!(
                        "log sink unreachable ({e}), retrying in {}s, {} pending",
                        self.retry_backoff.as_secs(),
                        self.queue.len()
                    ),
                );
                tokio::time::sleep(self.retry_backoff).await;
            }
        }
    }
}
