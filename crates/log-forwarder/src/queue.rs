//! In-memory FIFO buffer of records awaiting delivery.
//!
//! The queue is unbounded by design: a record is dropped only after the sink
//! has accepted it, never because of memory pressure. Under a sustained sink
//! outage the queue grows without limit, an accepted risk of this design,
//! documented here rather than silently patched with an eviction policy.
//!
//! The queue is owned exclusively by the drain task. Producers never touch
//! it directly, so no locking is needed.

use std::collections::VecDeque;

use crate::record::LogRecord;

/// Ordered, unbounded buffer of pending [`LogRecord`]s.
///
/// Insertion order is arrival order, with one exception: a record returned
/// after a failed drain attempt goes back to the *head* of the queue, so it
/// is redelivered before anything appended after it.
#[derive(Debug, Default)]
pub struct LogQueue {
    records: VecDeque<LogRecord>,
}

impl LogQueue {
    #[must_use]
    pub fn new() -> Self {
        LogQueue {
            records: VecDeque::new(),
        }
    }

    /// Appends a record at the tail. O(1), never fails, never blocks.
    pub fn append(&mut self, record: LogRecord) {
        self.records.push_back(record);
    }

    /// Returns the oldest record without removing it.
    #[must_use]
    pub fn peek_oldest(&self) -> Option<&LogRecord> {
        self.records.front()
    }

    /// Removes and returns the oldest record.
    pub fn remove_oldest(&mut self) -> Option<LogRecord> {
        self.records.pop_front()
    }

    /// Reinserts a record at the head so it becomes the next one drained.
    ///
    /// Used after a failed persist attempt to preserve as much temporal
    /// order as possible: the retried record is redelivered before newer
    /// ones.
    pub fn requeue_at_head(&mut self, record: LogRecord) {
        self.records.push_front(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
