//! Dead-letter queue
//!
//! Bounded record of publish and delivery failures, kept for diagnostics.
//! Once full, the oldest entry is evicted for each new one.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::broker::message::Envelope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadLetterReason {
    /// Serialized payload exceeded the configured maximum size.
    PayloadTooLarge,
    /// A message inside a batch failed to publish.
    PublishFailed,
    /// A subscriber callback returned an error or panicked.
    CallbackFailed,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeadLetter {
    pub topic: Option<String>,
    pub reason: DeadLetterReason,
    pub error: String,
    pub timestamp: DateTime<Utc>,
    pub message: Option<Envelope>,
}

impl DeadLetter {
    pub fn new(
        topic: Option<&str>,
        reason: DeadLetterReason,
        error: impl Into<String>,
        message: Option<Envelope>,
    ) -> Self {
        Self {
            topic: topic.map(str::to_string),
            reason,
            error: error.into(),
            timestamp: Utc::now(),
            message,
        }
    }
}

#[derive(Debug)]
pub struct DeadLetterQueue {
    entries: VecDeque<DeadLetter>,
    capacity: usize,
}

impl DeadLetterQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    pub fn push(&mut self, entry: DeadLetter) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &DeadLetter> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_evicts_oldest() {
        let mut dlq = DeadLetterQueue::new(2);
        for i in 0..3 {
            dlq.push(DeadLetter::new(
                Some("t"),
                DeadLetterReason::PublishFailed,
                format!("err{i}"),
                None,
            ));
        }

        assert_eq!(dlq.len(), 2);
        let errors: Vec<_> = dlq.iter().map(|d| d.error.as_str()).collect();
        assert_eq!(errors, vec!["err1", "err2"]);
    }

    #[test]
    fn test_reason_serializes_snake_case() {
        let json = serde_json::to_string(&DeadLetterReason::CallbackFailed).unwrap();
        assert_eq!(json, "\"callback_failed\"");
    }
}
