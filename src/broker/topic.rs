//! Topic management
//!
//! A `Topic` holds its configuration, a publish counter and a bounded FIFO
//! queue of envelopes. When the queue is full the oldest envelope is evicted
//! to make room.
//!
//! Subscriptions reference topics by name; the topic itself does not track them.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};

use crate::broker::message::Envelope;

#[derive(Debug)]
pub struct Topic {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub labels: HashMap<String, String>,
    pub retention_seconds: u64,
    pub message_count: u64,
    queue: VecDeque<Envelope>,
    capacity: usize,
}

impl Topic {
    /// Create a new topic with an empty queue bounded to `capacity` envelopes.
    pub fn new(
        name: &str,
        labels: HashMap<String, String>,
        retention_seconds: u64,
        capacity: usize,
    ) -> Self {
        Self {
            name: name.to_string(),
            created_at: Utc::now(),
            labels,
            retention_seconds,
            message_count: 0,
            queue: VecDeque::new(),
            capacity,
        }
    }

    /// Append an envelope, returning the evicted one if the queue was full.
    pub fn enqueue(&mut self, envelope: Envelope) -> Option<Envelope> {
        if self.capacity == 0 {
            return Some(envelope);
        }
        let evicted = if self.queue.len() >= self.capacity {
            self.queue.pop_front()
        } else {
            None
        };
        self.queue.push_back(envelope);
        evicted
    }

    /// Remove and return the oldest envelope.
    pub fn dequeue(&mut self) -> Option<Envelope> {
        self.queue.pop_front()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
