//! Subscription management
//!
//! A `Subscription` binds a name to exactly one topic and carries the ordered
//! list of callbacks invoked on each publish to that topic.
//!
//! `ack_deadline_seconds` is stored and reported but nothing enforces it:
//! pulled messages are never tracked against a deadline or redelivered.

use chrono::{DateTime, Utc};

use crate::client::{Callback, SubscriberBinding, SubscriberId};

#[derive(Debug)]
pub struct Subscription {
    pub name: String,
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub ack_deadline_seconds: u64,
    pub filter_expression: Option<String>,
    /// Messages acknowledged through this subscription.
    pub message_count: u64,
    pub(crate) callbacks: Vec<SubscriberBinding>,
    next_subscriber: u64,
}

impl Subscription {
    pub fn new(
        name: &str,
        topic: &str,
        ack_deadline_seconds: u64,
        filter_expression: Option<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            topic: topic.to_string(),
            created_at: Utc::now(),
            ack_deadline_seconds,
            filter_expression,
            message_count: 0,
            callbacks: Vec::new(),
            next_subscriber: 0,
        }
    }

    /// Append a callback and return its identifier.
    ///
    /// Identifiers are never reused within a subscription, even after `remove`.
    pub fn add(&mut self, callback: Callback) -> SubscriberId {
        let id = format!("sub_{}", self.next_subscriber);
        self.next_subscriber += 1;
        self.callbacks.push(SubscriberBinding::new(id.clone(), callback));
        id
    }

    /// Remove a callback. Returns `false` if the id is unknown.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|b| b.id != id);
        self.callbacks.len() != before
    }

    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }
}
