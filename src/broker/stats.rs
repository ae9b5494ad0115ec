//! Read-only statistics snapshots.
//!
//! Snapshots are plain values detached from the simulator; they serialize to
//! JSON for harness reports.

use serde::Serialize;

/// Process-wide counters owned by a simulator instance.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub messages_published: u64,
    pub messages_received: u64,
    pub messages_failed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicStats {
    pub name: String,
    pub message_count: u64,
    pub queue_size: usize,
    pub subscriptions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionStats {
    pub name: String,
    pub topic: String,
    pub message_count: u64,
    pub callbacks: usize,
    pub ack_deadline_seconds: u64,
    pub filter_expression: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalStats {
    pub topics: usize,
    pub subscriptions: usize,
    pub messages_published: u64,
    pub messages_received: u64,
    pub messages_failed: u64,
    pub dead_letter_queue_size: usize,
}
