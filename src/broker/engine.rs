//! Simulator engine
//!
//! This module contains the in-memory publish/subscribe simulator responsible for:
//! - managing topics (with bounded FIFO queues) and subscriptions bound to them
//! - publishing single messages and batches, with synchronous callback fan-out
//! - pull-based consumption and acknowledgment bookkeeping
//! - recording publish and delivery failures in a bounded dead-letter queue
//! - reporting per-topic, per-subscription and global statistics
//!
//! Concurrency and usage notes:
//! - `Simulator` is single-owner and has no internal synchronization. Every
//!   mutating operation takes `&mut self` and runs to completion on the
//!   caller's thread. Callers that share one instance across threads must
//!   wrap it themselves, for example in `Arc<Mutex<Simulator>>`.
//! - Nothing blocks or waits: `pull_messages` returns whatever is queued,
//!   possibly nothing.
//!
//! Known gaps, kept on purpose:
//! - filter expressions are stored but every message matches
//! - `ack_deadline_seconds` is never enforced and `nack_messages` does not requeue
//! - messages drained by a pull are gone; there is no outstanding-delivery tracking
//! - topic and subscription names are not validated

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::broker::dead_letter::{DeadLetter, DeadLetterQueue, DeadLetterReason};
use crate::broker::filter;
use crate::broker::message::{Attributes, Envelope, Payload};
use crate::broker::stats::{Counters, GlobalStats, SubscriptionStats, TopicStats};
use crate::broker::subscription::Subscription;
use crate::broker::topic::Topic;
use crate::client::SubscriberId;
use crate::config::{Settings, SimulatorSettings};
use crate::utils::{CallbackError, PubSubError, Result};

/// Size and default limits applied by a `Simulator`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    pub queue_capacity: usize,
    pub max_message_size: usize,
    pub max_batch_size: usize,
    pub dead_letter_capacity: usize,
    pub retention_seconds: u64,
    pub ack_deadline_seconds: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self::from(&SimulatorSettings::default())
    }
}

impl From<&SimulatorSettings> for Limits {
    fn from(s: &SimulatorSettings) -> Self {
        Self {
            queue_capacity: s.queue_capacity,
            max_message_size: s.max_message_size,
            max_batch_size: s.max_batch_size,
            dead_letter_capacity: s.dead_letter_capacity,
            retention_seconds: s.retention_seconds,
            ack_deadline_seconds: s.ack_deadline_seconds,
        }
    }
}

/// In-memory approximation of a topic-based publish/subscribe broker.
///
/// Not thread-safe: see the module docs.
#[derive(Debug)]
pub struct Simulator {
    topics: IndexMap<String, Topic>,
    subscriptions: IndexMap<String, Subscription>,
    dead_letters: DeadLetterQueue,
    counters: Counters,
    limits: Limits,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            topics: IndexMap::new(),
            subscriptions: IndexMap::new(),
            dead_letters: DeadLetterQueue::new(limits.dead_letter_capacity),
            counters: Counters::default(),
            limits,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_limits(Limits::from(&settings.simulator))
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Registers a topic with an empty queue and returns its name.
    ///
    /// Calling this with an existing name silently replaces the topic: labels,
    /// retention, counter and queued messages are all reset. Subscriptions bound
    /// to that name stay bound.
    pub fn create_topic(
        &mut self,
        name: &str,
        labels: Option<HashMap<String, String>>,
        retention_seconds: Option<u64>,
    ) -> String {
        let topic = Topic::new(
            name,
            labels.unwrap_or_default(),
            retention_seconds.unwrap_or(self.limits.retention_seconds),
            self.limits.queue_capacity,
        );

        if self.topics.insert(name.to_string(), topic).is_some() {
            warn!(topic = name, "topic already existed; configuration overwritten");
        } else {
            info!(topic = name, "topic created");
        }
        name.to_string()
    }

    /// Publishes one message and returns its generated id.
    ///
    /// The envelope is queued on the topic (evicting the oldest at capacity),
    /// then every callback of every subscription on the topic is invoked in
    /// registration order. Callback failures are recorded as dead letters and
    /// never reach the caller.
    pub fn publish_message(
        &mut self,
        topic_name: &str,
        payload: impl Into<Payload>,
        attributes: Option<Attributes>,
    ) -> Result<String> {
        if !self.topics.contains_key(topic_name) {
            return Err(PubSubError::UnknownTopic(topic_name.to_string()));
        }

        let data = payload.into().into_text()?;

        if data.len() > self.limits.max_message_size {
            let err = PubSubError::PayloadTooLarge {
                size: data.len(),
                limit: self.limits.max_message_size,
            };
            self.record_failure(
                Some(topic_name),
                DeadLetterReason::PayloadTooLarge,
                err.to_string(),
                None,
            );
            return Err(err);
        }

        let envelope = Envelope::new(topic_name, data, attributes.unwrap_or_default());
        let message_id = envelope.message_id().to_string();

        let topic = self
            .topics
            .get_mut(topic_name)
            .ok_or_else(|| PubSubError::UnknownTopic(topic_name.to_string()))?;
        if let Some(evicted) = topic.enqueue(envelope.clone()) {
            debug!(
                topic = topic_name,
                message_id = evicted.message_id(),
                "queue full; evicted oldest message"
            );
        }
        topic.message_count += 1;
        self.counters.messages_published += 1;

        debug!(topic = topic_name, message_id = %message_id, "message published");

        self.fan_out(&envelope);

        Ok(message_id)
    }

    /// Publishes each message in order and returns the ids that succeeded.
    ///
    /// A batch over the size limit is rejected before anything is published.
    /// Individual failures are recorded as dead letters and do not stop the batch.
    pub fn publish_batch<P: Into<Payload>>(
        &mut self,
        topic_name: &str,
        messages: Vec<P>,
    ) -> Result<Vec<String>> {
        if messages.len() > self.limits.max_batch_size {
            return Err(PubSubError::BatchTooLarge {
                size: messages.len(),
                limit: self.limits.max_batch_size,
            });
        }

        let mut message_ids = Vec::with_capacity(messages.len());
        for message in messages {
            match self.publish_message(topic_name, message, None) {
                Ok(id) => message_ids.push(id),
                // already dead-lettered by publish_message
                Err(PubSubError::PayloadTooLarge { .. }) => {}
                Err(e) => self.record_failure(
                    Some(topic_name),
                    DeadLetterReason::PublishFailed,
                    e.to_string(),
                    None,
                ),
            }
        }

        Ok(message_ids)
    }

    /// Creates a subscription bound to an existing topic and returns its name.
    ///
    /// An existing subscription with the same name is replaced, dropping its callbacks.
    pub fn create_subscription(
        &mut self,
        name: &str,
        topic_name: &str,
        ack_deadline_seconds: Option<u64>,
        filter_expression: Option<String>,
    ) -> Result<String> {
        if !self.topics.contains_key(topic_name) {
            return Err(PubSubError::UnknownTopic(topic_name.to_string()));
        }

        let subscription = Subscription::new(
            name,
            topic_name,
            ack_deadline_seconds.unwrap_or(self.limits.ack_deadline_seconds),
            filter_expression,
        );
        self.subscriptions.insert(name.to_string(), subscription);

        info!(subscription = name, topic = topic_name, "subscription created");
        Ok(name.to_string())
    }

    /// Attaches a callback to a subscription and returns its subscriber id.
    ///
    /// Every callback on a subscription is invoked for every message published
    /// after it was attached.
    pub fn subscribe<F>(&mut self, subscription_name: &str, callback: F) -> Result<SubscriberId>
    where
        F: FnMut(&Envelope) -> std::result::Result<(), CallbackError> + Send + 'static,
    {
        let subscription = self.subscription_mut(subscription_name)?;
        let id = subscription.add(Box::new(callback));

        debug!(subscription = subscription_name, subscriber = %id, "callback attached");
        Ok(id)
    }

    /// Detaches a callback. Returns `false` if the subscriber id is unknown.
    pub fn unsubscribe(&mut self, subscription_name: &str, subscriber_id: &str) -> Result<bool> {
        let subscription = self.subscription_mut(subscription_name)?;
        Ok(subscription.remove(subscriber_id))
    }

    /// Drains up to `max_messages` envelopes from the bound topic, oldest first.
    ///
    /// Drained messages are removed from the topic for every subscription on it.
    /// With `auto_ack`, each returned message is counted as received.
    pub fn pull_messages(
        &mut self,
        subscription_name: &str,
        max_messages: usize,
        auto_ack: bool,
    ) -> Result<Vec<Envelope>> {
        let subscription = self
            .subscriptions
            .get_mut(subscription_name)
            .ok_or_else(|| PubSubError::UnknownSubscription(subscription_name.to_string()))?;
        let topic = self
            .topics
            .get_mut(&subscription.topic)
            .ok_or_else(|| PubSubError::UnknownTopic(subscription.topic.clone()))?;

        let mut messages = Vec::new();
        while messages.len() < max_messages {
            let Some(envelope) = topic.dequeue() else {
                break;
            };

            if let Some(expr) = subscription.filter_expression.as_deref() {
                if !filter::matches(&envelope, expr) {
                    debug!(
                        subscription = subscription_name,
                        message_id = envelope.message_id(),
                        "message discarded by filter"
                    );
                    continue;
                }
            }

            messages.push(envelope);

            if auto_ack {
                subscription.message_count += 1;
                self.counters.messages_received += 1;
            }
        }

        debug!(
            subscription = subscription_name,
            pulled = messages.len(),
            "messages pulled"
        );
        Ok(messages)
    }

    /// Marks messages as processed and returns how many were acknowledged.
    ///
    /// Ids are counted, not checked against anything previously pulled.
    pub fn acknowledge_messages(
        &mut self,
        subscription_name: &str,
        message_ids: &[String],
    ) -> Result<usize> {
        let subscription = self.subscription_mut(subscription_name)?;
        let acked = message_ids.len();
        subscription.message_count += acked as u64;
        self.counters.messages_received += acked as u64;
        Ok(acked)
    }

    /// Negative acknowledgment. Requeue is not implemented, so this only
    /// validates the subscription.
    pub fn nack_messages(&mut self, subscription_name: &str, message_ids: &[String]) -> Result<()> {
        self.subscription_mut(subscription_name)?;
        debug!(
            subscription = subscription_name,
            count = message_ids.len(),
            "nack ignored; requeue not implemented"
        );
        Ok(())
    }

    /// Deletes a topic, its queue and every subscription bound to it.
    pub fn delete_topic(&mut self, name: &str) -> bool {
        if self.topics.shift_remove(name).is_none() {
            return false;
        }

        self.subscriptions.retain(|sub_name, sub| {
            let keep = sub.topic != name;
            if !keep {
                info!(subscription = %sub_name, topic = name, "subscription deleted with topic");
            }
            keep
        });

        info!(topic = name, "topic deleted");
        true
    }

    pub fn delete_subscription(&mut self, name: &str) -> bool {
        let removed = self.subscriptions.shift_remove(name).is_some();
        if removed {
            info!(subscription = name, "subscription deleted");
        }
        removed
    }

    /// Topic names in creation order.
    pub fn list_topics(&self) -> Vec<String> {
        self.topics.keys().cloned().collect()
    }

    /// Subscription names in creation order, optionally restricted to one topic.
    pub fn list_subscriptions(&self, topic_name: Option<&str>) -> Vec<String> {
        self.subscriptions
            .values()
            .filter(|sub| topic_name.is_none_or(|t| sub.topic == t))
            .map(|sub| sub.name.clone())
            .collect()
    }

    pub fn get_topic_stats(&self, name: &str) -> Result<TopicStats> {
        let topic = self
            .topics
            .get(name)
            .ok_or_else(|| PubSubError::UnknownTopic(name.to_string()))?;

        Ok(TopicStats {
            name: topic.name.clone(),
            message_count: topic.message_count,
            queue_size: topic.queue_len(),
            subscriptions: self.list_subscriptions(Some(name)),
        })
    }

    pub fn get_subscription_stats(&self, name: &str) -> Result<SubscriptionStats> {
        let sub = self
            .subscriptions
            .get(name)
            .ok_or_else(|| PubSubError::UnknownSubscription(name.to_string()))?;

        Ok(SubscriptionStats {
            name: sub.name.clone(),
            topic: sub.topic.clone(),
            message_count: sub.message_count,
            callbacks: sub.callback_count(),
            ack_deadline_seconds: sub.ack_deadline_seconds,
            filter_expression: sub.filter_expression.clone(),
        })
    }

    pub fn get_global_stats(&self) -> GlobalStats {
        GlobalStats {
            topics: self.topics.len(),
            subscriptions: self.subscriptions.len(),
            messages_published: self.counters.messages_published,
            messages_received: self.counters.messages_received,
            messages_failed: self.counters.messages_failed,
            dead_letter_queue_size: self.dead_letters.len(),
        }
    }

    /// Dead-letter entries, oldest first.
    pub fn dead_letters(&self) -> impl Iterator<Item = &DeadLetter> {
        self.dead_letters.iter()
    }

    fn subscription_mut(&mut self, name: &str) -> Result<&mut Subscription> {
        self.subscriptions
            .get_mut(name)
            .ok_or_else(|| PubSubError::UnknownSubscription(name.to_string()))
    }

    fn fan_out(&mut self, envelope: &Envelope) {
        let topic_name = envelope.topic();

        for sub in self.subscriptions.values_mut() {
            if sub.topic != topic_name {
                continue;
            }

            for binding in sub.callbacks.iter_mut() {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| binding.invoke(envelope)));

                let error = match outcome {
                    Ok(Ok(())) => continue,
                    Ok(Err(e)) => e.to_string(),
                    Err(payload) => panic_message(payload.as_ref()),
                };

                warn!(
                    subscription = %sub.name,
                    subscriber = %binding.id,
                    message_id = envelope.message_id(),
                    error = %error,
                    "subscriber callback failed"
                );
                self.counters.messages_failed += 1;
                self.dead_letters.push(DeadLetter::new(
                    Some(topic_name),
                    DeadLetterReason::CallbackFailed,
                    error,
                    Some(envelope.clone()),
                ));
            }
        }
    }

    fn record_failure(
        &mut self,
        topic: Option<&str>,
        reason: DeadLetterReason,
        error: String,
        message: Option<Envelope>,
    ) {
        warn!(topic = ?topic, ?reason, error = %error, "message dead-lettered");
        self.counters.messages_failed += 1;
        self.dead_letters.push(DeadLetter::new(topic, reason, error, message));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("callback panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("callback panicked: {msg}")
    } else {
        "callback panicked".to_string()
    }
}
