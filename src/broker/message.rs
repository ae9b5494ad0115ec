//! Message definitions for the simulator
//!
//! `Envelope` is the unit stored in topic queues and handed to subscriber
//! callbacks. It is immutable once built: fields are private and exposed
//! through accessors.
//!
//! Notes on fields:
//! - `message_id`: opaque UUID v4 string generated at publish time
//! - `data`: the payload as text; JSON payloads are serialized before storage
//! - `attributes`: free-form string metadata supplied by the publisher
//! - `publish_time`: UTC timestamp taken when the envelope is created
//! - `topic`: name of the topic the message was published to

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::Result;

pub type Attributes = HashMap<String, String>;

/// Payload accepted by `publish_message`.
///
/// Text is stored verbatim; JSON values are serialized to their compact text form.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Json(serde_json::Value),
}

impl Payload {
    /// Serialize any `Serialize` value into a JSON payload.
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Payload::Json(serde_json::to_value(value)?))
    }

    pub(crate) fn into_text(self) -> Result<String> {
        match self {
            Payload::Text(text) => Ok(text),
            Payload::Json(value) => Ok(serde_json::to_string(&value)?),
        }
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Json(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    message_id: String,
    data: String,
    attributes: Attributes,
    publish_time: DateTime<Utc>,
    topic: String,
}

impl Envelope {
    pub(crate) fn new(topic: &str, data: String, attributes: Attributes) -> Self {
        Self {
            message_id: Uuid::new_v4().to_string(),
            data,
            attributes,
            publish_time: Utc::now(),
            topic: topic.to_string(),
        }
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Payload text exactly as published.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn publish_time(&self) -> DateTime<Utc> {
        self.publish_time
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Decode the payload text as JSON.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_payload_is_kept_verbatim() {
        let text = Payload::from("not {json").into_text().unwrap();
        assert_eq!(text, "not {json");
    }

    #[test]
    fn test_json_payload_is_serialized() {
        let text = Payload::from(json!({"id": 1})).into_text().unwrap();
        assert_eq!(text, r#"{"id":1}"#);
    }

    #[test]
    fn test_payload_from_struct() {
        #[derive(Serialize)]
        struct Order {
            id: u32,
        }

        let payload = Payload::json(&Order { id: 7 }).unwrap();
        assert_eq!(payload, Payload::Json(json!({"id": 7})));
    }

    #[test]
    fn test_envelope_decode() {
        let env = Envelope::new("orders", r#"{"id":1}"#.into(), Attributes::new());
        let value: serde_json::Value = env.decode().unwrap();
        assert_eq!(value, json!({"id": 1}));
        assert_eq!(env.topic(), "orders");
        assert!(!env.message_id().is_empty());
    }

    #[test]
    fn test_envelope_ids_are_unique() {
        let a = Envelope::new("t", "a".into(), Attributes::new());
        let b = Envelope::new("t", "a".into(), Attributes::new());
        assert_ne!(a.message_id(), b.message_id());
    }
}
