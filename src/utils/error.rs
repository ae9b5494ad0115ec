//! The `error` module defines the error types used within `pubsim`.
//!
//! Structural failures (unknown names, oversized payloads or batches) are
//! returned to the caller as [`PubSubError`]. Failures raised by subscriber
//! callbacks never reach the publisher; they are converted into dead-letter
//! entries instead.

use thiserror::Error;

/// Errors returned by simulator operations.
#[derive(Debug, Error)]
pub enum PubSubError {
    #[error("topic '{0}' does not exist")]
    UnknownTopic(String),

    #[error("subscription '{0}' does not exist")]
    UnknownSubscription(String),

    #[error("message size {size} exceeds limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("batch size {size} exceeds limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },

    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type returned by subscriber callbacks.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, PubSubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PubSubError::UnknownTopic("orders".into());
        assert_eq!(err.to_string(), "topic 'orders' does not exist");

        let err = PubSubError::BatchTooLarge {
            size: 101,
            limit: 100,
        };
        assert_eq!(err.to_string(), "batch size 101 exceeds limit of 100");
    }

    #[test]
    fn test_serialization_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: PubSubError = json_err.into();
        assert!(matches!(err, PubSubError::Serialization(_)));
    }
}
