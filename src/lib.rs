//! # pubsim
//!
//! `pubsim` is a synchronous, in-memory publish/subscribe simulator. It models
//! topics, subscriptions, message envelopes and a dead-letter queue so code
//! shaped around a message broker can be exercised locally, without a broker.
//!
//! ## Core Modules
//!
//! - `broker`: the `Simulator` plus its topics, subscriptions, envelopes, dead letters and stats.
//! - `client`: typed subscriber callbacks and their bindings.
//! - `config`: loads simulator limits and the logging level from file and environment.
//! - `utils`: error types and logging initialisation.
//!
//! The simulator is single-owner and not thread-safe; see `broker::engine`.

pub mod broker;
pub mod client;
pub mod config;
pub mod utils;

pub use broker::message::{Attributes, Envelope, Payload};
pub use broker::{Limits, Simulator};
pub use utils::{CallbackError, PubSubError, Result};
