//! The `client` module defines how subscribers attach to the simulator.
//!
//! A subscriber is a typed callback taking one envelope. It is wrapped in a
//! `SubscriberBinding` that records the identifier handed back to the caller.

pub mod pubsub_client;
pub use pubsub_client::{Callback, SubscriberBinding, SubscriberId};

#[cfg(test)]
mod tests;
