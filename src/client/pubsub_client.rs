use std::fmt;

use chrono::{DateTime, Utc};

use crate::broker::message::Envelope;
use crate::utils::CallbackError;

pub type SubscriberId = String;

/// Callback invoked with every envelope delivered to a subscription.
///
/// Callbacks must be `Send` so a simulator can be moved behind a mutex by callers
/// that share it across threads.
pub type Callback = Box<dyn FnMut(&Envelope) -> Result<(), CallbackError> + Send>;

/// A callback registered on a subscription.
///
/// The binding owns the boxed closure; the simulator only invokes it.
pub struct SubscriberBinding {
    /// Identifier returned by `subscribe`, unique within its subscription.
    pub id: SubscriberId,

    pub created_at: DateTime<Utc>,

    callback: Callback,
}

impl SubscriberBinding {
    pub fn new(id: SubscriberId, callback: Callback) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            callback,
        }
    }

    pub fn invoke(&mut self, envelope: &Envelope) -> Result<(), CallbackError> {
        (self.callback)(envelope)
    }
}

impl fmt::Debug for SubscriberBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberBinding")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .field("callback", &"FnMut(&Envelope)")
            .finish()
    }
}
