//! Unique identifiers for stream entities

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque registration token for a subscriber.
///
/// Returned when a subscriber is registered with a notifying stream and used
/// to unregister it later. Membership is by token, never by comparing
/// subscriber contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    /// Creates a new random subscriber ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a subscriber ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subscriber({})", self.0)
    }
}
