//! Subscriber notification contract

use thiserror::Error;

/// Error raised by a subscriber's message handler.
#[derive(Debug, Error)]
#[error("Subscriber failed: {0}")]
pub struct SubscriberError(String);

impl SubscriberError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    /// Returns the failure reason
    pub fn reason(&self) -> &str {
        &self.0
    }
}

/// External collaborator notified of every successfully appended message.
///
/// The single entry point is invoked synchronously by
/// [`NotifyingPartitionStream`](crate::NotifyingPartitionStream) with the
/// literal appended text. Implementers may do anything with the message but
/// must not assume any particular threading context. A returned error aborts
/// the remaining fan-out for that append.
pub trait Subscriber {
    /// Handles one appended message
    fn new_message(&mut self, message: &str) -> Result<(), SubscriberError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_error_display() {
        let err = SubscriberError::new("mailbox full");
        assert_eq!(err.to_string(), "Subscriber failed: mailbox full");
        assert_eq!(err.reason(), "mailbox full");
    }
}
