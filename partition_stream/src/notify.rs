//! Partitioned stream with subscriber fan-out.

use crate::partition::{PartitionError, PartitionStream};
use crate::subscriber::Subscriber;
use log::debug;
use std::collections::HashMap;
use stream_core::{MessageStream, StreamKind, SubscriberId};

/// Partitioned stream that fans every successful append out to its
/// registered subscribers.
///
/// Subscribers are invoked synchronously and sequentially, in registration
/// order, with the literal appended text. A failed append notifies nobody.
/// A subscriber failure aborts the remaining fan-out and surfaces as
/// [`PartitionError::SubscriberRejected`]; the appended message itself stays
/// committed.
pub struct NotifyingPartitionStream {
    inner: PartitionStream,
    subscribers: Vec<(SubscriberId, Box<dyn Subscriber>)>,
}

impl NotifyingPartitionStream {
    /// Builds a notifying stream from an initial partition mapping.
    pub fn from_partitions(partitions: HashMap<String, Box<dyn MessageStream>>) -> Self {
        Self::new(PartitionStream::from_partitions(partitions))
    }

    /// Wraps an existing partitioned stream.
    pub fn new(inner: PartitionStream) -> Self {
        Self {
            inner,
            subscribers: Vec::new(),
        }
    }

    /// Registers a subscriber and returns its opaque token.
    ///
    /// Registration order is notification order. The token is the only
    /// handle for removal; each registration gets a fresh one.
    pub fn add_subscriber(&mut self, subscriber: Box<dyn Subscriber>) -> SubscriberId {
        let id = SubscriberId::new();
        self.subscribers.push((id, subscriber));
        debug!("registered {}", id);
        id
    }

    /// Unregisters a subscriber by token.
    ///
    /// Takes effect for all subsequent notifications, never retroactively.
    /// Returns `false` if the token is not registered.
    pub fn remove_subscriber(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        let removed = self.subscribers.len() != before;
        if removed {
            debug!("unregistered {}", id);
        }
        removed
    }

    /// Returns the number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Appends a message and notifies every registered subscriber.
    pub fn add_message(&mut self, partition: &str, message: &str) -> Result<(), PartitionError> {
        self.inner.add_message(partition, message)?;

        for (id, subscriber) in self.subscribers.iter_mut() {
            subscriber
                .new_message(message)
                .map_err(|err| PartitionError::SubscriberRejected {
                    id: *id,
                    reason: err.reason().to_string(),
                })?;
        }
        Ok(())
    }

    /// Reads `[start, start + count)` from the named partition.
    pub fn read_messages(
        &mut self,
        partition: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<String>, PartitionError> {
        self.inner.read_messages(partition, start, count)
    }

    /// Returns the number of partitions
    pub fn partition_count(&self) -> usize {
        self.inner.partition_count()
    }

    /// Returns the partition names in sorted order
    pub fn partition_names(&self) -> Vec<String> {
        self.inner.partition_names()
    }

    /// Returns the named partition's message count
    pub fn message_count(&self, partition: &str) -> Result<usize, PartitionError> {
        self.inner.message_count(partition)
    }

    /// Returns the named partition's storage descriptor
    pub fn partition_kind(&self, partition: &str) -> Result<StreamKind, PartitionError> {
        self.inner.partition_kind(partition)
    }

    /// Releases every owned partition. Subscribers are untouched.
    pub fn dispose(&mut self) -> Result<(), PartitionError> {
        self.inner.dispose()
    }
}
