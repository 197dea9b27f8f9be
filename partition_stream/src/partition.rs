//! Named-partition routing over owned message streams.

use std::collections::HashMap;
use stream_core::{MessageStream, StreamError, StreamKind, SubscriberId};
use thiserror::Error;

/// Errors surfaced by partition routing and fan-out.
#[derive(Debug, Error)]
pub enum PartitionError {
    /// Referenced partition name does not exist
    #[error("Unknown partition: {0}")]
    UnknownPartition(String),

    /// A delegated stream operation failed; propagated unchanged
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// A subscriber's handler failed during fan-out; the append itself has
    /// already committed, the remaining fan-out was aborted
    #[error("Subscriber {id} rejected message: {reason}")]
    SubscriberRejected { id: SubscriberId, reason: String },
}

/// Routes appends and reads to a fixed set of named streams.
///
/// Each partition exclusively owns its stream; the set of partitions never
/// changes after construction.
pub struct PartitionStream {
    partitions: HashMap<String, Box<dyn MessageStream>>,
}

impl PartitionStream {
    /// Builds a partitioned stream from an initial mapping.
    pub fn from_partitions(partitions: HashMap<String, Box<dyn MessageStream>>) -> Self {
        Self { partitions }
    }

    /// Appends a message to the named partition.
    ///
    /// Fails with [`PartitionError::UnknownPartition`] for an unknown name;
    /// otherwise delegates and propagates the stream's own result unchanged.
    pub fn add_message(&mut self, partition: &str, message: &str) -> Result<(), PartitionError> {
        let stream = self.partition_mut(partition)?;
        stream.append(message)?;
        Ok(())
    }

    /// Reads `[start, start + count)` from the named partition.
    pub fn read_messages(
        &mut self,
        partition: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<String>, PartitionError> {
        let stream = self.partition_mut(partition)?;
        Ok(stream.read(start, count)?)
    }

    /// Returns the number of partitions
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    /// Returns the partition names in sorted order, for diagnostics
    pub fn partition_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.partitions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Checks whether a partition exists
    pub fn contains_partition(&self, partition: &str) -> bool {
        self.partitions.contains_key(partition)
    }

    /// Returns the named partition's message count. Consumes no budget.
    pub fn message_count(&self, partition: &str) -> Result<usize, PartitionError> {
        Ok(self.partition_ref(partition)?.message_count())
    }

    /// Returns the named partition's storage descriptor
    pub fn partition_kind(&self, partition: &str) -> Result<StreamKind, PartitionError> {
        Ok(self.partition_ref(partition)?.kind())
    }

    /// Releases every owned partition, propagating durable resource release.
    ///
    /// Safe to call more than once; never required (dropping the stream also
    /// releases its partitions).
    pub fn dispose(&mut self) -> Result<(), PartitionError> {
        for stream in self.partitions.values_mut() {
            stream.dispose()?;
        }
        Ok(())
    }

    fn partition_ref(&self, partition: &str) -> Result<&dyn MessageStream, PartitionError> {
        self.partitions
            .get(partition)
            .map(|stream| stream.as_ref())
            .ok_or_else(|| PartitionError::UnknownPartition(partition.to_string()))
    }

    fn partition_mut(
        &mut self,
        partition: &str,
    ) -> Result<&mut Box<dyn MessageStream>, PartitionError> {
        self.partitions
            .get_mut(partition)
            .ok_or_else(|| PartitionError::UnknownPartition(partition.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stream_core::BoundedStream;

    fn two_partitions() -> PartitionStream {
        let mut partitions: HashMap<String, Box<dyn MessageStream>> = HashMap::new();
        partitions.insert(
            "alpha".to_string(),
            Box::new(BoundedStream::new(3, 10).unwrap()),
        );
        partitions.insert(
            "beta".to_string(),
            Box::new(BoundedStream::new(3, 10).unwrap()),
        );
        PartitionStream::from_partitions(partitions)
    }

    #[test]
    fn test_routes_by_partition_name() {
        let mut stream = two_partitions();
        stream.add_message("alpha", "to-alpha").unwrap();
        stream.add_message("beta", "to-beta").unwrap();

        assert_eq!(
            stream.read_messages("alpha", 0, 1).unwrap(),
            vec!["to-alpha"]
        );
        assert_eq!(stream.read_messages("beta", 0, 1).unwrap(), vec!["to-beta"]);
    }

    #[test]
    fn test_unknown_partition() {
        let mut stream = two_partitions();
        assert!(matches!(
            stream.add_message("gamma", "lost"),
            Err(PartitionError::UnknownPartition(name)) if name == "gamma"
        ));
        assert!(matches!(
            stream.read_messages("gamma", 0, 0),
            Err(PartitionError::UnknownPartition(_))
        ));
        assert!(matches!(
            stream.message_count("gamma"),
            Err(PartitionError::UnknownPartition(_))
        ));
    }

    #[test]
    fn test_stream_failures_propagate_unchanged() {
        let mut stream = two_partitions();
        stream.add_message("alpha", "once").unwrap();

        assert!(matches!(
            stream.add_message("alpha", "once"),
            Err(PartitionError::Stream(StreamError::DuplicateMessage(_)))
        ));
        // The duplicate lives only in alpha; beta still accepts it
        stream.add_message("beta", "once").unwrap();
    }

    #[test]
    fn test_partition_count_and_names() {
        let stream = two_partitions();
        assert_eq!(stream.partition_count(), 2);
        assert_eq!(stream.partition_names(), vec!["alpha", "beta"]);
        assert!(stream.contains_partition("alpha"));
        assert!(!stream.contains_partition("gamma"));
    }

    #[test]
    fn test_empty_partition_read() {
        let mut stream = two_partitions();
        let messages = stream.read_messages("alpha", 0, 0).unwrap();
        assert!(messages.is_empty());
    }

    #[test]
    fn test_partition_kind() {
        let stream = two_partitions();
        assert_eq!(
            stream.partition_kind("alpha").unwrap(),
            StreamKind::InMemory
        );
    }

    #[test]
    fn test_dispose_is_repeatable() {
        let mut stream = two_partitions();
        stream.dispose().unwrap();
        stream.dispose().unwrap();
    }

    #[test]
    fn test_mixed_partition_kinds() {
        use durable_stream::DurableStream;
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let path = dir.path().join("audit.log");

        let mut partitions: HashMap<String, Box<dyn MessageStream>> = HashMap::new();
        partitions.insert(
            "hot".to_string(),
            Box::new(BoundedStream::new(3, 10).unwrap()),
        );
        partitions.insert(
            "audit".to_string(),
            Box::new(DurableStream::create(3, 10, &path).unwrap()),
        );
        let mut stream = PartitionStream::from_partitions(partitions);

        stream.add_message("hot", "ephemeral").unwrap();
        stream.add_message("audit", "recorded").unwrap();

        assert_eq!(stream.partition_kind("hot").unwrap(), StreamKind::InMemory);
        assert_eq!(stream.partition_kind("audit").unwrap(), StreamKind::Durable);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap().lines().count(),
            1
        );

        // Dispose releases the durable partition's file handle
        stream.dispose().unwrap();
        assert!(matches!(
            stream.add_message("audit", "late"),
            Err(PartitionError::Stream(StreamError::Io(_)))
        ));
        // In-memory partitions are unaffected by dispose
        stream.add_message("hot", "still-works").unwrap();
    }
}
