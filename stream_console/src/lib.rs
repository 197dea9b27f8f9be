//! # Stream Console (Demo)
//!
//! This is a simple demonstration of wiring the stream crates together.
//! It carries no invariants of its own: manifest in, partitioned stream
//! out, results printed.

pub mod subscribers;

use partition_stream::{NotifyingPartitionStream, PartitionError};
use std::collections::HashMap;
use std::path::Path;
use stream_core::{
    BoundedStream, ManifestError, MessageStream, PartitionManifest, PartitionSpec, StreamConfig,
    StreamError, StreamKind,
};
use subscribers::{ConsoleSubscriber, RecordingSubscriber};
use thiserror::Error;

/// Errors surfaced while wiring or driving the demo.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error(transparent)]
    Stream(#[from] StreamError),
    #[error(transparent)]
    Partition(#[from] PartitionError),
}

/// Builds the owned partition streams a manifest declares.
///
/// Durable partition paths are resolved relative to `data_dir` unless
/// absolute.
pub fn build_partitions(
    manifest: &PartitionManifest,
    data_dir: &Path,
) -> Result<HashMap<String, Box<dyn MessageStream>>, ConsoleError> {
    manifest.validate()?;

    let mut partitions: HashMap<String, Box<dyn MessageStream>> = HashMap::new();
    for spec in &manifest.partitions {
        let stream: Box<dyn MessageStream> = match spec.kind {
            StreamKind::InMemory => Box::new(BoundedStream::new(
                spec.config.capacity,
                spec.config.operation_limit,
            )?),
            StreamKind::Durable => {
                // validate() guarantees durable specs carry a path
                let path = spec.path.clone().unwrap_or_default();
                let path = if path.is_absolute() {
                    path
                } else {
                    data_dir.join(path)
                };
                Box::new(durable_stream::DurableStream::create(
                    spec.config.capacity,
                    spec.config.operation_limit,
                    path,
                )?)
            }
        };
        partitions.insert(spec.name.clone(), stream);
    }
    Ok(partitions)
}

/// Bootstrap function.
///
/// Wires a notifying partitioned stream from the default demo manifest:
/// one in-memory partition and one durable partition under `data_dir`.
pub fn bootstrap(data_dir: &Path) -> Result<NotifyingPartitionStream, ConsoleError> {
    let manifest = PartitionManifest::new(vec![
        PartitionSpec::in_memory("partition1", StreamConfig::new(5, 10)),
        PartitionSpec::durable("partition2", StreamConfig::new(5, 10), "messages.txt"),
    ]);
    let partitions = build_partitions(&manifest, data_dir)?;
    Ok(NotifyingPartitionStream::from_partitions(partitions))
}

/// Demo function showing the full stream lifecycle.
///
/// Appends to both partitions, reads back, broadcasts to subscribers,
/// removes one subscriber, and releases everything.
pub fn demo() -> Result<(), ConsoleError> {
    let data_dir = tempfile::tempdir().map_err(StreamError::from)?;
    let mut stream = bootstrap(data_dir.path())?;

    let recorder = RecordingSubscriber::new();
    let log = recorder.log_handle();
    let _console = stream.add_subscriber(Box::new(ConsoleSubscriber::new("subscriber1")));
    let recorder_id = stream.add_subscriber(Box::new(recorder));

    stream.add_message("partition1", "Message to partition1")?;
    stream.add_message("partition2", "Message to partition2")?;

    println!("partition1 messages:");
    for message in stream.read_messages("partition1", 0, 1)? {
        println!("  {}", message);
    }

    println!("recorded {} broadcast(s)", log.borrow().len());

    stream.remove_subscriber(recorder_id);
    stream.add_message("partition1", "Message after removal")?;

    for name in stream.partition_names() {
        println!(
            "partition {} ({}): {} message(s)",
            name,
            stream.partition_kind(&name)?,
            stream.message_count(&name)?
        );
    }

    stream.dispose()?;
    println!("Demo completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_builds_both_partitions() {
        let dir = tempfile::tempdir().unwrap();
        let stream = bootstrap(dir.path()).unwrap();

        assert_eq!(stream.partition_count(), 2);
        assert_eq!(
            stream.partition_kind("partition1").unwrap(),
            StreamKind::InMemory
        );
        assert_eq!(
            stream.partition_kind("partition2").unwrap(),
            StreamKind::Durable
        );
        assert!(dir.path().join("messages.txt").exists());
    }

    #[test]
    fn test_build_partitions_rejects_invalid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = PartitionManifest::new(vec![
            PartitionSpec::in_memory("p", StreamConfig::new(1, 1)),
            PartitionSpec::in_memory("p", StreamConfig::new(1, 1)),
        ]);
        assert!(matches!(
            build_partitions(&manifest, dir.path()),
            Err(ConsoleError::Manifest(ManifestError::DuplicatePartition(_)))
        ));
    }

    #[test]
    fn test_demo() {
        // Just verify the full scenario runs without failing
        demo().unwrap();
    }
}
