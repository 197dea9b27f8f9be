//! Stream Integration Test Utilities
//!
//! Shared helpers for cross-crate stream tests.
//!
//! ## Test Philosophy
//!
//! - **Properties, not snapshots**: tests assert the documented stream
//!   invariants (capacity, budget, uniqueness, ordering, durability, fan-out)
//! - **Real files**: durable-stream tests run against temp-dir files, never
//!   mocks
//! - **Deterministic**: no clocks, no threads, no randomness beyond
//!   generated file names

use partition_stream::{NotifyingPartitionStream, Subscriber, SubscriberError};
use std::collections::HashMap;
use stream_core::{BoundedStream, MessageStream};

/// Builds an in-memory partition map from `(name, capacity, operation_limit)`
/// triples.
pub fn memory_partitions(specs: &[(&str, usize, u32)]) -> HashMap<String, Box<dyn MessageStream>> {
    let mut partitions: HashMap<String, Box<dyn MessageStream>> = HashMap::new();
    for (name, capacity, limit) in specs {
        partitions.insert(
            name.to_string(),
            Box::new(BoundedStream::new(*capacity, *limit).expect("valid test config")),
        );
    }
    partitions
}

/// Builds a notifying stream over in-memory partitions.
pub fn notifying_stream(specs: &[(&str, usize, u32)]) -> NotifyingPartitionStream {
    NotifyingPartitionStream::from_partitions(memory_partitions(specs))
}

/// Subscriber that succeeds a fixed number of times, then fails.
pub struct FlakySubscriber {
    successes_left: usize,
}

impl FlakySubscriber {
    pub fn failing_after(successes: usize) -> Self {
        Self {
            successes_left: successes,
        }
    }
}

impl Subscriber for FlakySubscriber {
    fn new_message(&mut self, _message: &str) -> Result<(), SubscriberError> {
        if self.successes_left == 0 {
            return Err(SubscriberError::new("budget of successes exhausted"));
        }
        self.successes_left -= 1;
        Ok(())
    }
}
