//! # Partition Stream
//!
//! Routing and fan-out over named bounded message streams.
//!
//! ## Philosophy
//!
//! - **Fixed partition set**: the name → stream mapping is sealed at
//!   construction; routing failures are explicit, never silent creation
//! - **Exclusive ownership**: each partition's stream is owned by exactly
//!   one [`PartitionStream`]; no aliasing once handed in
//! - **Unchanged propagation**: a delegated stream failure surfaces to the
//!   caller exactly as the stream raised it
//! - **Synchronous fan-out**: subscribers are notified one at a time, in
//!   registration order, only after an append has committed

pub mod notify;
pub mod partition;
pub mod subscriber;

pub use notify::NotifyingPartitionStream;
pub use partition::{PartitionError, PartitionStream};
pub use subscriber::{Subscriber, SubscriberError};
