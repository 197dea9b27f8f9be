//! # Stream Core
//!
//! Core types for bounded message streams.
//!
//! ## Philosophy
//!
//! - **Capability over inheritance**: stream variants implement the
//!   [`MessageStream`] trait and are composed, never subclassed
//! - **Explicit budgets**: every stream carries a fixed capacity and a fixed
//!   operation limit, both set at construction
//! - **Errors are values**: every failure mode has a variant in
//!   [`StreamError`]; nothing is logged or swallowed internally
//! - **Deterministic**: no clocks, no threads, no hidden state
//!
//! ## Example
//!
//! ```
//! use stream_core::{BoundedStream, MessageStream};
//!
//! let mut stream = BoundedStream::new(5, 10).unwrap();
//! stream.append("hello").unwrap();
//! stream.append("world").unwrap();
//!
//! let messages = stream.read(0, 2).unwrap();
//! assert_eq!(messages, vec!["hello", "world"]);
//! ```

pub mod bounded;
pub mod config;
pub mod error;
pub mod ids;

pub use bounded::{BoundedStream, MessageStream, StreamKind, MAX_MESSAGE_CHARS, MAX_TOKEN_CHARS};
pub use config::{
    ManifestError, PartitionManifest, PartitionSpec, StreamConfig, PARTITION_MANIFEST_NAME,
};
pub use error::StreamError;
pub use ids::SubscriberId;
