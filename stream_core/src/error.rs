//! Error types for stream operations

use thiserror::Error;

/// Errors surfaced by message-stream operations.
///
/// Every failure propagates synchronously to the immediate caller. None of
/// these are retried or logged internally; each is a precondition violation
/// the caller must avoid or handle.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Capacity or operation limit was zero at construction
    #[error("Invalid stream configuration: {0}")]
    InvalidConfig(String),

    /// Message is empty, too long, or contains an over-long token
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// An equal message is already stored in the stream
    #[error("Duplicate message: {0}")]
    DuplicateMessage(String),

    /// The fixed operation budget has been used up
    #[error("Operation limit of {limit} reached")]
    OperationLimitReached { limit: u32 },

    /// The stream already holds `capacity` messages
    #[error("Capacity of {capacity} reached")]
    CapacityReached { capacity: usize },

    /// Read window falls outside the stored messages
    #[error("Read range out of bounds: start {start}, count {count}, size {size}")]
    RangeOutOfBounds {
        start: usize,
        count: usize,
        size: usize,
    },

    /// Backing storage failed; fatal for the operation that hit it
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
