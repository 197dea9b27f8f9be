//! Bounded in-memory message stream and the [`MessageStream`] capability.
//!
//! A stream stores unique text messages in insertion order, up to a fixed
//! capacity, and permits a fixed number of append/read operations before it
//! must be reset. Both limits are set at construction and never change.

use crate::error::StreamError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum message length, in characters
pub const MAX_MESSAGE_CHARS: usize = 100;

/// Maximum length of a single space-delimited token, in characters
pub const MAX_TOKEN_CHARS: usize = 20;

/// Describes the storage backing a stream.
///
/// Callers that hold a `Box<dyn MessageStream>` use this descriptor for
/// diagnostics instead of inspecting the concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    /// Messages held in memory only
    InMemory,
    /// Messages mirrored to a backing file
    Durable,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::InMemory => write!(f, "in-memory"),
            StreamKind::Durable => write!(f, "durable"),
        }
    }
}

/// Capability interface for bounded message streams.
///
/// All operations are synchronous and single-threaded. Successful `append`
/// and `read` calls each consume one unit of the operation budget;
/// `reset`, `message_count`, and the other accessors never do.
pub trait MessageStream {
    /// Appends a message at the end of the stream.
    ///
    /// Checks run in a fixed order: message validation, duplicate detection,
    /// operation budget, capacity. The first failing check decides the error
    /// and nothing is committed.
    fn append(&mut self, message: &str) -> Result<(), StreamError>;

    /// Returns the messages in `[start, start + count)` in stored order.
    ///
    /// Consumes one budget unit regardless of `count`.
    fn read(&mut self, start: usize, count: usize) -> Result<Vec<String>, StreamError>;

    /// Clears all messages and zeroes the used-operation counter.
    ///
    /// Capacity and operation limit are preserved. Consumes no budget.
    fn reset(&mut self) -> Result<(), StreamError>;

    /// Returns the number of stored messages. Consumes no budget.
    fn message_count(&self) -> usize;

    /// Returns the fixed capacity
    fn capacity(&self) -> usize;

    /// Returns the fixed operation limit
    fn operation_limit(&self) -> u32;

    /// Returns how many budget units have been consumed
    fn operations_used(&self) -> u32;

    /// Returns the storage descriptor for this stream
    fn kind(&self) -> StreamKind;

    /// Returns an independent copy with identical limits, counters, and
    /// messages. Mutating the copy never affects the original.
    fn deep_copy(&self) -> Result<Box<dyn MessageStream>, StreamError>;

    /// Releases any held resources without discarding stored state.
    ///
    /// Idempotent. In-memory streams hold no resources, so the default
    /// implementation does nothing.
    fn dispose(&mut self) -> Result<(), StreamError> {
        Ok(())
    }
}

/// Fixed-capacity, operation-budgeted, duplicate-free in-memory stream.
#[derive(Debug, Clone)]
pub struct BoundedStream {
    messages: Vec<String>,
    capacity: usize,
    operation_limit: u32,
    operations_used: u32,
}

impl BoundedStream {
    /// Creates an empty stream with the given capacity and operation limit.
    ///
    /// Both must be greater than zero.
    pub fn new(capacity: usize, operation_limit: u32) -> Result<Self, StreamError> {
        if capacity == 0 {
            return Err(StreamError::InvalidConfig(
                "Capacity must be greater than 0".to_string(),
            ));
        }
        if operation_limit == 0 {
            return Err(StreamError::InvalidConfig(
                "Operation limit must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            messages: Vec::with_capacity(capacity),
            capacity,
            operation_limit,
            operations_used: 0,
        })
    }

    /// Runs every append precondition without committing anything.
    ///
    /// File-backed streams call this before touching their backing storage,
    /// so a message is only written out once it is known to be admissible.
    pub fn check_append(&self, message: &str) -> Result<(), StreamError> {
        validate_message(message)?;
        if self.messages.iter().any(|m| m == message) {
            return Err(StreamError::DuplicateMessage(message.to_string()));
        }
        if self.operations_used >= self.operation_limit {
            return Err(StreamError::OperationLimitReached {
                limit: self.operation_limit,
            });
        }
        if self.messages.len() >= self.capacity {
            return Err(StreamError::CapacityReached {
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    /// Appends a message, consuming one budget unit on success.
    pub fn append(&mut self, message: &str) -> Result<(), StreamError> {
        self.check_append(message)?;
        self.messages.push(message.to_string());
        self.operations_used += 1;
        Ok(())
    }

    /// Returns the messages in `[start, start + count)`, consuming one
    /// budget unit.
    pub fn read(&mut self, start: usize, count: usize) -> Result<Vec<String>, StreamError> {
        if self.operations_used >= self.operation_limit {
            return Err(StreamError::OperationLimitReached {
                limit: self.operation_limit,
            });
        }
        let end = start
            .checked_add(count)
            .filter(|end| *end <= self.messages.len())
            .ok_or(StreamError::RangeOutOfBounds {
                start,
                count,
                size: self.messages.len(),
            })?;
        let result = self.messages[start..end].to_vec();
        self.operations_used += 1;
        Ok(result)
    }

    /// Clears all messages and zeroes the used-operation counter.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.operations_used = 0;
    }

    /// Returns the number of stored messages
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Returns the fixed capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the fixed operation limit
    pub fn operation_limit(&self) -> u32 {
        self.operation_limit
    }

    /// Returns how many budget units have been consumed
    pub fn operations_used(&self) -> u32 {
        self.operations_used
    }

    /// Returns the stored messages in order.
    ///
    /// Diagnostic accessor; consumes no budget.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Loads a message during rehydration.
    ///
    /// Skips validation, duplicate detection, and budget accounting: the
    /// backing file is trusted local state, not external input. Returns
    /// `false` once the stream is at capacity, in which case the message is
    /// not stored and the caller should stop loading.
    pub fn restore(&mut self, message: impl Into<String>) -> bool {
        if self.messages.len() >= self.capacity {
            return false;
        }
        self.messages.push(message.into());
        true
    }
}

impl MessageStream for BoundedStream {
    fn append(&mut self, message: &str) -> Result<(), StreamError> {
        BoundedStream::append(self, message)
    }

    fn read(&mut self, start: usize, count: usize) -> Result<Vec<String>, StreamError> {
        BoundedStream::read(self, start, count)
    }

    fn reset(&mut self) -> Result<(), StreamError> {
        BoundedStream::reset(self);
        Ok(())
    }

    fn message_count(&self) -> usize {
        BoundedStream::message_count(self)
    }

    fn capacity(&self) -> usize {
        BoundedStream::capacity(self)
    }

    fn operation_limit(&self) -> u32 {
        BoundedStream::operation_limit(self)
    }

    fn operations_used(&self) -> u32 {
        BoundedStream::operations_used(self)
    }

    fn kind(&self) -> StreamKind {
        StreamKind::InMemory
    }

    fn deep_copy(&self) -> Result<Box<dyn MessageStream>, StreamError> {
        Ok(Box::new(self.clone()))
    }
}

/// Validates message content: non-empty, at most [`MAX_MESSAGE_CHARS`]
/// characters, no space-delimited token longer than [`MAX_TOKEN_CHARS`].
fn validate_message(message: &str) -> Result<(), StreamError> {
    if message.is_empty() {
        return Err(StreamError::InvalidMessage(
            "Message cannot be empty".to_string(),
        ));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(StreamError::InvalidMessage(format!(
            "Message exceeds {} characters",
            MAX_MESSAGE_CHARS
        )));
    }
    for token in message.split(' ') {
        if token.chars().count() > MAX_TOKEN_CHARS {
            return Err(StreamError::InvalidMessage(format!(
                "Token '{}' exceeds {} characters",
                token, MAX_TOKEN_CHARS
            )));
        }
    }
    Ok(())
}
