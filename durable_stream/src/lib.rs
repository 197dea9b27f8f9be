//! # Durable Stream
//!
//! A file-backed bounded message stream.
//!
//! ## Philosophy
//!
//! - **Composition over inheritance**: a [`DurableStream`] wraps a
//!   [`BoundedStream`] and mirrors every committed mutation to a backing file
//! - **Write before commit**: a message reaches the file before it reaches
//!   memory, so an I/O failure never leaves the two out of sync
//! - **Rehydration**: constructing over an existing file reloads its lines,
//!   in file order, up to capacity
//!
//! ## Backing file format
//!
//! UTF-8 text, one message per line, newline-terminated. The file is
//! append-only during normal operation and recreated empty on reset. A
//! missing file at construction means "start empty", not an error.

use log::debug;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use stream_core::{BoundedStream, MessageStream, StreamError, StreamKind};
use uuid::Uuid;

/// Bounded message stream whose state survives in a backing file.
///
/// The stream exclusively owns its file; no other process or thread may
/// touch it while the stream is alive.
#[derive(Debug)]
pub struct DurableStream {
    inner: BoundedStream,
    path: PathBuf,
    writer: Option<File>,
}

impl DurableStream {
    /// Opens a durable stream over `path`.
    ///
    /// Creates the file if absent. If the file already exists, its lines are
    /// loaded into memory in file order, stopping at capacity; surplus lines
    /// stay in the file untouched. Rehydration consumes no operation budget.
    pub fn create(
        capacity: usize,
        operation_limit: u32,
        path: impl Into<PathBuf>,
    ) -> Result<Self, StreamError> {
        let path = path.into();
        let mut inner = BoundedStream::new(capacity, operation_limit)?;

        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            let mut loaded = 0usize;
            for line in reader.lines() {
                if !inner.restore(line?) {
                    break;
                }
                loaded += 1;
            }
            debug!("rehydrated {} message(s) from {}", loaded, path.display());
        }

        let writer = Self::open_writer(&path)?;
        Ok(Self {
            inner,
            path,
            writer: Some(writer),
        })
    }

    fn open_writer(path: &Path) -> Result<File, StreamError> {
        Ok(OpenOptions::new().create(true).append(true).open(path)?)
    }

    /// Returns the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a message, writing it to the backing file first.
    ///
    /// All in-memory preconditions are checked before the file is touched;
    /// a file write failure surfaces as [`StreamError::Io`] and leaves the
    /// in-memory state unchanged.
    pub fn append(&mut self, message: &str) -> Result<(), StreamError> {
        self.inner.check_append(message)?;

        let writer = self.writer.as_mut().ok_or_else(disposed_error)?;
        writeln!(writer, "{}", message)?;
        writer.flush()?;

        // Cannot fail: every precondition held above and nothing has
        // changed in between.
        self.inner.append(message)
    }

    /// Returns the messages in `[start, start + count)`, consuming one
    /// budget unit.
    pub fn read(&mut self, start: usize, count: usize) -> Result<Vec<String>, StreamError> {
        self.inner.read(start, count)
    }

    /// Clears all state and replaces the backing file with an empty one.
    ///
    /// The file handle is reopened, so the stream is usable again even after
    /// [`dispose`](Self::dispose).
    pub fn reset(&mut self) -> Result<(), StreamError> {
        self.inner.reset();
        self.writer = None;
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        self.writer = Some(Self::open_writer(&self.path)?);
        debug!("reset durable stream at {}", self.path.display());
        Ok(())
    }

    /// Returns the number of stored messages. Consumes no budget.
    pub fn message_count(&self) -> usize {
        self.inner.message_count()
    }

    /// Creates an independent durable copy at a derived sibling path.
    ///
    /// The copy gets a fresh `.copy-<suffix>` file of its own (a generated
    /// suffix, so repeated copies never collide or pick up a predecessor's
    /// stale file), seeded with the current in-memory messages and counters.
    /// The copy's owner is responsible for the new file's lifecycle.
    pub fn deep_copy(&self) -> Result<DurableStream, StreamError> {
        let copy_path = self.derived_copy_path();

        let mut seed = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&copy_path)?;
        for message in self.inner.messages() {
            writeln!(seed, "{}", message)?;
        }
        seed.flush()?;
        drop(seed);

        let writer = Self::open_writer(&copy_path)?;
        debug!(
            "deep-copied durable stream {} -> {}",
            self.path.display(),
            copy_path.display()
        );
        Ok(DurableStream {
            inner: self.inner.clone(),
            path: copy_path,
            writer: Some(writer),
        })
    }

    fn derived_copy_path(&self) -> PathBuf {
        let suffix = Uuid::new_v4().simple().to_string();
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".copy-{}", &suffix[..8]));
        PathBuf::from(name)
    }

    /// Releases the file handle without altering file content.
    ///
    /// Idempotent. Appends fail after disposal; `reset` reopens the handle.
    pub fn dispose(&mut self) -> Result<(), StreamError> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
            debug!("disposed durable stream at {}", self.path.display());
        }
        Ok(())
    }
}

fn disposed_error() -> StreamError {
    StreamError::Io(io::Error::new(
        io::ErrorKind::Other,
        "stream has been disposed",
    ))
}

impl MessageStream for DurableStream {
    fn append(&mut self, message: &str) -> Result<(), StreamError> {
        DurableStream::append(self, message)
    }

    fn read(&mut self, start: usize, count: usize) -> Result<Vec<String>, StreamError> {
        DurableStream::read(self, start, count)
    }

    fn reset(&mut self) -> Result<(), StreamError> {
        DurableStream::reset(self)
    }

    fn message_count(&self) -> usize {
        DurableStream::message_count(self)
    }

    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn operation_limit(&self) -> u32 {
        self.inner.operation_limit()
    }

    fn operations_used(&self) -> u32 {
        self.inner.operations_used()
    }

    fn kind(&self) -> StreamKind {
        StreamKind::Durable
    }

    fn deep_copy(&self) -> Result<Box<dyn MessageStream>, StreamError> {
        Ok(Box::new(DurableStream::deep_copy(self)?))
    }

    fn dispose(&mut self) -> Result<(), StreamError> {
        DurableStream::dispose(self)
    }
}
