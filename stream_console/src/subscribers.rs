//! Example subscribers for the demo driver.

use partition_stream::{Subscriber, SubscriberError};
use std::cell::RefCell;
use std::rc::Rc;

/// Prints every received message to stdout, tagged with its name.
pub struct ConsoleSubscriber {
    name: String,
}

impl ConsoleSubscriber {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Subscriber for ConsoleSubscriber {
    fn new_message(&mut self, message: &str) -> Result<(), SubscriberError> {
        println!("[{}] received: {}", self.name, message);
        Ok(())
    }
}

/// Appends every received message to a shared log.
///
/// The subscriber itself is boxed away inside the notifying stream, so
/// callers keep a handle to the log instead.
pub struct RecordingSubscriber {
    log: Rc<RefCell<Vec<String>>>,
}

impl RecordingSubscriber {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Returns a handle to the delivery log
    pub fn log_handle(&self) -> Rc<RefCell<Vec<String>>> {
        self.log.clone()
    }
}

impl Default for RecordingSubscriber {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscriber for RecordingSubscriber {
    fn new_message(&mut self, message: &str) -> Result<(), SubscriberError> {
        self.log.borrow_mut().push(message.to_string());
        Ok(())
    }
}
