//! Fan-out Integration Tests
//!
//! Validates subscriber notification semantics across the full composition:
//! exactly-once delivery per registered subscriber, registration order,
//! removal taking effect going forward, and the all-or-nothing abort when a
//! subscriber fails.

use partition_stream::PartitionError;
use stream_console::subscribers::RecordingSubscriber;
use tests_streams::{notifying_stream, FlakySubscriber};

#[test]
fn test_each_subscriber_notified_exactly_once_in_order() {
    let mut stream = notifying_stream(&[("p", 5, 10)]);

    let s1 = RecordingSubscriber::new();
    let s2 = RecordingSubscriber::new();
    let log1 = s1.log_handle();
    let log2 = s2.log_handle();
    stream.add_subscriber(Box::new(s1));
    stream.add_subscriber(Box::new(s2));

    stream.add_message("p", "x").unwrap();

    assert_eq!(*log1.borrow(), vec!["x"]);
    assert_eq!(*log2.borrow(), vec!["x"]);
}

#[test]
fn test_removed_subscriber_misses_later_appends() {
    let mut stream = notifying_stream(&[("p", 5, 10)]);

    let s1 = RecordingSubscriber::new();
    let s2 = RecordingSubscriber::new();
    let log1 = s1.log_handle();
    let log2 = s2.log_handle();
    stream.add_subscriber(Box::new(s1));
    let id2 = stream.add_subscriber(Box::new(s2));

    stream.add_message("p", "both").unwrap();
    assert!(stream.remove_subscriber(id2));
    stream.add_message("p", "only-s1").unwrap();

    assert_eq!(*log1.borrow(), vec!["both", "only-s1"]);
    assert_eq!(*log2.borrow(), vec!["both"]);
}

#[test]
fn test_unknown_partition_triggers_no_notifications() {
    let mut stream = notifying_stream(&[("p", 5, 10)]);

    let recorder = RecordingSubscriber::new();
    let log = recorder.log_handle();
    stream.add_subscriber(Box::new(recorder));

    assert!(matches!(
        stream.add_message("nope", "x"),
        Err(PartitionError::UnknownPartition(_))
    ));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_empty_partition_reads_empty() {
    let mut stream = notifying_stream(&[("p", 5, 10)]);
    let messages = stream.read_messages("p", 0, 0).unwrap();
    assert!(messages.is_empty());
}

#[test]
fn test_failing_subscriber_aborts_batch_but_append_stands() {
    let mut stream = notifying_stream(&[("p", 5, 10)]);

    let first = RecordingSubscriber::new();
    let last = RecordingSubscriber::new();
    let first_log = first.log_handle();
    let last_log = last.log_handle();

    stream.add_subscriber(Box::new(first));
    let flaky = stream.add_subscriber(Box::new(FlakySubscriber::failing_after(1)));
    stream.add_subscriber(Box::new(last));

    // First broadcast succeeds end to end
    stream.add_message("p", "fine").unwrap();
    assert_eq!(*first_log.borrow(), vec!["fine"]);
    assert_eq!(*last_log.borrow(), vec!["fine"]);

    // Second broadcast dies at the flaky subscriber
    let result = stream.add_message("p", "poison");
    assert!(matches!(
        result,
        Err(PartitionError::SubscriberRejected { id, .. }) if id == flaky
    ));
    assert_eq!(*first_log.borrow(), vec!["fine", "poison"]);
    assert_eq!(*last_log.borrow(), vec!["fine"]);

    // The message itself committed before fan-out
    assert_eq!(stream.message_count("p").unwrap(), 2);
}

#[test]
fn test_subscribers_span_partitions() {
    let mut stream = notifying_stream(&[("a", 5, 10), ("b", 5, 10)]);

    let recorder = RecordingSubscriber::new();
    let log = recorder.log_handle();
    stream.add_subscriber(Box::new(recorder));

    stream.add_message("a", "to-a").unwrap();
    stream.add_message("b", "to-b").unwrap();

    assert_eq!(*log.borrow(), vec!["to-a", "to-b"]);
}
