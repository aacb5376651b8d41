//! Receive tests: timeout translation, wait-forever polling, no-wait pops.

use redis_queue::{Consumer, Context, Destination, Message, QueueError, WAIT_FOREVER_CHUNK_SECS};

use crate::support::{blocking_pop, Call, Reply, ScriptedBroker};

// ============================================================================
// receive(timeout > 0): one bounded blocking pop
// ============================================================================

#[test]
fn receive_returns_none_when_queue_is_empty() {
    let broker = ScriptedBroker::new().reply_empty();
    let mut consumer = Context::new(broker.clone()).create_consumer(Destination::new("aQueue"));

    assert_eq!(consumer.receive(2000).unwrap(), None);
    assert_eq!(broker.calls(), vec![blocking_pop("aQueue", 2)]);
}

#[test]
fn receive_returns_decoded_message() {
    let broker = ScriptedBroker::new().reply_message(&Message::new("aBody"));
    let mut consumer = Context::new(broker.clone()).create_consumer(Destination::new("aQueue"));

    let message = consumer.receive(2000).unwrap().unwrap();
    assert_eq!(message.body(), Some("aBody"));
    assert!(!message.is_redelivered());
    assert_eq!(broker.calls(), vec![blocking_pop("aQueue", 2)]);
}

#[test]
fn receive_rounds_timeout_up_to_whole_seconds() {
    let broker = ScriptedBroker::new();
    let mut consumer = Context::new(broker.clone()).create_consumer(Destination::new("aQueue"));

    consumer.receive(1).unwrap();
    consumer.receive(999).unwrap();
    consumer.receive(1000).unwrap();
    consumer.receive(1001).unwrap();
    consumer.receive(2500).unwrap();

    assert_eq!(
        broker.calls(),
        vec![
            blocking_pop("aQueue", 1),
            blocking_pop("aQueue", 1),
            blocking_pop("aQueue", 1),
            blocking_pop("aQueue", 2),
            blocking_pop("aQueue", 3),
        ]
    );
}

#[test]
fn receive_preserves_properties_and_headers() {
    let mut sent = Message::new("aBody")
        .with_property("tenant", "acme")
        .with_header("content_type", "application/json");
    sent.set_correlation_id("corr-1");

    let broker = ScriptedBroker::new().reply_message(&sent);
    let mut consumer = Context::new(broker).create_consumer(Destination::new("aQueue"));

    assert_eq!(consumer.receive(1000).unwrap(), Some(sent));
}

// ============================================================================
// receive(0): wait forever in fixed chunks
// ============================================================================

#[test]
fn receive_zero_polls_in_five_second_chunks_until_message() {
    let broker = ScriptedBroker::new()
        .reply_empty()
        .reply_empty()
        .reply_message(&Message::new("aBody"));
    let mut consumer = Context::new(broker.clone()).create_consumer(Destination::new("aQueue"));

    let message = consumer.receive(0).unwrap().unwrap();

    assert_eq!(message.body(), Some("aBody"));
    assert_eq!(WAIT_FOREVER_CHUNK_SECS, 5);
    assert_eq!(
        broker.calls(),
        vec![
            blocking_pop("aQueue", 5),
            blocking_pop("aQueue", 5),
            blocking_pop("aQueue", 5),
        ]
    );
}

#[test]
fn receive_zero_stops_on_broker_failure() {
    let broker = ScriptedBroker::new()
        .reply_empty()
        .reply(Reply::Fail)
        .reply_message(&Message::new("never seen"));
    let mut consumer = Context::new(broker.clone()).create_consumer(Destination::new("aQueue"));

    let err = consumer.receive(0).unwrap_err();

    assert!(err.is_broker_unavailable());
    assert_eq!(broker.calls().len(), 2);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn negative_timeout_is_rejected_without_broker_call() {
    let broker = ScriptedBroker::new();
    let mut consumer = Context::new(broker.clone()).create_consumer(Destination::new("aQueue"));

    let err = consumer.receive(-1).unwrap_err();

    assert!(matches!(err, QueueError::InvalidArgument(_)));
    assert!(broker.calls().is_empty());
}

#[test]
fn malformed_payload_is_an_error_not_a_timeout() {
    let broker = ScriptedBroker::new().reply(Reply::Payload("{broken".into()));
    let mut consumer = Context::new(broker.clone()).create_consumer(Destination::new("aQueue"));

    let err = consumer.receive(1000).unwrap_err();

    assert!(err.is_malformed_envelope());
    assert_eq!(broker.calls().len(), 1);
}

#[test]
fn broker_failure_propagates_from_receive() {
    let broker = ScriptedBroker::new().reply(Reply::Fail);
    let mut consumer = Context::new(broker).create_consumer(Destination::new("aQueue"));

    assert!(consumer.receive(1000).unwrap_err().is_broker_unavailable());
}

// ============================================================================
// receive_no_wait: one non-blocking pop
// ============================================================================

#[test]
fn receive_no_wait_returns_none_when_empty() {
    let broker = ScriptedBroker::new().reply_empty();
    let mut consumer = Context::new(broker.clone()).create_consumer(Destination::new("aQueue"));

    assert_eq!(consumer.receive_no_wait().unwrap(), None);
    assert_eq!(broker.calls(), vec![Call::NonBlockingPop("aQueue".into())]);
}

#[test]
fn receive_no_wait_returns_decoded_message() {
    let broker = ScriptedBroker::new().reply_message(&Message::new("aBody"));
    let mut consumer = Context::new(broker.clone()).create_consumer(Destination::new("aQueue"));

    let message = consumer.receive_no_wait().unwrap().unwrap();

    assert_eq!(message.body(), Some("aBody"));
    assert_eq!(broker.calls(), vec![Call::NonBlockingPop("aQueue".into())]);
}

#[test]
fn receive_no_wait_surfaces_malformed_payload() {
    let broker = ScriptedBroker::new().reply(Reply::Payload("[]".into()));
    let mut consumer = Context::new(broker).create_consumer(Destination::new("aQueue"));

    assert!(consumer.receive_no_wait().unwrap_err().is_malformed_envelope());
}
