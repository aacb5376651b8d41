//! Context - owns the broker handle and creates queue-bound objects.

use std::sync::Arc;

use crate::broker::Broker;
use crate::consumer::QueueConsumer;
use crate::destination::Destination;
use crate::error::QueueError;
use crate::message::Message;
use crate::producer::QueueProducer;

/// Context - wraps one broker connection for an application.
///
/// The broker handle is passed in explicitly and shared with every producer
/// and consumer created here. A blocking pop occupies the connection, so
/// give each concurrently receiving worker its own context.
///
/// Cloning a context, or calling `create_consumer` more than once, shares
/// the same connection. `&mut self` on `receive` serializes calls on one
/// consumer only; it does not stop two consumers from one context from
/// blocking on the same connection at once.
///
/// ## Example
///
/// ```
/// use redis_queue::broker::InMemoryBroker;
/// use redis_queue::{Consumer, Context, Producer};
///
/// let context = Context::new(InMemoryBroker::new());
/// let queue = context.create_queue("orders").unwrap();
///
/// context
///     .create_producer()
///     .send(&queue, &context.create_message("order-1"))
///     .unwrap();
///
/// let mut consumer = context.create_consumer(queue);
/// let message = consumer.receive(1000).unwrap().unwrap();
/// assert_eq!(message.body(), Some("order-1"));
/// consumer.acknowledge(&message).unwrap();
/// ```
pub struct Context<B: Broker> {
    broker: Arc<B>,
}

impl<B: Broker> Context<B> {
    /// Create a context that owns the given broker handle.
    pub fn new(broker: B) -> Self {
        Self::from_shared(Arc::new(broker))
    }

    /// Create a context over an already shared broker handle.
    pub fn from_shared(broker: Arc<B>) -> Self {
        Self { broker }
    }

    /// Get a reference to the underlying broker.
    pub fn broker(&self) -> &B {
        &self.broker
    }

    /// Create a message with the given body.
    pub fn create_message(&self, body: impl Into<String>) -> Message {
        Message::new(body)
    }

    /// Create a queue destination. The name must not be empty.
    pub fn create_queue(&self, name: impl Into<String>) -> Result<Destination, QueueError> {
        let name = name.into();
        if name.is_empty() {
            return Err(QueueError::InvalidArgument(
                "queue name must not be empty".into(),
            ));
        }
        Ok(Destination::new(name))
    }

    /// Create a topic destination. Lists have no fan-out, so a topic is a
    /// queue under another name.
    pub fn create_topic(&self, name: impl Into<String>) -> Result<Destination, QueueError> {
        self.create_queue(name)
    }

    pub fn create_producer(&self) -> QueueProducer<B> {
        QueueProducer::new(Arc::clone(&self.broker))
    }

    /// Create a consumer bound to `queue` on this context's connection.
    pub fn create_consumer(&self, queue: Destination) -> QueueConsumer<B> {
        QueueConsumer::new(self.clone(), queue)
    }

    /// Drop everything waiting on the queue.
    pub fn purge_queue(&self, queue: &Destination) -> Result<(), QueueError> {
        self.broker.delete(queue.name())
    }

    /// Delete the queue from the broker.
    pub fn delete_queue(&self, queue: &Destination) -> Result<(), QueueError> {
        self.broker.delete(queue.name())
    }

    /// Close the broker connection. Consumers blocked in `receive` return
    /// `BrokerUnavailable`.
    pub fn close(&self) -> Result<(), QueueError> {
        self.broker.disconnect()
    }
}

impl<B: Broker> Clone for Context<B> {
    fn clone(&self) -> Self {
        Self {
            broker: Arc::clone(&self.broker),
        }
    }
}
