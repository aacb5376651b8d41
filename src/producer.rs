//! Producer trait and the list-push implementation.

use std::sync::Arc;

use tracing::debug;

use crate::broker::Broker;
use crate::codec;
use crate::destination::Destination;
use crate::error::QueueError;
use crate::message::Message;

/// Trait for sending messages to a named queue.
pub trait Producer: Send + Sync {
    /// Send a message to the destination's queue.
    fn send(&self, destination: &Destination, message: &Message) -> Result<(), QueueError>;
}

/// Producer that encodes a message and pushes it onto the destination's list.
///
/// Holds nothing but the broker handle, so it can be cloned and shared.
pub struct QueueProducer<B: Broker> {
    broker: Arc<B>,
}

impl<B: Broker> QueueProducer<B> {
    /// Create a producer over the given broker handle.
    pub fn new(broker: Arc<B>) -> Self {
        Self { broker }
    }
}

impl<B: Broker> Clone for QueueProducer<B> {
    fn clone(&self) -> Self {
        Self {
            broker: Arc::clone(&self.broker),
        }
    }
}

impl<B: Broker> Producer for QueueProducer<B> {
    fn send(&self, destination: &Destination, message: &Message) -> Result<(), QueueError> {
        let payload = codec::encode(message)?;
        self.broker.push(destination.name(), payload)?;
        debug!(queue = destination.name(), "message sent");
        Ok(())
    }
}
