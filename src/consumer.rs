//! Consumer trait and the list-pop implementation.
//!
//! `receive` maps a caller timeout onto `BRPOP`-style calls:
//!
//! - `timeout_ms > 0`: one blocking pop bounded to `ceil(timeout_ms / 1000)`
//!   seconds. Sub-second timeouts round up to one second.
//! - `timeout_ms == 0`: wait forever, as a loop of blocking pops bounded to
//!   [`WAIT_FOREVER_CHUNK_SECS`] each. The loop ends when a message arrives
//!   or a broker call fails (for example after `Context::close`).
//!
//! Acknowledge is a no-op because the pop already removed the message.
//! Reject with requeue sends the same message again, so it lands at the tail.

use tracing::{debug, trace, warn};

use crate::broker::{Broker, PopResult};
use crate::codec;
use crate::context::Context;
use crate::destination::Destination;
use crate::error::QueueError;
use crate::message::Message;
use crate::producer::Producer;

/// Bound on each blocking pop while waiting indefinitely.
pub const WAIT_FOREVER_CHUNK_SECS: u64 = 5;

/// Trait for receiving messages from a single queue (point-to-point).
///
/// Receives take `&mut self`: a consumer serves one caller at a time.
pub trait Consumer {
    /// The queue this consumer reads from.
    fn queue(&self) -> &Destination;

    /// Receive the next message, blocking up to `timeout_ms` milliseconds.
    /// A timeout of 0 waits indefinitely. Negative timeouts are rejected.
    fn receive(&mut self, timeout_ms: i64) -> Result<Option<Message>, QueueError>;

    /// Receive the next message if one is waiting, without blocking.
    fn receive_no_wait(&mut self) -> Result<Option<Message>, QueueError>;

    /// Confirm a message has been processed.
    fn acknowledge(&self, message: &Message) -> Result<(), QueueError>;

    /// Give up on a message. With `requeue`, the message is sent back to
    /// this consumer's queue.
    fn reject(&self, message: &Message, requeue: bool) -> Result<(), QueueError>;
}

/// Consumer bound to one queue on one broker connection.
pub struct QueueConsumer<B: Broker> {
    context: Context<B>,
    queue: Destination,
}

impl<B: Broker> QueueConsumer<B> {
    /// Create a consumer for `queue`. Usually obtained via
    /// [`Context::create_consumer`].
    pub fn new(context: Context<B>, queue: Destination) -> Self {
        Self { context, queue }
    }

    fn wait_forever(&self) -> Result<PopResult, QueueError> {
        let queues = [self.queue.name()];
        loop {
            if let Some(result) = self
                .context
                .broker()
                .blocking_pop(&queues, WAIT_FOREVER_CHUNK_SECS)?
            {
                return Ok(result);
            }
            trace!(queue = self.queue.name(), "no message yet, polling again");
        }
    }

    fn decode(&self, payload: &str) -> Result<Message, QueueError> {
        codec::decode(payload).inspect_err(|err| {
            warn!(queue = self.queue.name(), error = %err, "dropped undecodable payload");
        })
    }
}

impl<B: Broker> Consumer for QueueConsumer<B> {
    fn queue(&self) -> &Destination {
        &self.queue
    }

    fn receive(&mut self, timeout_ms: i64) -> Result<Option<Message>, QueueError> {
        let timeout_ms = u64::try_from(timeout_ms).map_err(|_| {
            QueueError::InvalidArgument(format!(
                "receive timeout must not be negative, got {}ms",
                timeout_ms
            ))
        })?;

        let popped = if timeout_ms == 0 {
            Some(self.wait_forever()?)
        } else {
            let timeout_secs = timeout_ms.div_ceil(1000);
            self.context
                .broker()
                .blocking_pop(&[self.queue.name()], timeout_secs)?
        };

        match popped {
            Some(result) => {
                debug!(queue = %result.queue_name, "message received");
                self.decode(&result.payload).map(Some)
            }
            None => {
                debug!(queue = self.queue.name(), timeout_ms, "receive timed out");
                Ok(None)
            }
        }
    }

    fn receive_no_wait(&mut self) -> Result<Option<Message>, QueueError> {
        match self.context.broker().non_blocking_pop(self.queue.name())? {
            Some(payload) => self.decode(&payload).map(Some),
            None => Ok(None),
        }
    }

    fn acknowledge(&self, _message: &Message) -> Result<(), QueueError> {
        Ok(())
    }

    fn reject(&self, message: &Message, requeue: bool) -> Result<(), QueueError> {
        if requeue {
            self.context.create_producer().send(&self.queue, message)?;
            debug!(queue = self.queue.name(), "message requeued");
        }
        Ok(())
    }
}
