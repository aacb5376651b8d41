//! Broker capability - the list primitives consumers and producers run on.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Context (per connection)                    │
//! │  - create_consumer() / create_producer() / purge_queue()    │
//! └─────────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Broker Trait                           │
//! │  blocking_pop(queues, secs) / non_blocking_pop(queue)       │
//! │  push(queue, payload) / delete(queue) / disconnect()        │
//! └─────────────────────────────────────────────────────────────┘
//!          │                                  │
//!          ▼                                  ▼
//! ┌─────────────────┐              ┌─────────────────────────┐
//! │ InMemoryBroker  │              │ Redis client (BRPOP,    │
//! │   (included)    │              │ RPOP, LPUSH, DEL)       │
//! └─────────────────┘              │      (external)         │
//!                                  └─────────────────────────┘
//! ```
//!
//! Implementations must keep "nothing arrived" (`Ok(None)`) apart from
//! connection failure (`Err(QueueError::BrokerUnavailable)`). Consumers rely
//! on that to stop waiting forever once the connection is torn down.

#[cfg(feature = "memory")]
mod memory;

#[cfg(feature = "memory")]
pub use memory::InMemoryBroker;

use crate::error::QueueError;

/// Result of a successful blocking pop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopResult {
    /// The list the payload was taken from.
    pub queue_name: String,
    /// The raw envelope.
    pub payload: String,
}

impl PopResult {
    pub fn new(queue_name: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            queue_name: queue_name.into(),
            payload: payload.into(),
        }
    }
}

/// Trait for list-based brokers.
///
/// Producers append at the tail and consumers pop from the head, so each
/// list is FIFO. A call occupies the connection until it returns.
pub trait Broker: Send + Sync {
    /// Pop from the first non-empty list in `queue_names`, waiting up to
    /// `timeout_secs` seconds. Returns `Ok(None)` if the wait elapsed.
    fn blocking_pop(
        &self,
        queue_names: &[&str],
        timeout_secs: u64,
    ) -> Result<Option<PopResult>, QueueError>;

    /// Pop from `queue_name` without waiting.
    fn non_blocking_pop(&self, queue_name: &str) -> Result<Option<String>, QueueError>;

    /// Append `payload` to the tail of `queue_name`.
    fn push(&self, queue_name: &str, payload: String) -> Result<(), QueueError>;

    /// Remove `queue_name` and everything in it.
    fn delete(&self, queue_name: &str) -> Result<(), QueueError>;

    /// Tear down the connection. In-flight and later calls fail with
    /// `BrokerUnavailable`.
    ///
    /// Default implementation does nothing.
    fn disconnect(&self) -> Result<(), QueueError> {
        Ok(())
    }
}
