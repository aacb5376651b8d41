//! Consumer and producer adapters for list-based brokers.
//!
//! Messages travel as JSON envelopes on broker lists: producers push onto
//! the tail, consumers pop from the head with a bounded blocking pop.
//! The broker connection itself is abstracted by the [`broker::Broker`]
//! trait and passed explicitly into a [`Context`].

pub mod broker;
pub mod codec;
mod consumer;
mod context;
mod destination;
mod error;
mod message;
mod producer;

pub use broker::{Broker, PopResult};
#[cfg(feature = "memory")]
pub use broker::InMemoryBroker;
pub use consumer::{Consumer, QueueConsumer, WAIT_FOREVER_CHUNK_SECS};
pub use context::Context;
pub use destination::Destination;
pub use error::QueueError;
pub use message::Message;
pub use producer::{Producer, QueueProducer};
