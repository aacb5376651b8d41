//! Error type shared by consumers, producers, the codec and brokers.

use std::error::Error;
use std::fmt;

/// Error type for queue operations.
///
/// Every operation surfaces its failure to the immediate caller. Nothing in
/// this crate retries or swallows an error; the only repeated broker call is
/// the chunked polling behind `receive(0)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// The broker connection failed or was closed.
    BrokerUnavailable(String),
    /// A dequeued payload is not a valid message envelope. The payload has
    /// already been removed from the broker.
    MalformedEnvelope(String),
    /// An argument was rejected before any broker call was made.
    InvalidArgument(String),
    /// A message could not be encoded into an envelope.
    SerializationFailed(String),
}

impl QueueError {
    /// Returns true for connection-level failures.
    pub fn is_broker_unavailable(&self) -> bool {
        matches!(self, QueueError::BrokerUnavailable(_))
    }

    /// Returns true if a dequeued payload failed to decode.
    pub fn is_malformed_envelope(&self) -> bool {
        matches!(self, QueueError::MalformedEnvelope(_))
    }
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::BrokerUnavailable(msg) => write!(f, "broker unavailable: {}", msg),
            QueueError::MalformedEnvelope(msg) => write!(f, "malformed envelope: {}", msg),
            QueueError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            QueueError::SerializationFailed(msg) => write!(f, "serialization failed: {}", msg),
        }
    }
}

impl Error for QueueError {}

impl From<serde_json::Error> for QueueError {
    fn from(err: serde_json::Error) -> Self {
        QueueError::MalformedEnvelope(err.to_string())
    }
}
