//! Message type carried through the queue.

use std::collections::BTreeMap;

const MESSAGE_ID: &str = "message_id";
const TIMESTAMP: &str = "timestamp";
const CORRELATION_ID: &str = "correlation_id";
const REPLY_TO: &str = "reply_to";

/// A message sent to or received from a queue.
///
/// Body, properties and headers travel on the wire (see [`crate::codec`]).
/// `redelivered` is local metadata and is never encoded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    body: Option<String>,
    properties: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
    redelivered: bool,
}

impl Message {
    /// Create a message with the given body.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::default()
        }
    }

    /// Create a message from its parts.
    pub fn from_parts(
        body: Option<String>,
        properties: BTreeMap<String, String>,
        headers: BTreeMap<String, String>,
    ) -> Self {
        Self {
            body,
            properties,
            headers,
            redelivered: false,
        }
    }

    /// Add a property to the message.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(key, value);
        self
    }

    /// Add a header to the message.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(key, value);
        self
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn set_body(&mut self, body: Option<String>) {
        self.body = body;
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(key.into(), value.into());
    }

    pub fn is_redelivered(&self) -> bool {
        self.redelivered
    }

    pub fn set_redelivered(&mut self, redelivered: bool) {
        self.redelivered = redelivered;
    }

    pub fn message_id(&self) -> Option<&str> {
        self.header(MESSAGE_ID)
    }

    pub fn set_message_id(&mut self, id: impl Into<String>) {
        self.set_header(MESSAGE_ID, id);
    }

    /// The `timestamp` header, if present and numeric.
    pub fn timestamp(&self) -> Option<i64> {
        self.header(TIMESTAMP).and_then(|ts| ts.parse().ok())
    }

    pub fn set_timestamp(&mut self, timestamp: i64) {
        self.set_header(TIMESTAMP, timestamp.to_string());
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.header(CORRELATION_ID)
    }

    pub fn set_correlation_id(&mut self, id: impl Into<String>) {
        self.set_header(CORRELATION_ID, id);
    }

    pub fn reply_to(&self) -> Option<&str> {
        self.header(REPLY_TO)
    }

    pub fn set_reply_to(&mut self, queue: impl Into<String>) {
        self.set_header(REPLY_TO, queue);
    }
}
