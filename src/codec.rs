//! JSON envelope codec.
//!
//! A message travels as a single JSON object:
//!
//! ```text
//! {"body":"aBody","properties":{"k":"v"},"headers":{"message_id":"..."}}
//! ```
//!
//! `properties` and `headers` are required on decode; a missing or `null`
//! body decodes as no body. Unknown keys are ignored. An empty JSON array
//! stands for an empty map, which is how PHP producers write `[]`.

use std::collections::BTreeMap;

use serde::de::{Error as _, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::QueueError;
use crate::message::Message;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    body: Option<&'a str>,
    properties: &'a BTreeMap<String, String>,
    headers: &'a BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct Envelope {
    body: Option<String>,
    #[serde(deserialize_with = "map_or_empty_list")]
    properties: BTreeMap<String, String>,
    #[serde(deserialize_with = "map_or_empty_list")]
    headers: BTreeMap<String, String>,
}

fn map_or_empty_list<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MapOrList {
        Map(BTreeMap<String, String>),
        List(Vec<IgnoredAny>),
    }

    match MapOrList::deserialize(deserializer)? {
        MapOrList::Map(map) => Ok(map),
        MapOrList::List(items) if items.is_empty() => Ok(BTreeMap::new()),
        MapOrList::List(_) => Err(D::Error::custom("expected a string map or an empty list")),
    }
}

/// Encode a message into its transport string.
pub fn encode(message: &Message) -> Result<String, QueueError> {
    let envelope = EnvelopeRef {
        body: message.body(),
        properties: message.properties(),
        headers: message.headers(),
    };
    serde_json::to_string(&envelope).map_err(|e| QueueError::SerializationFailed(e.to_string()))
}

/// Decode a transport string into a message.
///
/// The result is never marked redelivered.
pub fn decode(raw: &str) -> Result<Message, QueueError> {
    let envelope: Envelope = serde_json::from_str(raw)?;
    Ok(Message::from_parts(
        envelope.body,
        envelope.properties,
        envelope.headers,
    ))
}
