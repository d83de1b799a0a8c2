//! # Wire Types
//!
//! Shapes shared by the query/mutation contract and the rest of the app.
//!
//! ```text
//! messagesConnection.edges[].node  →  Message
//! threadsConnection.edges[].node   →  ThreadSummary { username, lastMessage }
//! sendMessage(input)               →  Message
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// A single chat message. Immutable once the server has created it.
///
/// `id`, `from`, `to` and `time` are nullable in the schema; a missing key or
/// `null` both read as an empty string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Server-assigned id. Older servers leave it out of list queries.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub from: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub to: String,
    pub message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub time: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Partial form of [`Message`], as stored in `ThreadSummary.lastMessage`.
///
/// The summary list may hold a message the server only partially returned
/// (or none at all), so every field is optional.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl MessageFields {
    /// Overlay `newer` on top of `self`. Fields present in `newer` win,
    /// fields it lacks keep their current value.
    pub fn merged_with(&self, newer: &MessageFields) -> MessageFields {
        MessageFields {
            id: newer.id.clone().or_else(|| self.id.clone()),
            from: newer.from.clone().or_else(|| self.from.clone()),
            to: newer.to.clone().or_else(|| self.to.clone()),
            message: newer.message.clone().or_else(|| self.message.clone()),
            time: newer.time.clone().or_else(|| self.time.clone()),
        }
    }
}

impl From<&Message> for MessageFields {
    fn from(msg: &Message) -> Self {
        // Empty nullable fields mean "not returned", not "returned empty".
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        MessageFields {
            id: non_empty(&msg.id),
            from: non_empty(&msg.from),
            to: non_empty(&msg.to),
            message: Some(msg.message.clone()),
            time: non_empty(&msg.time),
        }
    }
}

/// One entry of the thread-summary list: a conversation partner and the
/// last message exchanged with them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSummary {
    pub username: String,
    #[serde(default)]
    pub last_message: Option<MessageFields>,
}

/// Variables of the `sendMessage` mutation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SendMessageInput {
    pub from: String,
    pub to: String,
    pub message: String,
}

// ============================================================================
// GraphQL envelopes
// ============================================================================

/// `{ edges: [{ node: T }] }`
#[derive(Deserialize, Debug)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

#[derive(Deserialize, Debug)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MessagesData {
    pub messages_connection: Connection<Message>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ThreadsData {
    pub threads_connection: Connection<ThreadSummary>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageData {
    pub send_message: Message,
}

/// Top-level GraphQL response body.
#[derive(Deserialize, Debug)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GraphqlError {
    pub message: String,
}
