//! In-memory backend for `--offline` runs and tests.
//!
//! Stores every message in one list and derives conversations and thread
//! summaries from it, relative to the current actor.

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use tokio::sync::Mutex;

use crate::api::types::{Message, MessageFields, SendMessageInput, ThreadSummary};
use crate::api::{ApiError, ChatBackend};

pub struct LocalBackend {
    actor: String,
    /// Partners listed even before any message is exchanged, in insertion order.
    contacts: Vec<String>,
    messages: Mutex<Vec<Message>>,
}

impl LocalBackend {
    pub fn new(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            contacts: Vec::new(),
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Add a partner that shows up in the thread list with no messages yet.
    pub fn with_contact(mut self, username: impl Into<String>) -> Self {
        let username = username.into();
        if !self.contacts.contains(&username) {
            self.contacts.push(username);
        }
        self
    }

    /// Pre-load a message, e.g. a greeting from a contact.
    pub fn with_message(mut self, from: &str, to: &str, text: &str) -> Self {
        self.messages.get_mut().push(new_message(from, to, text));
        self
    }

    fn partner_of<'a>(&self, msg: &'a Message) -> &'a str {
        if msg.from == self.actor { &msg.to } else { &msg.from }
    }
}

fn new_message(from: &str, to: &str, text: &str) -> Message {
    Message {
        id: uuid::Uuid::new_v4().to_string(),
        from: from.to_string(),
        to: to.to_string(),
        message: text.to_string(),
        time: Utc::now().to_rfc3339(),
    }
}

#[async_trait]
impl ChatBackend for LocalBackend {
    fn name(&self) -> &str {
        "offline"
    }

    async fn fetch_messages(&self, username: &str) -> Result<Vec<Message>, ApiError> {
        let messages = self.messages.lock().await;
        Ok(messages
            .iter()
            .filter(|m| {
                (m.from == self.actor && m.to == username)
                    || (m.from == username && m.to == self.actor)
            })
            .cloned()
            .collect())
    }

    async fn fetch_threads(&self) -> Result<Vec<ThreadSummary>, ApiError> {
        let messages = self.messages.lock().await;
        let mut threads: Vec<ThreadSummary> = self
            .contacts
            .iter()
            .map(|username| ThreadSummary {
                username: username.clone(),
                last_message: None,
            })
            .collect();

        for msg in messages.iter() {
            let partner = self.partner_of(msg);
            let fields = Some(MessageFields::from(msg));
            match threads.iter_mut().find(|t| t.username == partner) {
                Some(thread) => thread.last_message = fields,
                None => threads.push(ThreadSummary {
                    username: partner.to_string(),
                    last_message: fields,
                }),
            }
        }
        Ok(threads)
    }

    async fn send_message(&self, input: SendMessageInput) -> Result<Message, ApiError> {
        if input.to.is_empty() {
            return Err(ApiError::Graphql("recipient is required".to_string()));
        }
        let message = new_message(&input.from, &input.to, &input.message);
        debug!("Stored local message {} for {}", message.id, message.to);
        self.messages.lock().await.push(message.clone());
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(to: &str, text: &str) -> SendMessageInput {
        SendMessageInput {
            from: "me".to_string(),
            to: to.to_string(),
            message: text.to_string(),
        }
    }

    #[tokio::test]
    async fn send_then_fetch_returns_conversation_in_order() {
        let backend = LocalBackend::new("me").with_message("alice", "me", "hi");
        backend.send_message(input("alice", "hey")).await.unwrap();
        backend.send_message(input("bob", "other")).await.unwrap();

        let messages = backend.fetch_messages("alice").await.unwrap();
        let texts: Vec<&str> = messages.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, vec!["hi", "hey"]);
    }

    #[tokio::test]
    async fn sent_message_has_id_and_time() {
        let backend = LocalBackend::new("me");
        let msg = backend.send_message(input("alice", "yo")).await.unwrap();
        assert!(!msg.id.is_empty());
        assert!(chrono::DateTime::parse_from_rfc3339(&msg.time).is_ok());
    }

    #[tokio::test]
    async fn threads_include_contacts_and_latest_message() {
        let backend = LocalBackend::new("me").with_contact("alice").with_contact("carol");
        backend.send_message(input("alice", "first")).await.unwrap();
        backend.send_message(input("alice", "second")).await.unwrap();

        let threads = backend.fetch_threads().await.unwrap();
        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].username, "alice");
        assert_eq!(
            threads[0].last_message.as_ref().and_then(|m| m.message.as_deref()),
            Some("second")
        );
        assert_eq!(threads[1].last_message, None);
    }

    #[test]
    fn empty_recipient_is_rejected() {
        let backend = LocalBackend::new("me");
        let result = tokio_test::block_on(backend.send_message(input("", "x")));
        assert!(matches!(result, Err(ApiError::Graphql(_))));
    }
}
