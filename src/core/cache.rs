//! # Query Cache
//!
//! Cached results of the read queries, owned by the core.
//!
//! Reads hand out owned snapshots and writes replace the stored value
//! wholesale. Nothing outside this module can reach into a cached list and
//! mutate it in place, so a patch is always read → pure merge → write.
//!
//! ```text
//! QueryCache
//! ├── messages: HashMap<username, Vec<Message>>   // messages query, per partner
//! └── threads: Option<Vec<ThreadSummary>>         // threads query (None = never fetched)
//! ```

use std::collections::HashMap;

use log::debug;

use crate::api::{Message, MessageFields, ThreadSummary};

/// Lifecycle of a single query result as seen by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            QueryState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct QueryCache {
    messages: HashMap<String, Vec<Message>>,
    threads: Option<Vec<ThreadSummary>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_messages(&self, username: &str) -> Option<Vec<Message>> {
        self.messages.get(username).cloned()
    }

    pub fn write_messages(&mut self, username: &str, messages: Vec<Message>) {
        self.messages.insert(username.to_string(), messages);
    }

    pub fn read_threads(&self) -> Option<Vec<ThreadSummary>> {
        self.threads.clone()
    }

    pub fn write_threads(&mut self, threads: Vec<ThreadSummary>) {
        self.threads = Some(threads);
    }

    /// Borrowing view for rendering; no snapshot needed for read-only use.
    pub fn threads(&self) -> Option<&[ThreadSummary]> {
        self.threads.as_deref()
    }

    /// Fold a freshly sent message into the cached thread summaries.
    ///
    /// Returns `false` without touching anything when the threads query has
    /// never been cached.
    pub fn apply_sent_message(&mut self, sent: &Message) -> bool {
        let Some(snapshot) = self.read_threads() else {
            debug!("Threads not cached, skipping summary patch for {}", sent.to);
            return false;
        };
        let patched = patch_thread_summaries(&snapshot, sent);
        self.write_threads(patched);
        true
    }
}

/// Merge `sent` into the `lastMessage` of every summary whose `username`
/// equals `sent.to`.
///
/// Size and order of the list are preserved and non-matching entries are
/// copied unchanged. Applying the same message twice gives the same result
/// as applying it once.
pub fn patch_thread_summaries(threads: &[ThreadSummary], sent: &Message) -> Vec<ThreadSummary> {
    let newer = MessageFields::from(sent);
    threads
        .iter()
        .map(|thread| {
            if thread.username != sent.to {
                return thread.clone();
            }
            let merged = thread
                .last_message
                .as_ref()
                .map(|existing| existing.merged_with(&newer))
                .unwrap_or_else(|| newer.clone());
            ThreadSummary {
                username: thread.username.clone(),
                last_message: Some(merged),
            }
        })
        .collect()
}
