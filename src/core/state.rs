//! # Application State
//!
//! Core business state for the messenger. Domain logic only, no TUI types.
//! Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn ChatBackend>   // query/mutation transport
//! ├── actor: String                   // who "me" is
//! ├── username: String                // active conversation partner
//! ├── cache: QueryCache               // cached messages + thread summaries
//! ├── messages_error: Option<String>  // last messages query failure
//! ├── threads_error: Option<String>   // last threads query failure
//! ├── composer: ComposerState         // draft + send phase
//! ├── status_message: String          // title bar text
//! ├── last_request: u64               // id of the newest messages query issued
//! └── applied_requests: HashMap       // username → newest query id applied
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::HashMap;
use std::sync::Arc;

use crate::api::{ChatBackend, Message, ThreadSummary};
use crate::core::cache::{QueryCache, QueryState};
use crate::core::composer::ComposerState;
use crate::core::config::ResolvedConfig;

pub struct App {
    pub backend: Arc<dyn ChatBackend>,
    pub actor: String,
    pub username: String,
    pub cache: QueryCache,
    pub messages_error: Option<String>,
    pub threads_error: Option<String>,
    pub composer: ComposerState,
    pub status_message: String,
    pub last_request: u64,
    applied_requests: HashMap<String, u64>,
}

impl App {
    pub fn new(backend: Arc<dyn ChatBackend>, actor: String, username: String) -> Self {
        let status_message = format!("Connected via {}", backend.name());
        Self {
            backend,
            actor,
            username,
            cache: QueryCache::new(),
            messages_error: None,
            threads_error: None,
            composer: ComposerState::new(),
            status_message,
            last_request: 0,
            applied_requests: HashMap::new(),
        }
    }

    /// Id for a new messages query. Later queries get larger ids.
    pub fn issue_request(&mut self) -> u64 {
        self.last_request += 1;
        self.last_request
    }

    /// Whether the result of messages query `request` for `username` may be
    /// applied. Results that finish after a newer query for the same
    /// username has already been applied are stale and refused.
    pub fn accept_result(&mut self, username: &str, request: u64) -> bool {
        let latest = self
            .applied_requests
            .entry(username.to_string())
            .or_insert(0);
        if request < *latest {
            return false;
        }
        *latest = request;
        true
    }

    pub fn from_config(backend: Arc<dyn ChatBackend>, config: &ResolvedConfig) -> Self {
        Self::new(backend, config.actor.clone(), config.username.clone())
    }

    /// What the thread view should show for the active partner.
    ///
    /// An error wins over cached data; cached data is shown while a refetch
    /// is in flight.
    pub fn messages_view(&self) -> QueryState<Vec<Message>> {
        if let Some(error) = &self.messages_error {
            return QueryState::Error(error.clone());
        }
        match self.cache.read_messages(&self.username) {
            Some(messages) => QueryState::Ready(messages),
            None => QueryState::Loading,
        }
    }

    /// What the thread list should show.
    pub fn threads_view(&self) -> QueryState<&[ThreadSummary]> {
        match (self.cache.threads(), &self.threads_error) {
            (Some(threads), _) => QueryState::Ready(threads),
            (None, Some(error)) => QueryState::Error(error.clone()),
            (None, None) => QueryState::Loading,
        }
    }

    /// True while anything on screen is waiting on the backend.
    pub fn is_loading(&self) -> bool {
        self.messages_view().is_loading()
            || self.threads_view().is_loading()
            || self.composer.is_sending()
    }
}
