//! # Actions
//!
//! Everything that can happen in the messenger becomes an `Action`.
//! User presses Enter? That's `Action::Send`.
//! The mutation comes back? That's `Action::MessageSent(message)`.
//!
//! The `update()` function applies an action to the state and returns the
//! single `Effect` the adapter should run next. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::api::{Message, SendMessageInput, ThreadSummary};
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    /// Fetch both the active conversation and the thread list.
    Refresh,
    /// The composer field now holds this text.
    DraftChanged(String),
    /// Send the current draft.
    Send,
    MessageSent(Message),
    SendFailed(String),
    /// Result of messages query `request`; stale results are dropped.
    MessagesLoaded {
        username: String,
        request: u64,
        messages: Vec<Message>,
    },
    MessagesFailed {
        username: String,
        request: u64,
        error: String,
    },
    ThreadsLoaded(Vec<ThreadSummary>),
    ThreadsFailed(String),
    /// Open the conversation with this partner.
    SelectThread(String),
    /// Open the conversation after the active one in the thread list.
    NextThread,
}

/// Side effect requested by `update()`; executed by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchMessages { username: String, request: u64 },
    /// Fetch this partner's messages and the thread list.
    Refresh { username: String, request: u64 },
    SendMessage(SendMessageInput),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,

        Action::Refresh => Effect::Refresh {
            username: app.username.clone(),
            request: app.issue_request(),
        },

        Action::DraftChanged(text) => {
            if !app.composer.set_draft(text) {
                debug!("Draft edit ignored while sending");
            }
            Effect::None
        }

        Action::Send => match app.composer.begin_send() {
            Some(message) => {
                app.status_message = "Sending...".to_string();
                Effect::SendMessage(SendMessageInput {
                    from: app.actor.clone(),
                    to: app.username.clone(),
                    message,
                })
            }
            None => {
                debug!("Send ignored (phase={:?})", app.composer.phase);
                if !app.composer.is_sending() && !app.composer.draft.is_empty() {
                    app.status_message = "Nothing to send".to_string();
                }
                Effect::None
            }
        },

        Action::MessageSent(message) => {
            info!("Message {} delivered to {}", message.id, message.to);
            app.composer.send_succeeded();
            app.cache.apply_sent_message(&message);
            app.status_message = format!("Sent to {}", message.to);
            let username = app.username.clone();
            fetch_messages(app, username)
        }

        Action::SendFailed(error) => {
            warn!("Send failed: {}", error);
            app.composer.send_failed();
            app.status_message = format!("Send failed: {error}");
            Effect::None
        }

        Action::MessagesLoaded {
            username,
            request,
            messages,
        } => {
            if !app.accept_result(&username, request) {
                debug!("Dropping stale messages result #{} for {}", request, username);
                return Effect::None;
            }
            debug!("Caching {} messages for {}", messages.len(), username);
            if username == app.username {
                app.messages_error = None;
            }
            app.cache.write_messages(&username, messages);
            Effect::None
        }

        Action::MessagesFailed {
            username,
            request,
            error,
        } => {
            if !app.accept_result(&username, request) {
                debug!("Dropping stale messages error #{} for {}: {}", request, username, error);
            } else if username == app.username {
                app.messages_error = Some(error);
            } else {
                debug!("Ignoring messages error for inactive {}: {}", username, error);
            }
            Effect::None
        }

        Action::ThreadsLoaded(threads) => {
            app.threads_error = None;
            app.cache.write_threads(threads);
            Effect::None
        }

        Action::ThreadsFailed(error) => {
            app.threads_error = Some(error);
            Effect::None
        }

        Action::SelectThread(username) => select_thread(app, username),

        Action::NextThread => {
            let next = app.cache.threads().and_then(|threads| {
                let current = threads.iter().position(|t| t.username == app.username);
                let next_index = current.map_or(0, |i| (i + 1) % threads.len());
                threads.get(next_index).map(|t| t.username.clone())
            });
            match next {
                Some(username) => select_thread(app, username),
                None => Effect::None,
            }
        }
    }
}

fn select_thread(app: &mut App, username: String) -> Effect {
    if username == app.username {
        return Effect::None;
    }
    if app.composer.is_sending() {
        app.status_message = "Wait for the message to send".to_string();
        return Effect::None;
    }
    info!("Switching conversation to {}", username);
    app.username = username.clone();
    app.messages_error = None;
    app.composer = Default::default();
    app.status_message = format!("Talking to {username}");
    fetch_messages(app, username)
}

fn fetch_messages(app: &mut App, username: String) -> Effect {
    Effect::FetchMessages {
        username,
        request: app.issue_request(),
    }
}
