//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use crate::api::{LocalBackend, Message};

/// Creates a test App talking to an empty offline backend, as "me" with "alice".
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(
        Arc::new(LocalBackend::new("me")),
        "me".to_string(),
        "alice".to_string(),
    )
}

/// A message without server-assigned id/time, as list queries may return it.
pub fn message(from: &str, to: &str, text: &str) -> Message {
    Message {
        id: String::new(),
        from: from.to_string(),
        to: to.to_string(),
        message: text.to_string(),
        time: String::new(),
    }
}
