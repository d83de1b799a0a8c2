use std::fmt;

use async_trait::async_trait;

use super::types::{Message, SendMessageInput, ThreadSummary};

/// Errors that can occur while talking to a chat backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport failure (timeout, DNS, connection refused).
    Network(String),
    /// Server answered with a non-success HTTP status.
    Http { status: u16, message: String },
    /// The GraphQL response carried an `errors` entry.
    Graphql(String),
    /// Response body did not match the expected shape.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Http { status, message } => {
                write!(f, "server error (HTTP {status}): {message}")
            }
            ApiError::Graphql(msg) => write!(f, "{msg}"),
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The query/mutation contract the thread view relies on.
///
/// Implementations own transport and any server-side storage. Caching of
/// results is done by the core, not here.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Short name for logs and the title bar.
    fn name(&self) -> &str;

    /// Messages exchanged with `username`, in conversation order.
    async fn fetch_messages(&self, username: &str) -> Result<Vec<Message>, ApiError>;

    /// One summary per conversation partner.
    async fn fetch_threads(&self) -> Result<Vec<ThreadSummary>, ApiError>;

    /// Create a message and return the stored record.
    async fn send_message(&self, input: SendMessageInput) -> Result<Message, ApiError>;
}
