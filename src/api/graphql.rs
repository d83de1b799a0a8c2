//! GraphQL backend.
//!
//! Every operation is a `POST {endpoint}` with a `{query, variables}` JSON
//! body. Responses are `{data, errors}`; a non-empty `errors` array fails the
//! operation with the first error's message.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::api::types::{
    GraphqlResponse, Message, MessagesData, SendMessageData, SendMessageInput, ThreadSummary,
    ThreadsData,
};
use crate::api::{ApiError, ChatBackend};

pub const MESSAGES_QUERY: &str = "\
query messages($username: String!) {
  messagesConnection(username: $username) {
    edges { node { id from to message time } }
  }
}";

pub const THREADS_QUERY: &str = "\
query threads {
  threadsConnection {
    edges { node { username lastMessage { id from to message time } } }
  }
}";

pub const SEND_MESSAGE_MUTATION: &str = "\
mutation sendMessage($from: String!, $to: String!, $message: String!) {
  sendMessage(input: { from: $from, to: $to, message: $message }) {
    id
    time
    to
    from
    message
  }
}";

#[derive(Serialize, Debug)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Value,
}

pub struct GraphqlBackend {
    endpoint: String,
    client: reqwest::Client,
}

impl GraphqlBackend {
    /// `timeout` bounds every request; `None` leaves reqwest's default (no timeout).
    pub fn new(endpoint: String, timeout: Option<Duration>) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            warn!("Failed to build HTTP client with timeout ({}), using defaults", e);
            reqwest::Client::new()
        });

        Self { endpoint, client }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<T, ApiError> {
        debug!("GraphQL {} -> {} ({})", operation, self.endpoint, variables);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&GraphqlRequest { query, variables })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("GraphQL {} failed: HTTP {} - {}", operation, status, message);
            return Err(ApiError::Http { status, message });
        }

        let body: GraphqlResponse<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        if let Some(error) = body.errors.into_iter().next() {
            warn!("GraphQL {} returned error: {}", operation, error.message);
            return Err(ApiError::Graphql(error.message));
        }

        body.data
            .ok_or_else(|| ApiError::Parse(format!("{operation}: response has no data")))
    }
}

#[async_trait]
impl ChatBackend for GraphqlBackend {
    fn name(&self) -> &str {
        "graphql"
    }

    async fn fetch_messages(&self, username: &str) -> Result<Vec<Message>, ApiError> {
        let data: MessagesData = self
            .execute("messages", MESSAGES_QUERY, json!({ "username": username }))
            .await?;
        let messages = data.messages_connection.into_nodes();
        info!("Fetched {} messages with {}", messages.len(), username);
        Ok(messages)
    }

    async fn fetch_threads(&self) -> Result<Vec<ThreadSummary>, ApiError> {
        let data: ThreadsData = self.execute("threads", THREADS_QUERY, json!({})).await?;
        let threads = data.threads_connection.into_nodes();
        info!("Fetched {} threads", threads.len());
        Ok(threads)
    }

    async fn send_message(&self, input: SendMessageInput) -> Result<Message, ApiError> {
        let variables =
            serde_json::to_value(&input).map_err(|e| ApiError::Parse(e.to_string()))?;
        let data: SendMessageData = self
            .execute("sendMessage", SEND_MESSAGE_MUTATION, variables)
            .await?;
        info!(
            "Message {} sent to {}",
            data.send_message.id, data.send_message.to
        );
        Ok(data.send_message)
    }
}
