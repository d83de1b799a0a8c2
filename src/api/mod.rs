//! # Data Access
//!
//! The query/mutation side of the app: wire types, the `ChatBackend` trait,
//! and its GraphQL and in-memory implementations.

pub mod backend;
pub mod graphql;
pub mod local;
pub mod types;

pub use backend::{ApiError, ChatBackend};
pub use graphql::GraphqlBackend;
pub use local::LocalBackend;
pub use types::{Message, MessageFields, SendMessageInput, ThreadSummary};
