//! # Core Application Logic
//!
//! This module contains the messenger's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • QueryCache + patch   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                    ┌───────────┴─────────────┐
//!                    ▼                         ▼
//!             ┌────────────┐            ┌────────────┐
//!             │    TUI     │            │  Backend   │
//!             │  Adapter   │ ─spawns──▶ │ (GraphQL / │
//!             │ (ratatui)  │ ◀─Action── │  offline)  │
//!             └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update` reducer
//! - [`cache`]: Cached query results and the thread-summary patch
//! - [`composer`]: Draft text and send phase
//! - [`config`]: Layered configuration

pub mod action;
pub mod cache;
pub mod composer;
pub mod config;
pub mod state;
