//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top status bar with partner and status
//! - `LoadingIndicator`: Spinning arc, frame chosen by the event loop's clock
//! - `MessageBubble`: One sent or received message
//! - `MessageThread`: Error / Loading / Ready view of a conversation
//! - `ThreadList`: Sidebar of thread summaries
//!
//! ### Controlled Components (Event-Driven)
//!
//! - `Composer`: Message box. Emits proposed text; the draft itself lives in core.
//!
//! Components receive external data as props, not by reaching into `App`:
//!
//! ```rust,ignore
//! // Dependencies are explicit
//! MessageThread { state: &messages, actor: &app.actor, partner: &app.username, spinner_frame }
//!     .render(frame, area);
//! ```

pub mod composer;
pub mod loading;
pub mod message;
pub mod message_thread;
pub mod thread_list;
mod title_bar;

pub use composer::{Composer, ComposerEvent};
pub use message_thread::MessageThread;
pub use thread_list::ThreadList;
pub use title_bar::TitleBar;
