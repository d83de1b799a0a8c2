//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core `Action`s, and runs the `Effect`s
//! that `update()` returns.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Effects
//!
//! Backend calls run as tokio tasks. Each task reports back by sending an
//! `Action` over an mpsc channel, which the loop drains between frames, so
//! every state change still goes through `update()` on this thread.
//!
//! ## Redraw Strategy
//!
//! - **Loading** (a query or send in flight): draws every ~80ms so the
//!   spinner keeps turning.
//! - **Idle**: sleeps up to 500ms, only redraws on events or backend results.

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::api::{ChatBackend, GraphqlBackend, LocalBackend, SendMessageInput};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{Composer, ComposerEvent, loading};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub composer: Composer,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            composer: Composer::new(),
        }
    }

    /// Push core state into component props before drawing.
    pub fn sync(&mut self, app: &App) {
        self.composer.draft.clone_from(&app.composer.draft);
        self.composer.sending = app.composer.is_sending();
    }
}

/// Turn a terminal event into the core action it stands for, if any.
pub fn action_for_event(tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::NextThread => Some(Action::NextThread),
        TuiEvent::Refresh => Some(Action::Refresh),
        TuiEvent::Resize => None,
        _ => tui.composer.handle_event(event).map(|composer_event| match composer_event {
            ComposerEvent::Changed(text) => Action::DraftChanged(text),
            ComposerEvent::Send => Action::Send,
        }),
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, SetCursorStyle::DefaultUserShape);
    }
}

/// Build the backend a resolved config asks for.
pub fn build_backend(config: &ResolvedConfig) -> Arc<dyn ChatBackend> {
    if config.offline {
        info!("Using offline backend as {}", config.actor);
        Arc::new(LocalBackend::new(config.actor.clone()).with_contact(config.username.clone()))
    } else {
        info!("Using GraphQL backend at {}", config.endpoint);
        Arc::new(GraphqlBackend::new(
            config.endpoint.clone(),
            config.request_timeout,
        ))
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend = build_backend(&config);
    let mut app = App::from_config(backend, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    let effect = update(&mut app, Action::Refresh);
    run_effect(effect, &app, &tx);

    'event_loop: loop {
        tui.sync(&app);
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = loading::frame_at(start_time.elapsed());
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Keystrokes in one batch must see each other's edits.
            tui.sync(&app);
            let Some(action) = action_for_event(&mut tui, &event) else {
                continue;
            };
            let effect = update(&mut app, action);
            if effect == Effect::Quit {
                break 'event_loop;
            }
            run_effect(effect, &app, &tx);
        }

        // Handle background task actions (backend results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if effect == Effect::Quit {
                break 'event_loop;
            }
            run_effect(effect, &app, &tx);
        }
    }

    ratatui::restore();
    Ok(())
}

fn run_effect(effect: Effect, app: &App, tx: &mpsc::Sender<Action>) {
    match effect {
        Effect::None | Effect::Quit => {}
        Effect::FetchMessages { username, request } => {
            spawn_fetch_messages(app.backend.clone(), username, request, tx.clone());
        }
        Effect::Refresh { username, request } => {
            spawn_fetch_messages(app.backend.clone(), username, request, tx.clone());
            spawn_fetch_threads(app.backend.clone(), tx.clone());
        }
        Effect::SendMessage(input) => spawn_send(app.backend.clone(), input, tx.clone()),
    }
}

fn report(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to report backend result: receiver dropped");
    }
}

fn spawn_fetch_messages(
    backend: Arc<dyn ChatBackend>,
    username: String,
    request: u64,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning messages query #{} for {}", request, username);
    tokio::spawn(async move {
        let action = match backend.fetch_messages(&username).await {
            Ok(messages) => Action::MessagesLoaded {
                username,
                request,
                messages,
            },
            Err(e) => {
                warn!("Messages query #{} for {} failed: {}", request, username, e);
                Action::MessagesFailed {
                    username,
                    request,
                    error: e.to_string(),
                }
            }
        };
        report(&tx, action);
    });
}

fn spawn_fetch_threads(backend: Arc<dyn ChatBackend>, tx: mpsc::Sender<Action>) {
    info!("Spawning threads query");
    tokio::spawn(async move {
        let action = match backend.fetch_threads().await {
            Ok(threads) => Action::ThreadsLoaded(threads),
            Err(e) => {
                warn!("Threads query failed: {}", e);
                Action::ThreadsFailed(e.to_string())
            }
        };
        report(&tx, action);
    });
}

fn spawn_send(backend: Arc<dyn ChatBackend>, input: SendMessageInput, tx: mpsc::Sender<Action>) {
    info!("Spawning sendMessage to {}", input.to);
    tokio::spawn(async move {
        let action = match backend.send_message(input).await {
            Ok(message) => Action::MessageSent(message),
            Err(e) => Action::SendFailed(e.to_string()),
        };
        report(&tx, action);
    });
}
