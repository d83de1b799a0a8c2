use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageThread, ThreadList, TitleBar};

/// Sidebar width, including borders.
const SIDEBAR_WIDTH: u16 = 28;
/// Composer height, including borders.
const COMPOSER_HEIGHT: u16 = 3;

/// Screen regions. Shared by drawing and tests so both agree on layout.
pub struct ScreenLayout {
    pub title: Rect,
    pub sidebar: Rect,
    pub thread: Rect,
    pub composer: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    use Constraint::{Length, Min};

    let [title, body] = Layout::vertical([Length(1), Min(0)]).areas(area);
    // Narrow terminals drop the sidebar.
    let sidebar_width = if body.width >= SIDEBAR_WIDTH * 2 { SIDEBAR_WIDTH } else { 0 };
    let [sidebar, main] = Layout::horizontal([Length(sidebar_width), Min(0)]).areas(body);
    let [thread, composer] = Layout::vertical([Min(0), Length(COMPOSER_HEIGHT)]).areas(main);

    ScreenLayout {
        title,
        sidebar,
        thread,
        composer,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let layout = screen_layout(frame.area());

    TitleBar::new(app.username.clone(), app.status_message.clone()).render(frame, layout.title);

    if layout.sidebar.width > 0 {
        ThreadList {
            state: app.threads_view(),
            active: &app.username,
            actor: &app.actor,
            spinner_frame,
        }
        .render(frame, layout.sidebar);
    }

    let messages = app.messages_view();
    MessageThread {
        state: &messages,
        actor: &app.actor,
        partner: &app.username,
        spinner_frame,
    }
    .render(frame, layout.thread);

    tui.composer.render(frame, layout.composer);
}
