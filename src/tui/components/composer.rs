//! # Composer Component
//!
//! Single-line message box with a send hint.
//!
//! ## Controlled Input
//!
//! The draft lives in core (`ComposerState`). This component never edits its
//! own copy: a keystroke produces `ComposerEvent::Changed(new_text)`, the
//! parent feeds that through `update()`, and the new draft comes back in as
//! a prop on the next loop iteration. What is displayed is therefore always
//! exactly the core draft.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const PLACEHOLDER: &str = "Type your message...";
const SEND_HINT: &str = "[Enter] Send";
const SENDING_HINT: &str = "Sending...";

/// High-level events emitted by the Composer
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerEvent {
    /// The field would now contain this text.
    Changed(String),
    /// User asked to send (Enter).
    Send,
}

pub struct Composer {
    /// Current draft (Prop)
    pub draft: String,
    /// A send is in flight (Prop)
    pub sending: bool,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    pub fn new() -> Self {
        Self {
            draft: String::new(),
            sending: false,
        }
    }

    /// Tail of the draft that fits in `width` columns.
    fn visible_tail(&self, width: usize) -> &str {
        let mut start = 0;
        while self.draft[start..].width() > width {
            start += self.draft[start..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
        }
        &self.draft[start..]
    }
}

impl Component for Composer {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Message");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let hint = if self.sending { SENDING_HINT } else { SEND_HINT };
        let [text_area, hint_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(hint.width() as u16 + 1),
        ])
        .areas(inner);

        let (text, style) = if self.draft.is_empty() {
            (PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            let style = if self.sending {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            (self.visible_tail(text_area.width as usize), style)
        };
        let cursor_offset = if self.draft.is_empty() { 0 } else { text.width() as u16 };
        frame.render_widget(Paragraph::new(text).style(style), text_area);

        frame.render_widget(
            Paragraph::new(hint)
                .style(Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD))
                .right_aligned(),
            hint_area,
        );

        if !self.sending {
            let x = (text_area.x + cursor_offset).min(text_area.right().saturating_sub(1));
            frame.set_cursor_position((x, text_area.y));
        }
    }
}

impl EventHandler for Composer {
    type Event = ComposerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut next = self.draft.clone();
                next.push(*c);
                Some(ComposerEvent::Changed(next))
            }
            TuiEvent::Paste(text) => {
                // Single-line field: newlines become spaces.
                let mut next = self.draft.clone();
                next.push_str(&text.replace(['\r', '\n'], " "));
                Some(ComposerEvent::Changed(next))
            }
            TuiEvent::Backspace => {
                let mut next = self.draft.clone();
                next.pop()?;
                Some(ComposerEvent::Changed(next))
            }
            TuiEvent::Submit => Some(ComposerEvent::Send),
            _ => None,
        }
    }
}
