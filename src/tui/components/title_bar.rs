//! # TitleBar Component
//!
//! Top status bar: app name, active conversation partner, status message.
//!
//! Purely presentational. All data arrives as props:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.username.clone(), app.status_message.clone());
//! title_bar.render(frame, title_area);
//! ```
//!
//! Renders `"Messenger | alice | Sent to alice"`, or `"Messenger | alice"`
//! when there is no status.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Active conversation partner
    pub partner: String,
    /// Transient status (e.g. "Sending...", "Send failed: ...")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(partner: String, status_message: String) -> Self {
        Self {
            partner,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("Messenger", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" | {}", self.partner)),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new("alice".to_string(), "Sending...".to_string());
        let text = render_text(&mut title_bar);

        assert!(text.contains("Messenger"));
        assert!(text.contains("alice"));
        assert!(text.contains("Sending..."));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new("bob".to_string(), String::new());
        let text = render_text(&mut title_bar);

        assert!(text.contains("Messenger | bob"));
        assert_eq!(text.matches('|').count(), 1);
    }
}
