//! # MessageThread Component
//!
//! The conversation with one partner. Renders exactly one of three states,
//! chosen from the messages query every frame:
//!
//! ```text
//! Error(msg)     → the error text, nothing else
//! Loading        → spinner + "Loading..."
//! Ready([])      → "You have no messages"
//! Ready(msgs)    → one bubble per message, in order, pinned to the bottom
//! ```
//!
//! Stateless: the same props always render the same screen.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::api::Message;
use crate::core::cache::QueryState;
use crate::tui::component::Component;
use crate::tui::components::loading::LoadingIndicator;
use crate::tui::components::message::MessageBubble;

pub const NO_MESSAGES: &str = "You have no messages";
pub const LOADING_TEXT: &str = "Loading...";

pub struct MessageThread<'a> {
    pub state: &'a QueryState<Vec<Message>>,
    /// Who the app sends as; decides sent vs received.
    pub actor: &'a str,
    /// Conversation partner; block title and avatar.
    pub partner: &'a str,
    pub spinner_frame: usize,
}

/// Stack the bubbles for `messages` with a blank row between them.
pub fn conversation_lines(
    messages: &[Message],
    actor: &str,
    partner: &str,
    width: u16,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, message) in messages.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(MessageBubble::new(message, actor, partner).lines(width));
    }
    lines
}

impl<'a> MessageThread<'a> {
    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let [spinner_area, text_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
                .flex(Flex::Center)
                .areas(area);
        frame.render_widget(LoadingIndicator::new(self.spinner_frame), spinner_area);
        frame.render_widget(
            Paragraph::new(LOADING_TEXT)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            text_area,
        );
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect, messages: &[Message]) {
        if messages.is_empty() {
            frame.render_widget(
                Paragraph::new(NO_MESSAGES).style(Style::default().fg(Color::DarkGray)),
                area,
            );
            return;
        }

        let lines = conversation_lines(messages, self.actor, self.partner, area.width);
        // Newest message stays in view.
        let offset = lines.len().saturating_sub(area.height as usize);
        let offset = u16::try_from(offset).unwrap_or(u16::MAX);
        frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
    }
}

impl<'a> Component for MessageThread<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(self.partner);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match self.state {
            QueryState::Error(message) => {
                frame.render_widget(
                    Paragraph::new(message.as_str())
                        .style(Style::default().fg(Color::Red))
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true }),
                    inner,
                );
            }
            QueryState::Loading => self.render_loading(frame, inner),
            QueryState::Ready(messages) => self.render_messages(frame, inner, messages),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::message::READ_RECEIPT;
    use crate::test_support::message;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(state: &QueryState<Vec<Message>>) -> String {
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut view = MessageThread {
            state,
            actor: "me",
            partner: "you",
            spinner_frame: 0,
        };
        terminal
            .draw(|f| {
                let area = f.area();
                view.render(f, area);
            })
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn error_state_shows_only_the_error() {
        let text = render(&QueryState::Error("network error: refused".to_string()));
        assert!(text.contains("network error: refused"));
        assert!(!text.contains(LOADING_TEXT));
        assert!(!text.contains(NO_MESSAGES));
    }

    #[test]
    fn loading_state_shows_placeholder() {
        let text = render(&QueryState::Loading);
        assert!(text.contains(LOADING_TEXT));
    }

    #[test]
    fn empty_list_shows_no_messages_notice() {
        let text = render(&QueryState::Ready(Vec::new()));
        assert!(text.contains(NO_MESSAGES));
    }

    #[test]
    fn received_message_renders_avatar_without_receipt() {
        let text = render(&QueryState::Ready(vec![message("you", "me", "hi")]));
        assert!(text.contains("(Y)"));
        assert!(text.contains("hi"));
        assert!(!text.contains(READ_RECEIPT));
    }

    #[test]
    fn sent_message_renders_receipt_without_avatar() {
        let text = render(&QueryState::Ready(vec![message("me", "you", "hey")]));
        assert!(text.contains("hey"));
        assert!(text.contains(READ_RECEIPT));
        assert!(!text.contains("(Y)"));
    }

    #[test]
    fn conversation_lines_preserve_order_and_are_pure() {
        let messages = vec![
            message("you", "me", "first"),
            message("me", "you", "second"),
            message("you", "me", "third"),
        ];
        let a = conversation_lines(&messages, "me", "you", 60);
        let b = conversation_lines(&messages, "me", "you", 60);
        assert_eq!(a, b);

        let texts: Vec<String> = a
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        let first = texts.iter().position(|t| t.contains("first")).unwrap();
        let second = texts.iter().position(|t| t.contains("second")).unwrap();
        let third = texts.iter().position(|t| t.contains("third")).unwrap();
        assert!(first < second && second < third);
        // Bubbles are separated by one blank row.
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn long_conversation_keeps_newest_visible() {
        let messages: Vec<Message> = (0..20)
            .map(|i| message("you", "me", &format!("msg-{i}")))
            .collect();
        let text = render(&QueryState::Ready(messages));
        assert!(text.contains("msg-19"));
        assert!(!text.contains("msg-0 "));
    }
}
