//! # ThreadList Component
//!
//! Sidebar listing every conversation with a preview of its last message.
//!
//! Reads the cached threads query directly, so a send shows up here as soon
//! as the summary patch lands, without waiting for a refetch.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::api::ThreadSummary;
use crate::core::cache::QueryState;
use crate::tui::component::Component;
use crate::tui::components::loading::LoadingIndicator;

pub const NO_PREVIEW: &str = "No messages yet";
pub const NO_THREADS: &str = "No conversations";

pub struct ThreadList<'a> {
    pub state: QueryState<&'a [ThreadSummary]>,
    /// Partner of the open conversation; highlighted.
    pub active: &'a str,
    pub actor: &'a str,
    pub spinner_frame: usize,
}

/// One-line preview of a summary's last message, cut to `width` columns.
pub fn preview(thread: &ThreadSummary, actor: &str, width: usize) -> String {
    let Some(text) = thread.last_message.as_ref().and_then(|m| m.message.as_deref()) else {
        return NO_PREVIEW.to_string();
    };
    let from_actor = thread
        .last_message
        .as_ref()
        .and_then(|m| m.from.as_deref())
        == Some(actor);
    let full = if from_actor {
        format!("You: {}", text.replace('\n', " "))
    } else {
        text.replace('\n', " ")
    };
    truncate(&full, width)
}

fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        if out.width() + c.to_string().width() + 1 > width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

impl<'a> Component for ThreadList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Threads");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let threads = match &self.state {
            QueryState::Loading => {
                let [spinner_area] = Layout::vertical([Constraint::Length(1)])
                    .flex(Flex::Center)
                    .areas(inner);
                frame.render_widget(LoadingIndicator::new(self.spinner_frame), spinner_area);
                return;
            }
            QueryState::Error(message) => {
                frame.render_widget(
                    Paragraph::new(message.as_str())
                        .style(Style::default().fg(Color::Red))
                        .wrap(Wrap { trim: true }),
                    inner,
                );
                return;
            }
            QueryState::Ready(threads) => *threads,
        };

        if threads.is_empty() {
            frame.render_widget(
                Paragraph::new(NO_THREADS).style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            return;
        }

        let width = inner.width as usize;
        let items: Vec<ListItem> = threads
            .iter()
            .map(|thread| {
                let is_active = thread.username == self.active;
                let name_style = if is_active {
                    Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                let marker = if is_active { "▸ " } else { "  " };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(marker, name_style),
                        Span::styled(thread.username.clone(), name_style),
                    ]),
                    Line::from(Span::styled(
                        format!("  {}", preview(thread, self.actor, width.saturating_sub(2))),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        frame.render_widget(List::new(items), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MessageFields;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn thread(username: &str, from: Option<&str>, text: Option<&str>) -> ThreadSummary {
        ThreadSummary {
            username: username.to_string(),
            last_message: text.map(|t| MessageFields {
                from: from.map(str::to_string),
                message: Some(t.to_string()),
                ..Default::default()
            }),
        }
    }

    fn render(state: QueryState<&[ThreadSummary]>) -> String {
        let backend = TestBackend::new(30, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut view = ThreadList {
            state,
            active: "alice",
            actor: "me",
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
    fn preview_marks_own_messages() {
        let t = thread("alice", Some("me"), Some("hey"));
        assert_eq!(preview(&t, "me", 40), "You: hey");
        let t = thread("alice", Some("alice"), Some("hi"));
        assert_eq!(preview(&t, "me", 40), "hi");
    }

    #[test]
    fn preview_without_last_message() {
        let t = thread("bob", None, None);
        assert_eq!(preview(&t, "me", 40), NO_PREVIEW);
    }

    #[test]
    fn preview_truncates_to_width() {
        let t = thread("bob", Some("bob"), Some("a fairly long message body"));
        let p = preview(&t, "me", 10);
        assert!(p.width() <= 10);
        assert!(p.ends_with('…'));
    }

    #[test]
    fn renders_threads_with_previews() {
        let threads = vec![
            thread("alice", Some("me"), Some("yo")),
            thread("bob", None, None),
        ];
        let text = render(QueryState::Ready(threads.as_slice()));
        assert!(text.contains("▸ alice"));
        assert!(text.contains("You: yo"));
        assert!(text.contains("bob"));
        assert!(text.contains(NO_PREVIEW));
    }

    #[test]
    fn renders_error_and_empty_states() {
        assert!(render(QueryState::Error("down".to_string())).contains("down"));
        assert!(render(QueryState::Ready(Vec::new().as_slice())).contains(NO_THREADS));
    }
}
