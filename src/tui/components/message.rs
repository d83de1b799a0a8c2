use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::api::Message;

/// Read-receipt mark shown after sent messages.
pub const READ_RECEIPT: &str = "✓";

/// Space between the avatar (or receipt) and the bubble.
const GUTTER: &str = " ";
/// Horizontal padding inside a bubble, per side.
const BUBBLE_PAD: usize = 1;
/// Narrowest text column a bubble wraps to.
const MIN_TEXT_WIDTH: usize = 4;

/// Which side of the conversation a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleKind {
    /// Written by the current actor: right-aligned, blue, read receipt.
    Sent,
    /// Written by anyone else: left-aligned, grey, partner avatar.
    Received,
}

impl BubbleKind {
    pub fn classify(message: &Message, actor: &str) -> Self {
        if message.from == actor {
            BubbleKind::Sent
        } else {
            BubbleKind::Received
        }
    }

    fn style(self) -> Style {
        match self {
            BubbleKind::Sent => Style::default().bg(Color::LightBlue).fg(Color::White),
            BubbleKind::Received => Style::default().bg(Color::Gray).fg(Color::Black),
        }
    }
}

/// Avatar for the conversation partner: their initial, e.g. `(A)`.
pub fn avatar_label(username: &str) -> String {
    let initial = username
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect::<String>())
        .unwrap_or_else(|| "?".to_string());
    format!("({initial})")
}

/// A single chat bubble. Transient: built each frame from props.
///
/// Renders to `Line`s rather than directly to the buffer so the parent
/// thread view can stack bubbles and scroll them as one paragraph.
pub struct MessageBubble<'a> {
    pub message: &'a Message,
    pub kind: BubbleKind,
    /// Conversation partner, used for the avatar.
    pub partner: &'a str,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message, actor: &str, partner: &'a str) -> Self {
        Self {
            message,
            kind: BubbleKind::classify(message, actor),
            partner,
        }
    }

    pub fn has_avatar(&self) -> bool {
        self.kind == BubbleKind::Received
    }

    pub fn has_read_receipt(&self) -> bool {
        self.kind == BubbleKind::Sent
    }

    /// Wrap the message into at most two thirds of `width` and decorate it.
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let avatar = avatar_label(self.partner);
        let decoration = match self.kind {
            BubbleKind::Received => avatar.width() + GUTTER.len(),
            BubbleKind::Sent => READ_RECEIPT.width() + GUTTER.len(),
        };
        let max_bubble = (width as usize * 2 / 3).saturating_sub(decoration);
        let text_width = max_bubble.saturating_sub(BUBBLE_PAD * 2).max(MIN_TEXT_WIDTH);

        let options = textwrap::Options::new(text_width).break_words(true);
        let wrapped: Vec<String> = textwrap::wrap(self.message.message.trim(), options)
            .into_iter()
            .map(|line| line.into_owned())
            .collect();
        let wrapped = if wrapped.is_empty() {
            vec![String::new()]
        } else {
            wrapped
        };

        // Every row of a bubble is padded to the widest row so the background is a block.
        let inner = wrapped.iter().map(|l| l.width()).max().unwrap_or(0);
        let pad = " ".repeat(BUBBLE_PAD);
        let style = self.kind.style();
        let last = wrapped.len() - 1;

        wrapped
            .into_iter()
            .enumerate()
            .map(|(row, text)| {
                let fill = " ".repeat(inner.saturating_sub(text.width()));
                let body = Span::styled(format!("{pad}{text}{fill}{pad}"), style);
                match self.kind {
                    BubbleKind::Received => {
                        let lead = if row == 0 {
                            Span::styled(
                                avatar.clone(),
                                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                            )
                        } else {
                            Span::raw(" ".repeat(avatar.width()))
                        };
                        Line::from(vec![lead, Span::raw(GUTTER), body]).left_aligned()
                    }
                    BubbleKind::Sent => {
                        let tail = if row == last {
                            Span::styled(READ_RECEIPT, Style::default().fg(Color::Green))
                        } else {
                            Span::raw(" ")
                        };
                        Line::from(vec![body, Span::raw(GUTTER), tail]).right_aligned()
                    }
                }
            })
            .collect()
    }
}
