//! # Loading Indicator
//!
//! A spinning quarter-arc. One full turn every 600ms, looping for as long as
//! the parent keeps rendering it.
//!
//! The component owns no timer: the event loop passes a frame index derived
//! from wall-clock time, so dropping the component out of the tree is all it
//! takes to stop the animation.

use std::time::Duration;

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Paragraph, Widget};

use crate::tui::component::Component;

/// Arc positions for one revolution, clockwise.
pub const FRAMES: [&str; 4] = ["◜", "◝", "◞", "◟"];

/// One revolution takes 600ms.
pub const REVOLUTION: Duration = Duration::from_millis(600);

/// Which arc frame to show after `elapsed` time.
pub fn frame_at(elapsed: Duration) -> usize {
    let per_frame = REVOLUTION.as_millis() / FRAMES.len() as u128;
    (elapsed.as_millis() / per_frame) as usize % FRAMES.len()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadingIndicator {
    frame_index: usize,
}

impl LoadingIndicator {
    pub fn new(frame_index: usize) -> Self {
        Self { frame_index }
    }

    pub fn symbol(&self) -> &'static str {
        FRAMES[self.frame_index % FRAMES.len()]
    }
}

impl Widget for LoadingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.symbol())
            .style(Style::default().fg(Color::LightBlue))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

impl Component for LoadingIndicator {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
