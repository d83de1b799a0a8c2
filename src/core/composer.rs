//! # Composer State
//!
//! The draft being typed in the message box and where it is in the send
//! cycle.
//!
//! ```text
//!   Idle ──keystroke──▶ Editing ──send──▶ Sending ──ok──▶ Idle (draft cleared)
//!    ▲                    │  ▲                │
//!    └──field cleared─────┘  └────failed──────┘  (draft kept)
//! ```
//!
//! While `Sending`, edits and further sends are refused so the draft that
//! gets cleared on success is always the one that was sent.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposerPhase {
    #[default]
    Idle,
    Editing,
    Sending,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposerState {
    pub draft: String,
    pub phase: ComposerPhase,
}

impl ComposerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_sending(&self) -> bool {
        self.phase == ComposerPhase::Sending
    }

    /// Replace the draft with the field's current value.
    /// Returns `false` (and changes nothing) while a send is in flight.
    pub fn set_draft(&mut self, text: String) -> bool {
        if self.is_sending() {
            return false;
        }
        self.phase = if text.is_empty() {
            ComposerPhase::Idle
        } else {
            ComposerPhase::Editing
        };
        self.draft = text;
        true
    }

    /// Move to `Sending` and hand back the text to send.
    /// `None` when already sending or there is nothing worth sending.
    pub fn begin_send(&mut self) -> Option<String> {
        if self.phase != ComposerPhase::Editing || self.draft.trim().is_empty() {
            return None;
        }
        self.phase = ComposerPhase::Sending;
        Some(self.draft.clone())
    }

    pub fn send_succeeded(&mut self) {
        self.draft.clear();
        self.phase = ComposerPhase::Idle;
    }

    pub fn send_failed(&mut self) {
        self.phase = if self.draft.is_empty() {
            ComposerPhase::Idle
        } else {
            ComposerPhase::Editing
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_moves_idle_to_editing_and_back() {
        let mut composer = ComposerState::new();
        assert!(composer.set_draft("h".to_string()));
        assert_eq!(composer.phase, ComposerPhase::Editing);

        composer.set_draft(String::new());
        assert_eq!(composer.phase, ComposerPhase::Idle);
    }

    #[test]
    fn draft_mirrors_field_value() {
        let mut composer = ComposerState::new();
        for text in ["a", "ab", "ab ünï", ""] {
            composer.set_draft(text.to_string());
            assert_eq!(composer.draft, text);
        }
    }

    #[test]
    fn begin_send_requires_non_blank_draft() {
        let mut composer = ComposerState::new();
        assert_eq!(composer.begin_send(), None);

        composer.set_draft("   ".to_string());
        assert_eq!(composer.begin_send(), None);
        assert_eq!(composer.phase, ComposerPhase::Editing);
    }

    #[test]
    fn sending_locks_the_draft() {
        let mut composer = ComposerState::new();
        composer.set_draft("hello".to_string());
        assert_eq!(composer.begin_send().as_deref(), Some("hello"));

        assert!(!composer.set_draft("changed".to_string()));
        assert_eq!(composer.begin_send(), None);
        assert_eq!(composer.draft, "hello");
    }

    #[test]
    fn success_clears_draft() {
        let mut composer = ComposerState::new();
        composer.set_draft("hello".to_string());
        composer.begin_send();
        composer.send_succeeded();
        assert_eq!(composer, ComposerState::new());
    }

    #[test]
    fn failure_keeps_draft_for_retry() {
        let mut composer = ComposerState::new();
        composer.set_draft("hello".to_string());
        composer.begin_send();
        composer.send_failed();

        assert_eq!(composer.draft, "hello");
        assert_eq!(composer.phase, ComposerPhase::Editing);
        assert_eq!(composer.begin_send().as_deref(), Some("hello"));
    }
}
