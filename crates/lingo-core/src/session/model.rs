//! Session domain model and state machine.
//!
//! A `Session` is the per-conversation mutable state: the start flag,
//! the accumulated option selection, the sentence currently being
//! processed, and the transcript. It owns all of these exclusively;
//! nothing in a session is shared across conversations.

use super::turn::{Speaker, Turn};
use crate::error::{LingoError, Result};
use crate::option::OptionId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-conversation session state.
///
/// Lifecycle: created by the boundary layer that maps conversations to
/// sessions, activated by `start`, mutated by option toggles and
/// submissions, and deactivated (not destroyed) by `stop`. The
/// transcript survives `stop` and is only discarded by the next `start`.
///
/// Invariant: `selected_options` is empty whenever `started` transitions
/// to true - a fresh start always clears prior selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format).
    pub id: String,
    /// Whether the session has been started and accepts submissions.
    pub started: bool,
    /// Options accumulated since the last `start`, in catalog order.
    pub selected_options: BTreeSet<OptionId>,
    /// The sentence currently being dispatched, if any.
    pub pending_input: Option<String>,
    /// Ordered transcript of user and bot turns.
    pub transcript: Vec<Turn>,
    /// Timestamp when the session was created (ISO 8601 format).
    pub created_at: String,
    /// Timestamp when the session was last updated (ISO 8601 format).
    pub updated_at: String,
}

impl Session {
    /// Creates a new idle session with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: id.into(),
            started: false,
            selected_options: BTreeSet::new(),
            pending_input: None,
            transcript: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Starts (or restarts) the session.
    ///
    /// Clears the option selection and the transcript, regardless of
    /// prior state, and marks the session as started.
    pub fn start(&mut self) {
        self.started = true;
        self.selected_options.clear();
        self.pending_input = None;
        self.transcript.clear();
        self.touch();
    }

    /// Stops the session.
    ///
    /// The transcript is retained until the next `start`; only the
    /// started flag is dropped.
    pub fn stop(&mut self) {
        self.started = false;
        self.touch();
    }

    /// Toggles an option: add-if-absent, remove-if-present.
    ///
    /// Toggling the same option twice restores the selection to its
    /// state before the first toggle.
    ///
    /// # Returns
    ///
    /// `true` if the option is selected after the toggle.
    ///
    /// # Errors
    ///
    /// Returns [`LingoError::SessionNotStarted`] if the session has not
    /// been started; no state is mutated in that case.
    pub fn toggle_option(&mut self, id: OptionId) -> Result<bool> {
        if !self.started {
            return Err(LingoError::SessionNotStarted);
        }

        let selected = if self.selected_options.remove(&id) {
            false
        } else {
            self.selected_options.insert(id);
            true
        };
        self.touch();
        Ok(selected)
    }

    /// Appends a turn to the transcript.
    pub fn push_turn(&mut self, turn: Turn) {
        self.transcript.push(turn);
        self.touch();
    }

    /// Renders the transcript as plain text, one turn per block.
    ///
    /// This is the only export format: a join of turns in append order,
    /// with no structural guarantees beyond that order.
    pub fn export_transcript(&self) -> String {
        self.transcript
            .iter()
            .map(|turn| {
                let speaker = match turn.speaker {
                    Speaker::User => "You",
                    Speaker::Bot => "Lingo",
                };
                format!("{}: {}", speaker, turn.text)
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_clears_selection_and_transcript() {
        let mut session = Session::new("s1");
        session.start();
        session.toggle_option(OptionId::Correction).unwrap();
        session.push_turn(Turn::user("hello"));

        session.start();

        assert!(session.started);
        assert!(session.selected_options.is_empty());
        assert!(session.transcript.is_empty());
    }

    #[test]
    fn test_toggle_pair_is_a_no_op() {
        let mut session = Session::new("s1");
        session.start();
        let before = session.selected_options.clone();

        assert!(session.toggle_option(OptionId::TranslateHindi).unwrap());
        assert!(!session.toggle_option(OptionId::TranslateHindi).unwrap());

        assert_eq!(session.selected_options, before);
    }

    #[test]
    fn test_toggle_requires_started_session() {
        let mut session = Session::new("s1");

        let err = session.toggle_option(OptionId::Correction).unwrap_err();

        assert_eq!(err, LingoError::SessionNotStarted);
        assert!(session.selected_options.is_empty());
    }

    #[test]
    fn test_stop_retains_transcript() {
        let mut session = Session::new("s1");
        session.start();
        session.push_turn(Turn::user("He go to market."));

        session.stop();

        assert!(!session.started);
        assert_eq!(session.transcript.len(), 1);
    }

    #[test]
    fn test_export_transcript_joins_turns_in_order() {
        let mut session = Session::new("s1");
        session.start();
        session.push_turn(Turn::user("He go to market."));
        session.push_turn(Turn::bot("Corrected:\nHe goes to the market."));

        let text = session.export_transcript();

        assert!(text.starts_with("You: He go to market."));
        assert!(text.contains("Lingo: Corrected:"));
    }
}
