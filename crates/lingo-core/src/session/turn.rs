//! Transcript turn types.

use serde::{Deserialize, Serialize};

/// Who produced a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    /// Turn written by the user.
    User,
    /// Turn written by the engine.
    Bot,
}

/// A single entry in a session transcript.
///
/// Turns are immutable once appended and are ordered by append time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// The speaker of this turn.
    pub speaker: Speaker,
    /// The text content of the turn.
    pub text: String,
    /// Timestamp when the turn was appended (ISO 8601 format).
    pub timestamp: String,
}

impl Turn {
    /// Creates a turn stamped with the current time.
    pub fn now(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Creates a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::now(Speaker::User, text)
    }

    /// Creates a bot turn.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::now(Speaker::Bot, text)
    }
}
