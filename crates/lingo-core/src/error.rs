//! Error types for the Lingo engine.

use crate::option::TransformKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the Lingo session engine.
///
/// Every variant is session-local and recoverable by a subsequent user
/// action; no condition here is fatal to the process.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LingoError {
    /// A sentence was submitted before any option was selected
    #[error("No option selected. Pick at least one option before sending a sentence.")]
    NoOptionSelected,

    /// The submitted sentence was empty or whitespace-only
    #[error("Empty input. Send a sentence to process.")]
    EmptyInput,

    /// An operation arrived while the session was not started
    #[error("Session not started. Start a session and select options first.")]
    SessionNotStarted,

    /// An option outside the deployment's registry was toggled
    #[error("Unknown option: '{id}' is not available in this deployment")]
    UnknownOption { id: String },

    /// A text transform collaborator failed (model error, API fault, timeout)
    #[error("Transform unavailable: {kind} - {message}")]
    TransformUnavailable {
        kind: TransformKind,
        message: String,
    },

    /// Configuration error (missing API key, unreadable secret file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LingoError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an UnknownOption error
    pub fn unknown_option(id: impl Into<String>) -> Self {
        Self::UnknownOption { id: id.into() }
    }

    /// Creates a TransformUnavailable error
    pub fn unavailable(kind: TransformKind, message: impl Into<String>) -> Self {
        Self::TransformUnavailable {
            kind,
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a user input error (recoverable by re-prompting)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::NoOptionSelected
                | Self::EmptyInput
                | Self::SessionNotStarted
                | Self::UnknownOption { .. }
        )
    }

    /// Check if this is a TransformUnavailable error
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::TransformUnavailable { .. })
    }
}

/// Conversion from String (for error messages)
impl From<String> for LingoError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, LingoError>`.
pub type Result<T> = std::result::Result<T, LingoError>;
