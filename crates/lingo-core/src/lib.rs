//! Lingo core: the option-accumulation session protocol.
//!
//! A session collects selected processing options, then one submitted
//! sentence is dispatched through a fixed pipeline of opaque text
//! transforms (grammar correction, explanation, exam-style rewriting,
//! translation, tense conjugation). This crate owns the session state
//! machine, the option catalog, and the dispatcher; the transforms
//! themselves live behind the [`TextTransform`] seam.

pub mod dispatch;
pub mod engine;
pub mod error;
pub mod option;
pub mod session;
pub mod transform;

// Re-export common types
pub use dispatch::{Dispatcher, TransformResult};
pub use engine::{ClearingPolicy, SubmitOutcome, TutorEngine};
pub use error::{LingoError, Result};
pub use option::{OptionId, OptionRegistry, TransformKind};
pub use session::{Session, Speaker, Turn};
pub use transform::TextTransform;
