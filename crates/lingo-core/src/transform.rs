//! Text transform collaborator seam.
//!
//! A transform is an opaque `sentence -> text` function backed by an
//! external model or hosted API. The engine never inspects a
//! collaborator's internals (tokenization, weights, prompt
//! construction); it only relies on this one asynchronous call.

use crate::error::Result;
use async_trait::async_trait;

/// An opaque text-processing capability.
///
/// Implementations must be safe for concurrent invocation across
/// sessions, or serialize access internally if the backing model is
/// not reentrant. Implementations are shared process-wide behind
/// `Arc<dyn TextTransform>`.
#[async_trait]
pub trait TextTransform: Send + Sync {
    /// Short human-readable description of what this transform does.
    fn description(&self) -> &str;

    /// Applies the transform to one sentence.
    ///
    /// # Errors
    ///
    /// Returns [`LingoError::TransformUnavailable`](crate::LingoError::TransformUnavailable)
    /// when the backing model or API fails. The dispatcher treats such a
    /// failure as local to this transform's section.
    async fn apply(&self, text: &str) -> Result<String>;
}
