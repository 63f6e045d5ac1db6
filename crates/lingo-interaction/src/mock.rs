//! Deterministic transforms for tests and offline development.

use async_trait::async_trait;
use lingo_core::{LingoError, Result, TextTransform, TransformKind};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Transform that applies a fixed prefix, e.g. `"[hi] <input>"`.
///
/// Tracks invocation counts so tests can assert at-most-once dispatch.
pub struct PrefixTransform {
    prefix: String,
    calls: AtomicUsize,
}

impl PrefixTransform {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `apply` has been invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextTransform for PrefixTransform {
    fn description(&self) -> &str {
        "prefixing mock transform"
    }

    async fn apply(&self, text: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("[{}] {}", self.prefix, text))
    }
}

/// Transform that always reports itself unavailable.
pub struct UnavailableTransform {
    kind: TransformKind,
}

impl UnavailableTransform {
    pub fn new(kind: TransformKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl TextTransform for UnavailableTransform {
    fn description(&self) -> &str {
        "always-unavailable mock transform"
    }

    async fn apply(&self, _text: &str) -> Result<String> {
        Err(LingoError::unavailable(self.kind, "mock backend down"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prefix_transform_counts_calls() {
        let transform = PrefixTransform::new("hi");

        let out = transform.apply("Hello").await.unwrap();

        assert_eq!(out, "[hi] Hello");
        assert_eq!(transform.calls(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_transform_always_fails() {
        let transform = UnavailableTransform::new(TransformKind::Grammar);

        let err = transform.apply("Hello").await.unwrap_err();

        assert!(err.is_unavailable());
    }
}
