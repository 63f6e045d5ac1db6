//! Transform dispatcher.
//!
//! One dispatch evaluates all selected options against one submitted
//! sentence: the grammar transform runs first (producing the corrected
//! working value consumed downstream), then the remaining transforms in
//! fixed evaluation order, each at most once, with per-section failure
//! isolation.

use crate::error::{LingoError, Result};
use crate::option::{OptionId, OptionRegistry, TransformKind, EVALUATION_ORDER};
use crate::transform::TextTransform;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

/// Default per-transform invocation timeout.
///
/// No timeout is specified by the source behavior; this is imposed
/// defensively and expiry counts as that transform's isolated failure.
pub const DEFAULT_TRANSFORM_TIMEOUT: Duration = Duration::from_secs(30);

/// Placeholder body substituted for a failed transform's section.
pub const UNAVAILABLE_PLACEHOLDER: &str = "temporarily unavailable - please try again later";

/// One labeled section of a dispatch reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    /// Section label (e.g. "Corrected", "Hindi").
    pub label: String,
    /// Section body text.
    pub body: String,
}

/// Routes a sentence and an option selection through the registered
/// transform collaborators.
///
/// The dispatcher is immutable after construction and is shared across
/// sessions; collaborators are held behind `Arc<dyn TextTransform>`.
pub struct Dispatcher {
    registry: OptionRegistry,
    transforms: HashMap<TransformKind, Arc<dyn TextTransform>>,
    timeout: Duration,
}

impl Dispatcher {
    /// Creates a dispatcher for a deployment's registry with no
    /// collaborators registered yet.
    pub fn new(registry: OptionRegistry) -> Self {
        Self {
            registry,
            transforms: HashMap::new(),
            timeout: DEFAULT_TRANSFORM_TIMEOUT,
        }
    }

    /// Registers the collaborator backing one transform capability.
    pub fn register(mut self, kind: TransformKind, transform: Arc<dyn TextTransform>) -> Self {
        self.transforms.insert(kind, transform);
        self
    }

    /// Overrides the per-invocation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the deployment registry this dispatcher serves.
    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    /// Evaluates all selected options against one sentence.
    ///
    /// Sections come back in fixed evaluation order regardless of the
    /// order the options were toggled, one section per distinct
    /// [`TransformKind`]. Downstream sections consume the corrected
    /// sentence when a grammar option was co-selected and correction
    /// succeeded, and the raw sentence otherwise.
    ///
    /// A failing collaborator (error or timeout) contributes a
    /// placeholder section; it never aborts the remaining transforms.
    ///
    /// # Errors
    ///
    /// - [`LingoError::EmptyInput`] if the sentence is empty or
    ///   whitespace-only
    /// - [`LingoError::NoOptionSelected`] if `options` is empty
    /// - [`LingoError::UnknownOption`] if an option is outside this
    ///   deployment's registry
    pub async fn dispatch(
        &self,
        sentence: &str,
        options: &BTreeSet<OptionId>,
    ) -> Result<Vec<TransformResult>> {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            return Err(LingoError::EmptyInput);
        }
        if options.is_empty() {
            return Err(LingoError::NoOptionSelected);
        }
        for option in options {
            self.registry.validate(*option)?;
        }

        let kinds: BTreeSet<TransformKind> = options.iter().map(OptionId::kind).collect();

        tracing::debug!(
            "[Dispatcher] dispatching {} distinct transform(s) for sentence of {} chars",
            kinds.len(),
            sentence.len()
        );

        let mut sections = Vec::with_capacity(kinds.len());
        let mut corrected: Option<String> = None;

        for kind in EVALUATION_ORDER.iter().filter(|kind| kinds.contains(*kind)) {
            // Dependency rule: downstream transforms consume the corrected
            // working value only once the grammar transform has produced it.
            let input = match &corrected {
                Some(text) if kind.consumes_corrected() => text.as_str(),
                _ => sentence,
            };

            match self.invoke(*kind, input).await {
                Ok(body) => {
                    if *kind == TransformKind::Grammar {
                        corrected = Some(body.clone());
                    }
                    sections.push(TransformResult {
                        label: kind.label().to_string(),
                        body,
                    });
                }
                Err(err) => {
                    tracing::warn!("[Dispatcher] {} transform failed: {}", kind, err);
                    sections.push(TransformResult {
                        label: kind.label().to_string(),
                        body: UNAVAILABLE_PLACEHOLDER.to_string(),
                    });
                }
            }
        }

        Ok(sections)
    }

    /// Invokes one collaborator under the defensive timeout.
    async fn invoke(&self, kind: TransformKind, input: &str) -> Result<String> {
        let transform = self
            .transforms
            .get(&kind)
            .ok_or_else(|| LingoError::unavailable(kind, "no collaborator registered"))?;

        tokio::time::timeout(self.timeout, transform.apply(input))
            .await
            .map_err(|_| {
                LingoError::unavailable(
                    kind,
                    format!("timed out after {:?}", self.timeout),
                )
            })?
    }
}
