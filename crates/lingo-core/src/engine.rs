//! Tutor engine: the four session operations over the dispatcher.
//!
//! The engine binds a [`Session`] state machine to a shared
//! [`Dispatcher`] and implements the submit semantics: guard checks,
//! warning turns, reply assembly, and the configured clearing policy.
//! It is the whole surface a presentation layer needs - `start`,
//! `stop`, `toggle_option`, `submit`, plus the read-only transcript on
//! the session itself.

use crate::dispatch::{Dispatcher, TransformResult};
use crate::error::{LingoError, Result};
use crate::option::OptionId;
use crate::session::{Session, Turn};
use std::sync::Arc;

/// What happens to a session after a completed dispatch.
///
/// The observed bot variants disagree here, so the policy is explicit
/// configuration rather than inferred behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearingPolicy {
    /// Leave `started` and the option selection untouched; the user can
    /// submit further sentences against the same selection.
    #[default]
    Rechattable,
    /// Reset the selection and the started flag after one completed
    /// dispatch, forcing a fresh start for the next sentence.
    OneShot,
}

/// Outcome of a submit operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A dispatch completed; the assembled reply was appended as a bot turn.
    Reply(String),
    /// A recoverable warning was appended as a bot turn; the session
    /// remains active and no transform was invoked.
    Warning(String),
}

impl SubmitOutcome {
    /// The text shown to the user in either case.
    pub fn text(&self) -> &str {
        match self {
            Self::Reply(text) | Self::Warning(text) => text,
        }
    }
}

/// Drives sessions through the dispatch pipeline.
pub struct TutorEngine {
    dispatcher: Arc<Dispatcher>,
    clearing_policy: ClearingPolicy,
}

impl TutorEngine {
    /// Creates an engine over a shared dispatcher with the default
    /// (rechattable) clearing policy.
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            clearing_policy: ClearingPolicy::default(),
        }
    }

    /// Overrides the clearing policy.
    pub fn with_clearing_policy(mut self, policy: ClearingPolicy) -> Self {
        self.clearing_policy = policy;
        self
    }

    /// Returns the dispatcher this engine drives.
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Starts (or restarts) a session, clearing selections and transcript.
    pub fn start(&self, session: &mut Session) {
        session.start();
        tracing::debug!("[TutorEngine] session {} started", session.id);
    }

    /// Stops a session, retaining the transcript.
    pub fn stop(&self, session: &mut Session) {
        session.stop();
        tracing::debug!("[TutorEngine] session {} stopped", session.id);
    }

    /// Toggles an option on a started session.
    ///
    /// # Returns
    ///
    /// `true` if the option is selected after the toggle.
    ///
    /// # Errors
    ///
    /// - [`LingoError::SessionNotStarted`] if the session is not started
    /// - [`LingoError::UnknownOption`] if the option is outside this
    ///   deployment's registry
    pub fn toggle_option(&self, session: &mut Session, id: OptionId) -> Result<bool> {
        self.dispatcher.registry().validate(id)?;
        session.toggle_option(id)
    }

    /// Submits one sentence against the session's accumulated selection.
    ///
    /// Appends the user turn, runs the dispatcher, appends the assembled
    /// reply as a bot turn, and applies the clearing policy. With an
    /// empty selection the dispatcher is never invoked and a warning
    /// turn is appended instead; the session stays active.
    ///
    /// # Errors
    ///
    /// - [`LingoError::SessionNotStarted`] if the session is not started
    ///   (no state is mutated)
    /// - [`LingoError::EmptyInput`] if the sentence is empty or
    ///   whitespace-only (no state is mutated)
    pub async fn submit(&self, session: &mut Session, sentence: &str) -> Result<SubmitOutcome> {
        if !session.started {
            return Err(LingoError::SessionNotStarted);
        }
        let sentence = sentence.trim();
        if sentence.is_empty() {
            return Err(LingoError::EmptyInput);
        }

        session.push_turn(Turn::user(sentence));

        if session.selected_options.is_empty() {
            let warning = LingoError::NoOptionSelected.to_string();
            session.push_turn(Turn::bot(warning.clone()));
            return Ok(SubmitOutcome::Warning(warning));
        }

        session.pending_input = Some(sentence.to_string());
        let options = session.selected_options.clone();
        let sections = self.dispatcher.dispatch(sentence, &options).await?;
        session.pending_input = None;

        let reply = render_reply(sentence, &sections);
        session.push_turn(Turn::bot(reply.clone()));

        if self.clearing_policy == ClearingPolicy::OneShot {
            session.selected_options.clear();
            session.stop();
        }

        Ok(SubmitOutcome::Reply(reply))
    }
}

/// Assembles the reply text: the original sentence first, then one
/// labeled section per transform in dispatcher order.
fn render_reply(sentence: &str, sections: &[TransformResult]) -> String {
    let mut blocks = Vec::with_capacity(sections.len() + 1);
    blocks.push(format!("Original:\n{}", sentence));
    for section in sections {
        blocks.push(format!("{}:\n{}", section.label, section.body));
    }
    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{OptionRegistry, TransformKind};
    use crate::transform::TextTransform;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TagTransform {
        tag: &'static str,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TextTransform for TagTransform {
        fn description(&self) -> &str {
            self.tag
        }

        async fn apply(&self, text: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{}({})", self.tag, text))
        }
    }

    fn engine(policy: ClearingPolicy) -> (TutorEngine, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let dispatcher = Dispatcher::new(OptionRegistry::full())
            .register(
                TransformKind::Grammar,
                Arc::new(TagTransform {
                    tag: "fixed",
                    calls: calls.clone(),
                }),
            )
            .register(
                TransformKind::TranslateHindi,
                Arc::new(TagTransform {
                    tag: "hi",
                    calls: calls.clone(),
                }),
            );
        let engine = TutorEngine::new(Arc::new(dispatcher)).with_clearing_policy(policy);
        (engine, calls)
    }

    #[tokio::test]
    async fn test_submit_requires_started_session() {
        let (engine, calls) = engine(ClearingPolicy::Rechattable);
        let mut session = Session::new("s1");

        let err = engine.submit(&mut session, "Hello").await.unwrap_err();

        assert_eq!(err, LingoError::SessionNotStarted);
        assert!(session.transcript.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_submit_without_options_warns_and_skips_dispatch() {
        let (engine, calls) = engine(ClearingPolicy::Rechattable);
        let mut session = Session::new("s1");
        engine.start(&mut session);

        let outcome = engine.submit(&mut session, "Hello").await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Warning(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        // User turn plus the warning bot turn, session still active
        assert_eq!(session.transcript.len(), 2);
        assert!(session.started);
    }

    #[tokio::test]
    async fn test_submit_full_scenario_corrects_then_translates() {
        let (engine, _) = engine(ClearingPolicy::Rechattable);
        let mut session = Session::new("s1");
        engine.start(&mut session);
        engine
            .toggle_option(&mut session, OptionId::Correction)
            .unwrap();
        engine
            .toggle_option(&mut session, OptionId::TranslateHindi)
            .unwrap();

        let outcome = engine
            .submit(&mut session, "He go to market yesterday.")
            .await
            .unwrap();

        let reply = outcome.text();
        assert!(reply.starts_with("Original:\nHe go to market yesterday."));
        assert!(reply.contains("Corrected:\nfixed(He go to market yesterday.)"));
        // Hindi section translated the corrected sentence, not the raw one
        assert!(reply.contains("Hindi:\nhi(fixed(He go to market yesterday.))"));
        assert_eq!(session.transcript.len(), 2);
    }

    #[tokio::test]
    async fn test_rechattable_policy_keeps_selection() {
        let (engine, _) = engine(ClearingPolicy::Rechattable);
        let mut session = Session::new("s1");
        engine.start(&mut session);
        engine
            .toggle_option(&mut session, OptionId::TranslateHindi)
            .unwrap();

        engine.submit(&mut session, "Hello there.").await.unwrap();

        assert!(session.started);
        assert_eq!(session.selected_options.len(), 1);

        // A second submission reuses the same selection
        let outcome = engine.submit(&mut session, "Good morning.").await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Reply(_)));
    }

    #[tokio::test]
    async fn test_one_shot_policy_resets_after_dispatch() {
        let (engine, _) = engine(ClearingPolicy::OneShot);
        let mut session = Session::new("s1");
        engine.start(&mut session);
        engine
            .toggle_option(&mut session, OptionId::TranslateHindi)
            .unwrap();

        engine.submit(&mut session, "Hello there.").await.unwrap();

        assert!(!session.started);
        assert!(session.selected_options.is_empty());
        // Transcript survives the reset
        assert_eq!(session.transcript.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_input_mutates_nothing() {
        let (engine, calls) = engine(ClearingPolicy::Rechattable);
        let mut session = Session::new("s1");
        engine.start(&mut session);

        let err = engine.submit(&mut session, "   ").await.unwrap_err();

        assert_eq!(err, LingoError::EmptyInput);
        assert!(session.transcript.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_toggle_rejects_option_outside_registry() {
        let calls = Arc::new(AtomicUsize::new(0));
        let dispatcher =
            Dispatcher::new(OptionRegistry::new([OptionId::Correction])).register(
                TransformKind::Grammar,
                Arc::new(TagTransform {
                    tag: "fixed",
                    calls,
                }),
            );
        let engine = TutorEngine::new(Arc::new(dispatcher));
        let mut session = Session::new("s1");
        engine.start(&mut session);

        let err = engine
            .toggle_option(&mut session, OptionId::TwelveTenses)
            .unwrap_err();

        assert!(matches!(err, LingoError::UnknownOption { .. }));
        assert!(session.selected_options.is_empty());
    }
}
