//! Conversation-to-session mapping and per-conversation serialization.

use lingo_core::{
    LingoError, OptionId, Result, Session, SubmitOutcome, Turn, TutorEngine,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Maps conversation identifiers to sessions and serializes all
/// operations on one conversation.
///
/// Each session sits behind its own async mutex, so option toggles and
/// submissions on one conversation are processed strictly in order - a
/// new submission waits for the prior dispatch to complete. Distinct
/// conversations are fully independent and share nothing but the
/// engine's transform collaborators.
///
/// Sessions live in memory for the process lifetime; there is no
/// automatic eviction. Callers remove conversations explicitly.
pub struct SessionService {
    engine: Arc<TutorEngine>,
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionService {
    /// Creates a service over a shared engine.
    pub fn new(engine: Arc<TutorEngine>) -> Self {
        Self {
            engine,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Starts (or restarts) the session for a conversation, creating it
    /// on first use.
    pub async fn start(&self, conversation_id: &str) {
        let session = self.get_or_create(conversation_id).await;
        let mut session = session.lock().await;
        self.engine.start(&mut session);
    }

    /// Stops the session for a conversation.
    ///
    /// # Errors
    ///
    /// Returns [`LingoError::SessionNotStarted`] if the conversation has
    /// no session yet.
    pub async fn stop(&self, conversation_id: &str) -> Result<()> {
        let session = self.get(conversation_id).await?;
        let mut session = session.lock().await;
        self.engine.stop(&mut session);
        Ok(())
    }

    /// Toggles an option on a conversation's session.
    ///
    /// # Returns
    ///
    /// `true` if the option is selected after the toggle.
    ///
    /// # Errors
    ///
    /// Returns [`LingoError::SessionNotStarted`] if the conversation has
    /// no session, plus the engine's own toggle errors.
    pub async fn toggle_option(&self, conversation_id: &str, id: OptionId) -> Result<bool> {
        let session = self.get(conversation_id).await?;
        let mut session = session.lock().await;
        self.engine.toggle_option(&mut session, id)
    }

    /// Submits a sentence on a conversation's session.
    ///
    /// Holds the conversation's lock across the whole dispatch, which is
    /// what serializes concurrent submissions on one conversation.
    ///
    /// # Errors
    ///
    /// Returns [`LingoError::SessionNotStarted`] if the conversation has
    /// no session, plus the engine's own submit errors.
    pub async fn submit(&self, conversation_id: &str, sentence: &str) -> Result<SubmitOutcome> {
        let session = self.get(conversation_id).await?;
        let mut session = session.lock().await;
        self.engine.submit(&mut session, sentence).await
    }

    /// Returns a snapshot of a conversation's transcript.
    ///
    /// # Errors
    ///
    /// Returns [`LingoError::SessionNotStarted`] if the conversation has
    /// no session yet.
    pub async fn transcript(&self, conversation_id: &str) -> Result<Vec<Turn>> {
        let session = self.get(conversation_id).await?;
        let session = session.lock().await;
        Ok(session.transcript.clone())
    }

    /// Returns a conversation's transcript as plain text.
    ///
    /// # Errors
    ///
    /// Returns [`LingoError::SessionNotStarted`] if the conversation has
    /// no session yet.
    pub async fn export_transcript(&self, conversation_id: &str) -> Result<String> {
        let session = self.get(conversation_id).await?;
        let session = session.lock().await;
        Ok(session.export_transcript())
    }

    /// Returns the option selection of a conversation's session.
    ///
    /// # Errors
    ///
    /// Returns [`LingoError::SessionNotStarted`] if the conversation has
    /// no session yet.
    pub async fn selected_options(&self, conversation_id: &str) -> Result<Vec<OptionId>> {
        let session = self.get(conversation_id).await?;
        let session = session.lock().await;
        Ok(session.selected_options.iter().copied().collect())
    }

    /// Removes a conversation's session entirely.
    pub async fn remove(&self, conversation_id: &str) {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(conversation_id).is_some() {
            tracing::debug!("[SessionService] removed conversation {}", conversation_id);
        }
    }

    /// Drops all sessions.
    pub async fn clear(&self) {
        let mut sessions = self.sessions.write().await;
        sessions.clear();
    }

    /// Number of live conversations.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no conversation is live.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    async fn get(&self, conversation_id: &str) -> Result<Arc<Mutex<Session>>> {
        let sessions = self.sessions.read().await;
        sessions
            .get(conversation_id)
            .cloned()
            .ok_or(LingoError::SessionNotStarted)
    }

    async fn get_or_create(&self, conversation_id: &str) -> Arc<Mutex<Session>> {
        {
            let sessions = self.sessions.read().await;
            if let Some(session) = sessions.get(conversation_id) {
                return session.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(conversation_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(
                    "[SessionService] creating session for conversation {}",
                    conversation_id
                );
                Arc::new(Mutex::new(Session::new(uuid::Uuid::new_v4().to_string())))
            })
            .clone()
    }
}
