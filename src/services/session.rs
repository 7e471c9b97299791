//! Chat session store.
//!
//! DESIGN
//! ======
//! Sessions are kept in a `Mutex<HashMap>` that is never held across an
//! await. A turn is opened with [`SessionStore::begin`], which marks the
//! session pending and hands back a [`PendingTurn`]. Dropping the turn,
//! including when a request future is cancelled mid-delay, clears the
//! pending flag, so a session can never get stuck busy.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::chat::ChatError;
use crate::assistant::replies::GREETING;
use crate::assistant::types::{ChatMessage, now_ms};

const DEFAULT_MAX_SESSIONS: usize = 1000;

#[derive(Debug, Clone, Serialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub created_at: i64,
    pub messages: Vec<ChatMessage>,
    pub pending: bool,
}

impl ChatSession {
    fn new() -> Self {
        Self { id: Uuid::new_v4(), created_at: now_ms(), messages: vec![ChatMessage::assistant(GREETING)], pending: false }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, ChatSession>>>,
    max_sessions: usize,
}

impl SessionStore {
    #[must_use]
    pub fn new(max_sessions: usize) -> Self {
        Self { inner: Arc::new(Mutex::new(HashMap::new())), max_sessions: max_sessions.max(1) }
    }

    /// Read `CHAT_MAX_SESSIONS` (default 1000).
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(crate::config::env_parse("CHAT_MAX_SESSIONS", DEFAULT_MAX_SESSIONS))
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, ChatSession>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open a new session seeded with the greeting. At capacity, the oldest
    /// idle session is evicted first.
    pub fn create(&self) -> ChatSession {
        let session = ChatSession::new();
        let mut sessions = self.lock();
        if sessions.len() >= self.max_sessions {
            let oldest = sessions
                .values()
                .filter(|s| !s.pending)
                .min_by_key(|s| s.created_at)
                .map(|s| s.id);
            if let Some(id) = oldest {
                sessions.remove(&id);
                info!(%id, "chat: evicted oldest session");
            }
        }
        sessions.insert(session.id, session.clone());
        session
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<ChatSession> {
        self.lock().get(&id).cloned()
    }

    /// Mark the session busy, append `user_message` if given, and return the
    /// turn handle plus the history including that message.
    ///
    /// # Errors
    ///
    /// [`ChatError::SessionNotFound`] for an unknown id, [`ChatError::Busy`]
    /// if a turn is already open on this session.
    pub fn begin(
        &self,
        id: Uuid,
        user_message: Option<ChatMessage>,
    ) -> Result<(PendingTurn, Vec<ChatMessage>), ChatError> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(&id).ok_or(ChatError::SessionNotFound(id))?;
        if session.pending {
            return Err(ChatError::Busy(id));
        }
        if let Some(msg) = user_message {
            session.messages.push(msg);
        }
        session.pending = true;
        let history = session.messages.clone();
        Ok((PendingTurn { store: self.clone(), id }, history))
    }
}

/// An open turn on a session. Closing it, by [`PendingTurn::finish`] or by
/// dropping it, clears the session's pending flag.
pub struct PendingTurn {
    store: SessionStore,
    id: Uuid,
}

impl PendingTurn {
    /// Append the assistant's reply and close the turn.
    pub fn finish(self, reply: ChatMessage) {
        if let Some(session) = self.store.lock().get_mut(&self.id) {
            session.messages.push(reply);
        }
    }
}

impl Drop for PendingTurn {
    fn drop(&mut self) {
        if let Some(session) = self.store.lock().get_mut(&self.id) {
            session.pending = false;
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
