//! Chat sessions — one conversation per mounted chat widget.
//!
//! A session is created when the widget opens, starts with the greeting
//! turn, and is discarded when the widget goes away. Nothing is persisted.
//!
//! LIFETIME
//! ========
//! A closed tab never says goodbye, so sessions also expire after
//! [`SessionLimits::idle_timeout`] without a read or a submission. Expired
//! sessions are dropped lazily on lookup, when the store is full, and by the
//! periodic [`SessionSweeper`]. A session with a reply in flight is never
//! idle. The store holds at most [`SessionLimits::max_sessions`]; creation
//! past that fails with [`SessionError::Full`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::router::{Conversation, Phase, QueryRouter, Submission};
use super::transcript::{Transcript, Turn};

pub const DEFAULT_SESSION_IDLE_SECS: u64 = 30 * 60;
pub const DEFAULT_MAX_SESSIONS: usize = 1000;
pub const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("too many open chat sessions (limit {limit})")]
    Full { limit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    pub idle_timeout: Duration,
    pub max_sessions: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self { idle_timeout: Duration::from_secs(DEFAULT_SESSION_IDLE_SECS), max_sessions: DEFAULT_MAX_SESSIONS }
    }
}

// =============================================================================
// SESSION
// =============================================================================

pub struct ChatSession {
    pub id: Uuid,
    conversation: Conversation,
    last_active: Mutex<Instant>,
}

/// Wire view of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub turns: Vec<Turn>,
    /// `true` while a remote reply is pending; drives the typing indicator.
    pub awaiting_reply: bool,
}

impl ChatSession {
    fn new_at(now: Instant) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation: Conversation::new(Transcript::with_greeting()),
            last_active: Mutex::new(now),
        }
    }

    fn last_active(&self) -> Instant {
        *self
            .last_active
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn touch_at(&self, now: Instant) {
        let mut last = self
            .last_active
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        // Never move backwards when a stale timestamp races a newer one.
        if now > *last {
            *last = now;
        }
    }

    fn touch(&self) {
        self.touch_at(Instant::now());
    }

    fn is_expired_at(&self, now: Instant, idle_timeout: Duration) -> bool {
        self.conversation.phase() == Phase::Idle && now.saturating_duration_since(self.last_active()) > idle_timeout
    }

    /// Current transcript. Counts as activity.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.touch();
        let (turns, phase) = self.conversation.view();
        SessionSnapshot { id: self.id, turns, awaiting_reply: phase == Phase::AwaitingReply }
    }

    /// Route `text` through `router` on a detached task.
    ///
    /// The task runs to completion even if the caller is dropped, so a user
    /// turn is always followed by its assistant turn.
    pub async fn submit(self: &Arc<Self>, router: &QueryRouter, text: &str) -> Submission {
        self.touch();
        let session = Arc::clone(self);
        let router = router.clone();
        let text = text.to_string();
        let task = tokio::spawn(async move {
            let outcome = router.submit(&session.conversation, &text).await;
            session.touch();
            outcome
        });
        match task.await {
            Ok(outcome) => outcome,
            Err(join_err) => std::panic::resume_unwind(join_err.into_panic()),
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

/// In-memory session registry, injected through `AppState`.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<ChatSession>>>>,
    limits: SessionLimits,
}

impl SessionStore {
    #[must_use]
    pub fn new(limits: SessionLimits) -> Self {
        Self { sessions: Arc::default(), limits }
    }

    #[must_use]
    pub fn limits(&self) -> SessionLimits {
        self.limits
    }

    /// Open a session starting with the greeting turn.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Full`] when `max_sessions` are open and none
    /// of them has gone idle.
    pub async fn create(&self) -> Result<Arc<ChatSession>, SessionError> {
        self.create_at(Instant::now()).await
    }

    async fn create_at(&self, now: Instant) -> Result<Arc<ChatSession>, SessionError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.limits.max_sessions {
            let evicted = evict_expired(&mut sessions, now, self.limits.idle_timeout);
            if sessions.len() >= self.limits.max_sessions {
                warn!(limit = self.limits.max_sessions, "chat: session limit reached");
                return Err(SessionError::Full { limit: self.limits.max_sessions });
            }
            debug!(evicted, "chat: made room by evicting idle sessions");
        }

        let session = Arc::new(ChatSession::new_at(now));
        sessions.insert(session.id, session.clone());
        info!(session_id = %session.id, active = sessions.len(), "chat: session opened");
        Ok(session)
    }

    /// Live session by id. An expired session is removed and reported missing.
    pub async fn get(&self, id: Uuid) -> Option<Arc<ChatSession>> {
        self.get_at(id, Instant::now()).await
    }

    async fn get_at(&self, id: Uuid, now: Instant) -> Option<Arc<ChatSession>> {
        let session = self.sessions.read().await.get(&id).cloned()?;
        if !session.is_expired_at(now, self.limits.idle_timeout) {
            return Some(session);
        }
        let mut sessions = self.sessions.write().await;
        if sessions.get(&id).is_some_and(|s| s.is_expired_at(now, self.limits.idle_timeout)) {
            sessions.remove(&id);
            info!(session_id = %id, "chat: session expired");
        }
        None
    }

    /// Discard a session. Returns `false` if it did not exist.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!(session_id = %id, "chat: session closed");
        }
        removed
    }

    /// Drop every idle session. Returns how many were removed.
    pub async fn sweep(&self) -> usize {
        self.sweep_at(Instant::now()).await
    }

    async fn sweep_at(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        evict_expired(&mut sessions, now, self.limits.idle_timeout)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn evict_expired(sessions: &mut HashMap<Uuid, Arc<ChatSession>>, now: Instant, idle_timeout: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|_, session| !session.is_expired_at(now, idle_timeout));
    before - sessions.len()
}

// =============================================================================
// SWEEPER
// =============================================================================

/// Owns the idle-session sweep task; dropping it cancels the task.
pub struct SessionSweeper {
    handle: JoinHandle<()>,
}

impl SessionSweeper {
    /// Sweep `store` every `interval`.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero (see [`tokio::time::interval`]).
    #[must_use]
    pub fn spawn(store: SessionStore, interval: Duration) -> Self {
        info!(
            interval_secs = interval.as_secs(),
            idle_secs = store.limits().idle_timeout.as_secs(),
            max_sessions = store.limits().max_sessions,
            "chat session sweeper started"
        );
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let evicted = store.sweep().await;
                if evicted > 0 {
                    let active = store.len().await;
                    info!(evicted, active, "chat: idle sessions evicted");
                }
            }
        });
        Self { handle }
    }
}

impl Drop for SessionSweeper {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
