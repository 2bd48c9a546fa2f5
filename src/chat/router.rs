//! Query router — decides how each chat message gets answered.
//!
//! DESIGN
//! ======
//! Per submitted message the conversation goes `Idle → AwaitingReply → Idle`:
//! 1. Blank input is ignored; nothing is appended.
//! 2. The normalized input is looked up in the canned table. A hit appends
//!    the raw user turn and the canned reply together; the completion client
//!    is never called.
//! 3. A miss appends the raw user turn and enters `AwaitingReply` in one
//!    step, awaits the completion client, then appends its answer (or the
//!    fixed apology on failure) and leaves `AwaitingReply` in one step.
//!
//! Failures never escape `submit`; the transcript is the only place they show.
//!
//! CONCURRENCY
//! ===========
//! The transcript lock is never held across the completion call. Two
//! overlapping submissions on one conversation are not serialized, so their
//! replies land in arrival order rather than request order.
//!
//! Every transition happens under the transcript lock, so a
//! [`Conversation::view`] never shows `Idle` with an unanswered user turn.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use super::canned::{CannedResponses, normalize};
use super::completion::{CompletionClient, CompletionError};
use super::transcript::{Transcript, Turn};

/// Assistant text appended when the completion client fails.
pub const APOLOGY_TEXT: &str = "Oops, something went wrong 😅";

// =============================================================================
// CONVERSATION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingReply,
}

/// A transcript plus the count of replies still being fetched for it.
#[derive(Debug, Default)]
pub struct Conversation {
    transcript: Mutex<Transcript>,
    awaiting: AtomicUsize,
}

impl Conversation {
    #[must_use]
    pub fn new(transcript: Transcript) -> Self {
        Self { transcript: Mutex::new(transcript), awaiting: AtomicUsize::new(0) }
    }

    fn lock(&self) -> MutexGuard<'_, Transcript> {
        self.transcript
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// `AwaitingReply` while at least one completion is in flight.
    #[must_use]
    pub fn phase(&self) -> Phase {
        phase_of(&self.awaiting)
    }

    /// Turns and phase read under one lock, so `Idle` is never observed
    /// with an unanswered user turn at the end.
    #[must_use]
    pub fn view(&self) -> (Vec<Turn>, Phase) {
        let transcript = self.lock();
        (transcript.all().to_vec(), phase_of(&self.awaiting))
    }

    /// User turn and its canned reply, appended as one step.
    fn append_exchange(&self, question: Turn, reply: Turn) {
        let mut transcript = self.lock();
        transcript.append(question);
        transcript.append(reply);
    }

    /// Append the user turn and enter `AwaitingReply` as one step.
    fn begin_await(&self, question: Turn) -> AwaitGuard<'_> {
        let mut transcript = self.lock();
        transcript.append(question);
        self.awaiting.fetch_add(1, Ordering::SeqCst);
        AwaitGuard { awaiting: &self.awaiting }
    }

    /// Append the reply for an awaited request, then leave `AwaitingReply`
    /// while the transcript lock is still held.
    fn finish_await(&self, guard: AwaitGuard<'_>, turn: Turn) {
        let mut transcript = self.lock();
        transcript.append(turn);
        drop(guard);
    }
}

fn phase_of(awaiting: &AtomicUsize) -> Phase {
    if awaiting.load(Ordering::SeqCst) > 0 { Phase::AwaitingReply } else { Phase::Idle }
}

/// Returns the conversation to `Idle` however the await ends. Normally
/// dropped inside [`Conversation::finish_await`]; dropped early only when the
/// submitting task panics or is cancelled.
struct AwaitGuard<'a> {
    awaiting: &'a AtomicUsize,
}

impl Drop for AwaitGuard<'_> {
    fn drop(&mut self) {
        self.awaiting.fetch_sub(1, Ordering::SeqCst);
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// How one submission was answered.
#[derive(Debug)]
pub enum Submission {
    /// Blank input; the transcript is unchanged.
    Ignored,
    Canned { reply: String },
    Answered { reply: String },
    Failed { reply: String, error: CompletionError },
}

impl Submission {
    /// Assistant text appended for this submission, if any.
    #[must_use]
    pub fn reply(&self) -> Option<&str> {
        match self {
            Self::Ignored => None,
            Self::Canned { reply } | Self::Answered { reply } | Self::Failed { reply, .. } => Some(reply),
        }
    }
}

#[derive(Clone)]
pub struct QueryRouter {
    canned: Arc<CannedResponses>,
    client: Arc<dyn CompletionClient>,
}

impl QueryRouter {
    #[must_use]
    pub fn new(canned: Arc<CannedResponses>, client: Arc<dyn CompletionClient>) -> Self {
        Self { canned, client }
    }

    #[must_use]
    pub fn canned(&self) -> &CannedResponses {
        &self.canned
    }

    /// Route one user message into `conversation`.
    pub async fn submit(&self, conversation: &Conversation, text: &str) -> Submission {
        if text.trim().is_empty() {
            return Submission::Ignored;
        }

        let key = normalize(text);
        if let Some(reply) = self.canned.lookup(&key) {
            info!(trigger = %key, "chat: canned reply");
            conversation.append_exchange(Turn::user(text), Turn::assistant(reply));
            return Submission::Canned { reply: reply.to_string() };
        }

        let awaiting = conversation.begin_await(Turn::user(text));
        match self.client.complete(text).await {
            Ok(reply) => {
                info!(question_len = text.len(), answer_len = reply.len(), "chat: remote reply");
                conversation.finish_await(awaiting, Turn::assistant(reply.clone()));
                Submission::Answered { reply }
            }
            Err(error) => {
                warn!(%error, "chat: completion failed");
                conversation.finish_await(awaiting, Turn::assistant(APOLOGY_TEXT));
                Submission::Failed { reply: APOLOGY_TEXT.to_string(), error }
            }
        }
    }
}

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;
