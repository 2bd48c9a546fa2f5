//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the chat query router and open chat sessions, the optional LLM
//! behind the completion proxy, the featured-project carousel, and the
//! optional contact mailer.

use std::sync::Arc;

use crate::carousel::CarouselState;
use crate::chat::{QueryRouter, SessionStore};
use crate::llm::LlmChat;
use crate::services::contact::ContactMailer;

/// Options for the `/api/chatgpt` completion proxy.
#[derive(Clone)]
pub struct CompletionProxy {
    /// Optional LLM client. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
    pub max_tokens: u32,
    /// Always answer 503, as during static builds.
    pub stub: bool,
}

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub proxy: CompletionProxy,
    pub router: QueryRouter,
    pub sessions: SessionStore,
    pub carousel: CarouselState,
    /// `None` when Resend is not configured; contact submissions get 503.
    pub mailer: Option<ContactMailer>,
}

impl AppState {
    #[must_use]
    pub fn new(
        proxy: CompletionProxy,
        router: QueryRouter,
        sessions: SessionStore,
        carousel: CarouselState,
        mailer: Option<ContactMailer>,
    ) -> Self {
        Self { proxy, router, sessions, carousel, mailer }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
