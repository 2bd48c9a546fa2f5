//! Remote completion — answers free-text questions the canned table misses.
//!
//! DESIGN
//! ======
//! `CompletionClient` is the seam the query router depends on. Three
//! implementations:
//! - `HttpCompletionClient` POSTs `{question}` to an endpoint and reads `{answer}`.
//! - `LlmCompletionClient` asks the configured LLM provider in-process.
//! - `UnavailableCompletionClient` always fails, for deployments with neither.
//!
//! ERROR HANDLING
//! ==============
//! One attempt per question, no retries. Transport failures and non-2xx
//! statuses are `RemoteUnavailable` whatever the body says. A 2xx body
//! without an answer is not an error: it degrades to [`FALLBACK_ANSWER`].

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::llm::LlmChat;
use crate::llm::types::Message;

/// Answer used when the service replied successfully but said nothing.
pub const FALLBACK_ANSWER: &str = "Sorry, I couldn't find an answer.";

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("question is empty")]
    Validation,
    #[error("completion service unavailable: {0}")]
    RemoteUnavailable(String),
}

/// Wire request for the completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub question: String,
}

/// Wire response for the completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub answer: String,
}

#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Answer one question.
    ///
    /// # Errors
    ///
    /// [`CompletionError::Validation`] when the question is blank (no I/O is
    /// attempted), [`CompletionError::RemoteUnavailable`] on any service failure.
    async fn complete(&self, question: &str) -> Result<String, CompletionError>;
}

fn validate_question(question: &str) -> Result<(), CompletionError> {
    if question.trim().is_empty() {
        return Err(CompletionError::Validation);
    }
    Ok(())
}

// =============================================================================
// HTTP ENDPOINT
// =============================================================================

pub struct HttpCompletionClient {
    http: reqwest::Client,
    url: String,
}

impl HttpCompletionClient {
    /// # Errors
    ///
    /// Returns [`CompletionError::RemoteUnavailable`] if the HTTP client
    /// cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::RemoteUnavailable(e.to_string()))?;
        Ok(Self { http, url: url.into() })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, question: &str) -> Result<String, CompletionError> {
        validate_question(question)?;

        let response = self
            .http
            .post(&self.url)
            .json(&CompletionRequest { question: question.to_string() })
            .send()
            .await
            .map_err(|e| CompletionError::RemoteUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::RemoteUnavailable(format!("status {}", status.as_u16())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::RemoteUnavailable(e.to_string()))?;
        Ok(answer_from_body(&body))
    }
}

/// Extract `answer` from a 2xx body, falling back when it is missing.
pub(crate) fn answer_from_body(body: &str) -> String {
    let answer = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|root| root.get("answer").and_then(Value::as_str).map(str::to_owned));
    if let Some(answer) = answer {
        return answer;
    }
    warn!(body_len = body.len(), "completion: response missing answer field");
    FALLBACK_ANSWER.to_string()
}

// =============================================================================
// IN-PROCESS LLM
// =============================================================================

pub struct LlmCompletionClient {
    llm: Arc<dyn LlmChat>,
    max_tokens: u32,
}

impl LlmCompletionClient {
    #[must_use]
    pub fn new(llm: Arc<dyn LlmChat>, max_tokens: u32) -> Self {
        Self { llm, max_tokens }
    }
}

#[async_trait::async_trait]
impl CompletionClient for LlmCompletionClient {
    async fn complete(&self, question: &str) -> Result<String, CompletionError> {
        validate_question(question)?;

        let response = self
            .llm
            .chat(self.max_tokens, &[Message::user(question)])
            .await
            .map_err(|e| {
                warn!(error = %e, retryable = e.retryable(), "completion: llm call failed");
                CompletionError::RemoteUnavailable(e.to_string())
            })?;
        debug!(
            model = %response.model,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "completion: llm answered"
        );

        Ok(response
            .text()
            .map_or_else(|| FALLBACK_ANSWER.to_string(), str::to_owned))
    }
}

// =============================================================================
// UNAVAILABLE
// =============================================================================

/// Stand-in when no completion backend is configured.
pub struct UnavailableCompletionClient;

#[async_trait::async_trait]
impl CompletionClient for UnavailableCompletionClient {
    async fn complete(&self, question: &str) -> Result<String, CompletionError> {
        validate_question(question)?;
        Err(CompletionError::RemoteUnavailable("no completion backend configured".into()))
    }
}

#[cfg(test)]
#[path = "completion_test.rs"]
mod tests;
