//! Completion proxy — `POST /api/chatgpt`.
//!
//! Thin bridge from `{question}` to the configured LLM. Answers `{answer}`
//! on success, 400 for a blank question, 503 when stubbed or unconfigured,
//! and 500 when the provider call fails.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use super::json_error;
use crate::chat::completion::{CompletionResponse, FALLBACK_ANSWER};
use crate::llm::types::Message;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuestionBody {
    #[serde(default)]
    pub question: Option<String>,
}

fn unavailable(message: &str) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "error": "Service unavailable", "message": message })),
    )
        .into_response()
}

/// `POST /api/chatgpt` — answer one free-text question.
pub async fn chatgpt(State(state): State<AppState>, body: Result<Json<QuestionBody>, JsonRejection>) -> Response {
    if state.proxy.stub {
        return unavailable("The completion service is disabled in this build.");
    }

    let question = body
        .ok()
        .and_then(|Json(body)| body.question)
        .filter(|q| !q.trim().is_empty());
    let Some(question) = question else {
        return json_error(StatusCode::BAD_REQUEST, "Question is required.");
    };

    let Some(llm) = state.proxy.llm.as_ref() else {
        return unavailable("The completion service is not configured.");
    };

    match llm.chat(state.proxy.max_tokens, &[Message::user(question.as_str())]).await {
        Ok(response) => {
            info!(
                model = %response.model,
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                "chatgpt: answered"
            );
            let answer = response
                .text()
                .map_or_else(|| FALLBACK_ANSWER.to_string(), str::to_owned);
            Json(CompletionResponse { answer }).into_response()
        }
        Err(e) => {
            error!(error = %e, retryable = e.retryable(), "chatgpt: provider call failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch response from ChatGPT.")
        }
    }
}

#[cfg(test)]
#[path = "completion_test.rs"]
mod tests;
