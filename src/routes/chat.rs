//! Chat session routes — the chat widget's back end.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::json_error;
use crate::chat::router::Submission;
use crate::chat::session::{SessionError, SessionSnapshot};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ignored,
    Canned,
    Answered,
    Failed,
}

impl From<&Submission> for Outcome {
    fn from(submission: &Submission) -> Self {
        match submission {
            Submission::Ignored => Self::Ignored,
            Submission::Canned { .. } => Self::Canned,
            Submission::Answered { .. } => Self::Answered,
            Submission::Failed { .. } => Self::Failed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub outcome: Outcome,
    pub reply: Option<String>,
    pub session: SessionSnapshot,
}

fn session_not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "chat session not found")
}

fn session_error_to_status(err: &SessionError) -> StatusCode {
    match err {
        SessionError::Full { .. } => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// `POST /api/chat/sessions` — open a session with the greeting turn.
pub async fn create_session(State(state): State<AppState>) -> Response {
    match state.sessions.create().await {
        Ok(session) => (StatusCode::CREATED, Json(session.snapshot())).into_response(),
        Err(e) => json_error(session_error_to_status(&e), e.to_string()),
    }
}

/// `GET /api/chat/sessions/{id}` — current transcript.
pub async fn get_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.sessions.get(id).await {
        Some(session) => Json(session.snapshot()).into_response(),
        None => session_not_found(),
    }
}

/// `DELETE /api/chat/sessions/{id}` — discard a session.
pub async fn delete_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    if state.sessions.remove(id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        session_not_found()
    }
}

/// `POST /api/chat/sessions/{id}/messages` — submit one user message.
///
/// Responds once the reply has been appended. Blank text is accepted and
/// ignored, leaving the transcript unchanged.
pub async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<MessageBody>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = body else {
        return json_error(StatusCode::BAD_REQUEST, "expected JSON body with `text`");
    };
    let Some(session) = state.sessions.get(id).await else {
        return session_not_found();
    };

    let submission = session.submit(&state.router, &body.text).await;
    Json(MessageResponse {
        outcome: Outcome::from(&submission),
        reply: submission.reply().map(str::to_owned),
        session: session.snapshot(),
    })
    .into_response()
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
