//! `POST /api/contact` — visitor message to the site owner.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};

use super::json_error;
use crate::services::contact::{ContactError, ContactForm};
use crate::state::AppState;

fn contact_error_to_status(err: &ContactError) -> StatusCode {
    match err {
        ContactError::MissingField(_) | ContactError::TooLong(_) | ContactError::InvalidEmail => {
            StatusCode::BAD_REQUEST
        }
        ContactError::EmailDelivery(_) => StatusCode::BAD_GATEWAY,
    }
}

pub async fn submit(State(state): State<AppState>, body: Result<Json<ContactForm>, JsonRejection>) -> Response {
    let Ok(Json(form)) = body else {
        return json_error(StatusCode::BAD_REQUEST, "expected JSON contact form");
    };
    let message = match form.validate() {
        Ok(message) => message,
        Err(e) => return json_error(contact_error_to_status(&e), e.to_string()),
    };
    let Some(mailer) = state.mailer.as_ref() else {
        warn!("contact: mailer not configured");
        return json_error(StatusCode::SERVICE_UNAVAILABLE, "contact form is not configured");
    };

    match mailer.send(&message).await {
        Ok(()) => (StatusCode::ACCEPTED, Json(json!({ "status": "sent" }))).into_response(),
        Err(e) => {
            error!(error = %e, "contact: delivery failed");
            json_error(contact_error_to_status(&e), "failed to send message")
        }
    }
}

#[cfg(test)]
#[path = "contact_test.rs"]
mod tests;
