//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! JSON API routes live under `/api`. Anything else falls through to the
//! static portfolio website directory.

pub mod blog;
pub mod chat;
pub mod completion;
pub mod contact;
pub mod projects;

use std::path::Path;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON API routes.
pub fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chatgpt", post(completion::chatgpt))
        .route("/api/chat/sessions", post(chat::create_session))
        .route(
            "/api/chat/sessions/{id}",
            get(chat::get_session).delete(chat::delete_session),
        )
        .route("/api/chat/sessions/{id}/messages", post(chat::post_message))
        .route("/api/projects", get(projects::list_projects))
        .route("/api/projects/featured", get(projects::featured))
        .route("/api/projects/featured/next", post(projects::featured_next))
        .route("/api/projects/featured/prev", post(projects::featured_prev))
        .route("/api/projects/featured/{index}", post(projects::featured_go_to))
        .route("/api/blog", get(blog::list_posts))
        .route("/api/blog/{slug}", get(blog::get_post))
        .route("/api/contact", post(contact::submit))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// API routes plus the static website at `/`.
pub fn app(state: AppState, website_dir: &Path) -> Router {
    let website_service = ServeDir::new(website_dir).append_index_html_on_directories(true);
    api_routes(state)
        .fallback_service(website_service)
        .layer(TraceLayer::new_for_http())
}

/// `{ "error": ... }` body with the given status.
pub(crate) fn json_error(status: StatusCode, error: impl Into<String>) -> Response {
    (status, Json(json!({ "error": error.into() }))).into_response()
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
