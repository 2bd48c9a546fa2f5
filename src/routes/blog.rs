//! Blog listing and post pages.

use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::json_error;
use crate::content::{BlogSummary, blog_summaries, find_post};

pub async fn list_posts() -> Json<Vec<BlogSummary>> {
    Json(blog_summaries())
}

pub async fn get_post(Path(slug): Path<String>) -> Response {
    match find_post(&slug) {
        Some(post) => Json(post).into_response(),
        None => json_error(StatusCode::NOT_FOUND, "post not found"),
    }
}

#[cfg(test)]
#[path = "blog_test.rs"]
mod tests;
