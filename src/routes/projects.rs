//! Project showcase and the featured-project carousel.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::json_error;
use crate::carousel::Navigation;
use crate::content::{PROJECTS, Project};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FeaturedView {
    pub index: usize,
    pub total: usize,
    pub project: &'static Project,
}

fn featured_view(index: usize) -> Response {
    match PROJECTS.get(index) {
        Some(project) => Json(FeaturedView { index, total: PROJECTS.len(), project }).into_response(),
        None => json_error(StatusCode::INTERNAL_SERVER_ERROR, "carousel out of sync with projects"),
    }
}

pub async fn list_projects() -> Json<&'static [Project]> {
    Json(PROJECTS)
}

/// `GET /api/projects/featured`
pub async fn featured(State(state): State<AppState>) -> Response {
    featured_view(state.carousel.current())
}

pub async fn featured_next(State(state): State<AppState>) -> Response {
    featured_view(state.carousel.navigate(Navigation::Next))
}

pub async fn featured_prev(State(state): State<AppState>) -> Response {
    featured_view(state.carousel.navigate(Navigation::Prev))
}

/// Jump to an indicator dot. Indices past the end wrap.
pub async fn featured_go_to(State(state): State<AppState>, Path(index): Path<usize>) -> Response {
    featured_view(state.carousel.navigate(Navigation::GoTo(index)))
}

#[cfg(test)]
#[path = "projects_test.rs"]
mod tests;
