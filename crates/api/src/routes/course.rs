//! Route definitions for the course catalog.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::course;
use crate::state::AppState;

/// Routes mounted at `/courses`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(course::list))
        .route("/generate", post(course::generate))
        .route("/{id}", get(course::get).delete(course::delete))
        .route(
            "/{course_id}/modules/{module_id}/generate-content",
            post(course::generate_module_content),
        )
}
