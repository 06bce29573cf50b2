//! Route definitions for assessment submission.

use axum::routing::post;
use axum::Router;

use crate::handlers::assessment;
use crate::state::AppState;

/// Routes mounted at `/assessments`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/submit", post(assessment::submit))
}
