//! Route definitions for remedial suggestion review.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::suggestion;
use crate::state::AppState;

/// Routes mounted at `/suggestions`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(suggestion::list))
        .route("/{id}/approve", post(suggestion::approve))
        .route("/{id}/dismiss", post(suggestion::dismiss))
}
