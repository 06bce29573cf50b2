//! Remedial suggestion review endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use pathlight_core::error::CoreError;
use pathlight_core::suggestion;
use pathlight_core::types::DbId;
use pathlight_db::repositories::SuggestionRepo;

use crate::engine::remedial;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for listing suggestions.
#[derive(Debug, Deserialize)]
pub struct ListFilter {
    pub status: Option<String>,
}

/// GET /suggestions -- list suggestions, optionally filtered by status.
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ListFilter>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    if let Some(status) = filter.status.as_deref() {
        if !suggestion::VALID_STATUSES.contains(&status) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid suggestion status '{status}'. Must be one of: {}",
                suggestion::VALID_STATUSES.join(", ")
            ))));
        }
    }

    let items = SuggestionRepo::list(&state.pool, filter.status.as_deref()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /suggestions/{id}/approve -- splice the remedial module into the
/// learner's plan and mark the suggestion approved.
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let updated = remedial::approve_suggestion(&state.pool, &state.content_client, id).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// POST /suggestions/{id}/dismiss -- terminal dismissal, no side effects.
pub async fn dismiss(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let updated = remedial::dismiss_suggestion(&state.pool, id).await?;
    Ok(Json(DataResponse { data: updated }))
}
