//! Assessment creation, submission, and history endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use pathlight_core::types::DbId;
use pathlight_db::models::assessment::SubmitAnswers;
use pathlight_db::repositories::AssessmentRepo;

use crate::engine::assessment;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /learners/{id}/assessments/proficiency -- create a pending
/// proficiency assessment for the learner's current course.
pub async fn start_proficiency(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<impl serde::Serialize>>)> {
    let created =
        assessment::start_proficiency_assessment(&state.pool, &state.content_client, id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// POST /learners/{id}/tasks/{task_id}/assessment -- create a pending
/// module assessment for one assigned task.
pub async fn start_module(
    State(state): State<AppState>,
    Path((id, task_id)): Path<(DbId, DbId)>,
) -> AppResult<(StatusCode, Json<DataResponse<impl serde::Serialize>>)> {
    let created =
        assessment::start_module_assessment(&state.pool, &state.content_client, id, task_id)
            .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// POST /assessments/{id}/submit -- score a submission and apply its
/// consequences. Body: `{ "answers": { "<question_id>": "<answer>" } }`.
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SubmitAnswers>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let result =
        assessment::submit_assessment(&state.pool, &state.content_client, id, &input.answers)
            .await?;
    Ok(Json(DataResponse { data: result }))
}

/// GET /learners/{id}/assessments -- completed assessment history.
pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let items = AssessmentRepo::list_completed_for_learner(&state.pool, id).await?;
    Ok(Json(DataResponse { data: items }))
}
