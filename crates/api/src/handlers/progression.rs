//! Course assignment and task lifecycle endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use pathlight_core::types::DbId;
use pathlight_db::models::task::ScheduleTask;
use pathlight_db::repositories::TaskRepo;

use crate::engine::progression;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for assigning a course by name.
#[derive(Debug, Deserialize)]
pub struct AssignCourse {
    pub course_name: String,
}

/// POST /learners/{id}/course -- assign a course.
pub async fn assign_course(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignCourse>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let learner = progression::assign_course(&state.pool, id, &input.course_name).await?;
    Ok(Json(DataResponse { data: learner }))
}

/// DELETE /learners/{id}/course -- unassign the current course.
pub async fn unassign_course(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    progression::unassign_course(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /learners/{id}/tasks -- the learner's plan in order.
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let tasks = TaskRepo::list_for_learner(&state.pool, id).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// POST /learners/{id}/tasks -- schedule an ad-hoc task.
pub async fn schedule_task(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ScheduleTask>,
) -> AppResult<(StatusCode, Json<DataResponse<impl serde::Serialize>>)> {
    let task = progression::schedule_task(&state.pool, id, &input.title, input.due_date).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// DELETE /learners/{id}/tasks/{task_id} -- remove a task and recompute
/// progress.
pub async fn remove_task(
    State(state): State<AppState>,
    Path((id, task_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let outcome = progression::remove_task(&state.pool, id, task_id).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// PUT /learners/{id}/tasks/{task_id}/complete -- mark complete, recompute
/// progress, archive the course at 100%.
pub async fn complete_task(
    State(state): State<AppState>,
    Path((id, task_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let outcome = progression::complete_task(&state.pool, id, task_id).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// PUT /learners/{id}/reset-assessment -- admin reset of assessment state.
pub async fn reset_assessment(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    progression::reset_assessment(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
