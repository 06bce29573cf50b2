//! Learner CRUD, skill profiles, and notifications.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use pathlight_core::error::CoreError;
use pathlight_core::types::DbId;
use pathlight_db::models::learner::{CreateLearner, UpdatePlacement};
use pathlight_db::repositories::{
    CompletedCourseRepo, LearnerRepo, NotificationRepo, SkillProfileRepo,
};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /learners -- register a learner.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<CreateLearner>,
) -> AppResult<(StatusCode, Json<DataResponse<impl serde::Serialize>>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let learner = LearnerRepo::create(&state.pool, &input).await?;
    tracing::info!(learner_id = learner.id, username = %learner.username, "Learner registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: learner })))
}

/// GET /learners -- list all learners.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let learners = LearnerRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: learners }))
}

/// GET /learners/{id} -- fetch one learner.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let learner = LearnerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Learner", id))?;
    Ok(Json(DataResponse { data: learner }))
}

/// PUT /learners/{id} -- update role and/or department.
pub async fn update_placement(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePlacement>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let learner = LearnerRepo::update_placement(&state.pool, id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Learner", id))?;
    tracing::info!(learner_id = id, "Learner placement updated");
    Ok(Json(DataResponse { data: learner }))
}

/// DELETE /learners/{id} -- remove a learner and all dependent rows.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = LearnerRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Learner", id)));
    }
    tracing::info!(learner_id = id, "Learner deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /learners/{id}/skill-profiles -- profiles with topic verdicts.
pub async fn skill_profiles(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    LearnerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Learner", id))?;

    let profiles = SkillProfileRepo::list_for_learner(&state.pool, id).await?;
    Ok(Json(DataResponse { data: profiles }))
}

/// GET /learners/{id}/completed-courses -- archived course history with
/// task snapshots (the learner's resource library).
pub async fn completed_courses(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    LearnerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Learner", id))?;

    let history = CompletedCourseRepo::list_for_learner(&state.pool, id).await?;
    Ok(Json(DataResponse { data: history }))
}

/// GET /learners/{id}/notifications -- newest first.
pub async fn notifications(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let items = NotificationRepo::list_for_learner(&state.pool, id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// PUT /learners/{id}/notifications/mark-read -- mark all read.
pub async fn mark_notifications_read(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let updated = NotificationRepo::mark_all_read(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "updated": updated }),
    }))
}
