//! Aggregate analytics endpoints for the admin dashboard.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use pathlight_core::error::CoreError;
use pathlight_core::types::DbId;
use pathlight_db::models::learner::{DepartmentCount, DepartmentProgress};
use pathlight_db::repositories::{LearnerRepo, TaskRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Organization-wide learning metrics.
#[derive(Debug, Serialize)]
pub struct Overview {
    pub total_learners: i64,
    pub avg_progress: f64,
    pub learners_by_department: Vec<DepartmentCount>,
    pub progress_by_department: Vec<DepartmentProgress>,
}

/// Per-learner task and progress summary.
#[derive(Debug, Serialize)]
pub struct LearnerSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub learning_progress: i32,
    pub current_course: String,
}

/// GET /analytics -- organization-wide aggregates.
pub async fn overview(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Overview>>> {
    let total_learners = LearnerRepo::count_all(&state.pool).await?;
    let avg_progress = LearnerRepo::overall_avg_progress(&state.pool).await?;
    let learners_by_department = LearnerRepo::counts_by_department(&state.pool).await?;
    let progress_by_department = LearnerRepo::avg_progress_by_department(&state.pool).await?;

    Ok(Json(DataResponse {
        data: Overview {
            total_learners,
            avg_progress,
            learners_by_department,
            progress_by_department,
        },
    }))
}

/// GET /learners/{id}/analytics -- task counts and progress for one learner.
pub async fn learner_summary(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LearnerSummary>>> {
    let learner = LearnerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Learner", id))?;

    let tasks = TaskRepo::list_for_learner(&state.pool, id).await?;
    let completed_tasks = tasks.iter().filter(|t| t.completed).count();

    Ok(Json(DataResponse {
        data: LearnerSummary {
            total_tasks: tasks.len(),
            completed_tasks,
            learning_progress: learner.learning_progress,
            current_course: learner.current_course,
        },
    }))
}
