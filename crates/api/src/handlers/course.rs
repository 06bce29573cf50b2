//! Course catalog and AI content generation endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use pathlight_core::error::CoreError;
use pathlight_core::types::DbId;
use pathlight_db::models::course::{CreateCourse, GenerateCourseRequest, NewCourseModule};
use pathlight_db::repositories::CourseRepo;

use crate::engine::to_jsonb;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /courses/generate -- create a course from AI-generated structure.
pub async fn generate(
    State(state): State<AppState>,
    Json(input): Json<GenerateCourseRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<impl serde::Serialize>>)> {
    let generated = state
        .content_client
        .generate_course(&input.target_role)
        .await?;

    let mut modules = Vec::with_capacity(generated.modules.len());
    for module in &generated.modules {
        modules.push(NewCourseModule {
            title: module.title.clone(),
            summary: module.summary.clone(),
            articles: to_jsonb(&module.articles)?,
            video: module.video.as_ref().map(to_jsonb).transpose()?,
            content: String::new(),
        });
    }

    let course = CourseRepo::create(
        &state.pool,
        &CreateCourse {
            name: generated.name,
            description: generated.description,
            target_department: input.target_department,
            target_role: input.target_role,
            modules,
        },
    )
    .await?;

    tracing::info!(
        course_id = course.course.id,
        course_name = %course.course.name,
        module_count = course.modules.len(),
        "Course generated"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: course })))
}

/// GET /courses -- list the catalog (modules not included).
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let courses = CourseRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// GET /courses/{id} -- one course with its ordered modules.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let course = CourseRepo::find_by_id_with_modules(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Course", id))?;
    Ok(Json(DataResponse { data: course }))
}

/// DELETE /courses/{id} -- remove a course and its modules.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = CourseRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Course", id)));
    }
    tracing::info!(course_id = id, "Course deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /courses/{course_id}/modules/{module_id}/generate-content --
/// fill in generated learning materials for one module.
pub async fn generate_module_content(
    State(state): State<AppState>,
    Path((course_id, module_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<impl serde::Serialize>>> {
    let course = CourseRepo::find_by_id_with_modules(&state.pool, course_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Course", course_id))?;

    let module = course
        .modules
        .iter()
        .find(|m| m.id == module_id)
        .ok_or_else(|| CoreError::not_found("Course module", module_id))?;

    let content = state
        .content_client
        .generate_module_content(&module.title)
        .await?;

    let articles = to_jsonb(&content.articles)?;
    let video = content.video.as_ref().map(to_jsonb).transpose()?;
    let updated = CourseRepo::update_module_content(
        &state.pool,
        course_id,
        module_id,
        &content.summary,
        &articles,
        video.as_ref(),
    )
    .await?
    .ok_or_else(|| CoreError::not_found("Course module", module_id))?;

    tracing::info!(course_id, module_id, "Module content generated");
    Ok(Json(DataResponse { data: updated }))
}
