//! Route definitions for learners, their plans, and progression state.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{analytics, assessment, learner, progression};
use crate::state::AppState;

/// Routes mounted at `/learners`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(learner::list).post(learner::register))
        .route(
            "/{id}",
            get(learner::get)
                .put(learner::update_placement)
                .delete(learner::delete),
        )
        .route(
            "/{id}/course",
            post(progression::assign_course).delete(progression::unassign_course),
        )
        .route(
            "/{id}/tasks",
            get(progression::list_tasks).post(progression::schedule_task),
        )
        .route("/{id}/tasks/{task_id}", delete(progression::remove_task))
        .route(
            "/{id}/tasks/{task_id}/complete",
            put(progression::complete_task),
        )
        .route(
            "/{id}/tasks/{task_id}/assessment",
            post(assessment::start_module),
        )
        .route("/{id}/assessments", get(assessment::history))
        .route(
            "/{id}/assessments/proficiency",
            post(assessment::start_proficiency),
        )
        .route("/{id}/reset-assessment", put(progression::reset_assessment))
        .route("/{id}/skill-profiles", get(learner::skill_profiles))
        .route("/{id}/completed-courses", get(learner::completed_courses))
        .route("/{id}/notifications", get(learner::notifications))
        .route(
            "/{id}/notifications/mark-read",
            put(learner::mark_notifications_read),
        )
        .route("/{id}/analytics", get(analytics::learner_summary))
}
