pub mod assessment;
pub mod course;
pub mod health;
pub mod learner;
pub mod suggestion;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /learners                                        list, register
/// /learners/{id}                                   get, update placement, delete
/// /learners/{id}/course                            assign (POST), unassign (DELETE)
/// /learners/{id}/tasks                             list, schedule ad-hoc (POST)
/// /learners/{id}/tasks/{task_id}                   remove (DELETE)
/// /learners/{id}/tasks/{task_id}/complete          mark complete (PUT)
/// /learners/{id}/tasks/{task_id}/assessment        start module assessment (POST)
/// /learners/{id}/assessments                       completed history (GET)
/// /learners/{id}/assessments/proficiency           start proficiency assessment (POST)
/// /learners/{id}/reset-assessment                  reset assessment state (PUT)
/// /learners/{id}/skill-profiles                    profiles with topic verdicts (GET)
/// /learners/{id}/completed-courses                 archived course history (GET)
/// /learners/{id}/notifications                     list (GET)
/// /learners/{id}/notifications/mark-read           mark all read (PUT)
/// /learners/{id}/analytics                         per-learner summary (GET)
///
/// /courses                                         list (GET)
/// /courses/generate                                AI course creation (POST)
/// /courses/{id}                                    get, delete
/// /courses/{course_id}/modules/{module_id}/generate-content  fill content (POST)
///
/// /assessments/{id}/submit                         score a submission (POST)
///
/// /suggestions                                     list, ?status= filter (GET)
/// /suggestions/{id}/approve                        approve (POST)
/// /suggestions/{id}/dismiss                        dismiss (POST)
///
/// /analytics                                       organization-wide aggregates (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/learners", learner::router())
        .nest("/courses", course::router())
        .nest("/assessments", assessment::router())
        .nest("/suggestions", suggestion::router())
        .route("/analytics", get(handlers::analytics::overview))
}
