//! Learner entity models, DTOs, and analytics aggregates.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pathlight_core::types::{DbId, Timestamp};

/// A row from the `learners` table.
///
/// `password_hash` is deliberately excluded; credential issuance and
/// verification belong to the surrounding application.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Learner {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub employee_id: String,
    pub role: String,
    pub department: String,
    pub current_course: String,
    pub learning_progress: i32,
    pub proficiency_assessment_status: String,
    pub pre_assessment_module_title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `completed_courses` table: an archived course together
/// with a snapshot of the task list it was completed with.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CompletedCourse {
    pub id: DbId,
    pub learner_id: DbId,
    pub course_name: String,
    pub tasks: serde_json::Value,
    pub completed_at: Timestamp,
}

/// DTO for registering a learner.
///
/// The password hash arrives opaque from the credential service.
#[derive(Debug, Deserialize, validator::Validate)]
pub struct CreateLearner {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub employee_id: String,
    pub password_hash: String,
}

/// DTO for updating a learner's placement (role and/or department).
#[derive(Debug, Deserialize)]
pub struct UpdatePlacement {
    pub role: Option<String>,
    pub department: Option<String>,
}

/// Per-department learner count, for the analytics dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DepartmentCount {
    pub department: String,
    pub count: i64,
}

/// Per-department average learning progress.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DepartmentProgress {
    pub department: String,
    pub avg_progress: f64,
}
