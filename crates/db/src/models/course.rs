//! Course entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pathlight_core::types::{DbId, Timestamp};

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub target_department: String,
    pub target_role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `course_modules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseModule {
    pub id: DbId,
    pub course_id: DbId,
    pub position: i32,
    pub title: String,
    pub summary: String,
    pub articles: serde_json::Value,
    pub video: Option<serde_json::Value>,
    pub content: String,
}

/// A course enriched with its ordered modules.
#[derive(Debug, Clone, Serialize)]
pub struct CourseWithModules {
    #[serde(flatten)]
    pub course: Course,
    pub modules: Vec<CourseModule>,
}

/// Payload for creating a course from generated content.
#[derive(Debug, Clone)]
pub struct CreateCourse {
    pub name: String,
    pub description: String,
    pub target_department: String,
    pub target_role: String,
    pub modules: Vec<NewCourseModule>,
}

/// One module within a [`CreateCourse`] payload.
#[derive(Debug, Clone)]
pub struct NewCourseModule {
    pub title: String,
    pub summary: String,
    pub articles: serde_json::Value,
    pub video: Option<serde_json::Value>,
    pub content: String,
}

/// DTO for requesting AI course generation.
#[derive(Debug, Deserialize)]
pub struct GenerateCourseRequest {
    pub target_department: String,
    pub target_role: String,
}
