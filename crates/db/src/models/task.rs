//! Assigned task entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pathlight_core::types::{DbId, Timestamp};

/// A row from the `assigned_tasks` table.
///
/// `position` is the insertion order within the learner's plan; it drives
/// the "week N" display and the remedial insertion point. `articles` is a
/// JSONB array of `{title, url}` objects and `video` an optional
/// `{title, youtube_id}` object, copied verbatim from generated content.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssignedTask {
    pub id: DbId,
    pub learner_id: DbId,
    pub position: i32,
    pub title: String,
    pub summary: String,
    pub articles: serde_json::Value,
    pub video: Option<serde_json::Value>,
    pub due_date: Option<Timestamp>,
    pub completed: bool,
    pub test_url: Option<String>,
    pub created_at: Timestamp,
}

/// Payload for inserting a task (curriculum install, remedial splice).
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub summary: String,
    pub articles: serde_json::Value,
    pub video: Option<serde_json::Value>,
    pub due_date: Option<Timestamp>,
}

/// DTO for scheduling an ad-hoc task.
#[derive(Debug, Deserialize)]
pub struct ScheduleTask {
    pub title: String,
    pub due_date: Option<Timestamp>,
}
