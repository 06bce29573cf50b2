//! Assessment entity models and DTOs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pathlight_core::types::{DbId, Timestamp};

/// A row from the `assessments` table.
///
/// `score` is only meaningful once `status` is `completed`; a completed
/// assessment is an immutable historical record.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assessment {
    pub id: DbId,
    pub learner_id: DbId,
    pub course_name: String,
    pub assessment_type: String,
    pub related_task_id: Option<DbId>,
    pub score: i32,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `assessment_questions` table.
///
/// `options` is a JSONB array of answer strings; `learner_answer` is empty
/// until submission.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssessmentQuestion {
    pub id: DbId,
    pub assessment_id: DbId,
    pub position: i32,
    pub question_text: String,
    pub options: serde_json::Value,
    pub correct_answer: String,
    pub learner_answer: String,
    pub topic: String,
}

/// An assessment enriched with its ordered questions.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentWithQuestions {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub questions: Vec<AssessmentQuestion>,
}

/// Payload for inserting a question when an assessment is created.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question_text: String,
    pub options: serde_json::Value,
    pub correct_answer: String,
    pub topic: String,
}

/// DTO for submitting assessment answers, keyed by question id.
///
/// Unanswered questions are simply absent and are recorded as an empty
/// answer (always wrong).
#[derive(Debug, Deserialize)]
pub struct SubmitAnswers {
    pub answers: HashMap<DbId, String>,
}

/// Result returned to the caller after scoring a submission.
#[derive(Debug, Serialize)]
pub struct SubmissionResult {
    pub assessment_id: DbId,
    pub score: i32,
    pub passed: bool,
}
