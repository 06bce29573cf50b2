//! Repository for the `assessments` and `assessment_questions` tables.

use sqlx::PgPool;

use pathlight_core::types::DbId;

use crate::models::assessment::{
    Assessment, AssessmentQuestion, AssessmentWithQuestions, NewQuestion,
};

/// Column list for `assessments` queries.
const COLUMNS: &str = "id, learner_id, course_name, assessment_type, \
    related_task_id, score, status, created_at, updated_at";

/// Column list for `assessment_questions` queries.
const QUESTION_COLUMNS: &str = "id, assessment_id, position, question_text, \
    options, correct_answer, learner_answer, topic";

/// Provides operations for assessments and their question sets.
pub struct AssessmentRepo;

impl AssessmentRepo {
    /// Create a pending assessment with its ordered questions in one
    /// transaction.
    pub async fn create_with_questions(
        pool: &PgPool,
        learner_id: DbId,
        course_name: &str,
        assessment_type: &str,
        related_task_id: Option<DbId>,
        questions: &[NewQuestion],
    ) -> Result<AssessmentWithQuestions, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO assessments \
                 (learner_id, course_name, assessment_type, related_task_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let assessment = sqlx::query_as::<_, Assessment>(&insert_query)
            .bind(learner_id)
            .bind(course_name)
            .bind(assessment_type)
            .bind(related_task_id)
            .fetch_one(&mut *tx)
            .await?;

        let question_query = format!(
            "INSERT INTO assessment_questions \
                 (assessment_id, position, question_text, options, correct_answer, topic) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {QUESTION_COLUMNS}"
        );
        let mut rows = Vec::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            let row = sqlx::query_as::<_, AssessmentQuestion>(&question_query)
                .bind(assessment.id)
                .bind(position as i32)
                .bind(&question.question_text)
                .bind(&question.options)
                .bind(&question.correct_answer)
                .bind(&question.topic)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok(AssessmentWithQuestions {
            assessment,
            questions: rows,
        })
    }

    /// Find an assessment by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Assessment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assessments WHERE id = $1");
        sqlx::query_as::<_, Assessment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an assessment by ID within an open transaction, locking the
    /// row so a concurrent submission of the same assessment blocks.
    pub async fn find_by_id_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<Option<Assessment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assessments WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Assessment>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Ordered questions for an assessment, within a transaction.
    pub async fn questions_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        assessment_id: DbId,
    ) -> Result<Vec<AssessmentQuestion>, sqlx::Error> {
        let query = format!(
            "SELECT {QUESTION_COLUMNS} FROM assessment_questions \
             WHERE assessment_id = $1 ORDER BY position"
        );
        sqlx::query_as::<_, AssessmentQuestion>(&query)
            .bind(assessment_id)
            .fetch_all(&mut **tx)
            .await
    }

    /// Record the learner's submitted answer on a question.
    pub async fn record_answer_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        question_id: DbId,
        answer: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE assessment_questions SET learner_answer = $2 WHERE id = $1")
            .bind(question_id)
            .bind(answer)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Persist the final score and flip the assessment to completed.
    /// The row is immutable afterwards.
    pub async fn complete_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        score: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE assessments SET score = $2, status = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(score)
        .bind(pathlight_core::assessment::STATUS_COMPLETED)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Completed assessments for a learner, newest first (history view).
    pub async fn list_completed_for_learner(
        pool: &PgPool,
        learner_id: DbId,
    ) -> Result<Vec<Assessment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assessments \
             WHERE learner_id = $1 AND status = $2 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Assessment>(&query)
            .bind(learner_id)
            .bind(pathlight_core::assessment::STATUS_COMPLETED)
            .fetch_all(pool)
            .await
    }
}
