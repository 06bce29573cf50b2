//! Repository for the `completed_courses` archive table.

use sqlx::PgPool;

use pathlight_core::types::DbId;

use crate::models::learner::CompletedCourse;

/// Column list for `completed_courses` queries.
const COLUMNS: &str = "id, learner_id, course_name, tasks, completed_at";

/// Provides operations on the archive of finished courses.
pub struct CompletedCourseRepo;

impl CompletedCourseRepo {
    /// Archive a finished course with a snapshot of the task list it was
    /// completed with.
    pub async fn insert_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        learner_id: DbId,
        course_name: &str,
        tasks: &serde_json::Value,
    ) -> Result<CompletedCourse, sqlx::Error> {
        let query = format!(
            "INSERT INTO completed_courses (learner_id, course_name, tasks) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CompletedCourse>(&query)
            .bind(learner_id)
            .bind(course_name)
            .bind(tasks)
            .fetch_one(&mut **tx)
            .await
    }

    /// Names of the courses a learner has already finished, within a
    /// transaction. Used to reject re-assignment of a completed course.
    pub async fn names_for_learner_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        learner_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT course_name FROM completed_courses WHERE learner_id = $1",
        )
        .bind(learner_id)
        .fetch_all(&mut **tx)
        .await
    }

    /// A learner's archived courses, most recently completed first.
    pub async fn list_for_learner(
        pool: &PgPool,
        learner_id: DbId,
    ) -> Result<Vec<CompletedCourse>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM completed_courses \
             WHERE learner_id = $1 ORDER BY completed_at DESC"
        );
        sqlx::query_as::<_, CompletedCourse>(&query)
            .bind(learner_id)
            .fetch_all(pool)
            .await
    }
}
