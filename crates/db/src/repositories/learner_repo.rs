//! Repository for the `learners` table.

use sqlx::PgPool;

use pathlight_core::types::DbId;

use crate::models::learner::{
    CreateLearner, DepartmentCount, DepartmentProgress, Learner, UpdatePlacement,
};

/// Column list for `learners` queries. `password_hash` is never selected.
const COLUMNS: &str = "id, username, email, employee_id, role, department, \
    current_course, learning_progress, proficiency_assessment_status, \
    pre_assessment_module_title, created_at, updated_at";

/// Provides CRUD operations and progression-state writes for learners.
pub struct LearnerRepo;

impl LearnerRepo {
    /// Register a new learner, returning the stored row.
    pub async fn create(pool: &PgPool, input: &CreateLearner) -> Result<Learner, sqlx::Error> {
        let query = format!(
            "INSERT INTO learners (username, email, employee_id, password_hash) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Learner>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.employee_id)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// List all learners, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Learner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM learners ORDER BY created_at DESC");
        sqlx::query_as::<_, Learner>(&query).fetch_all(pool).await
    }

    /// Find a learner by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Learner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM learners WHERE id = $1");
        sqlx::query_as::<_, Learner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a learner by ID within an open transaction, locking the row.
    ///
    /// Progression operations read-modify-write the learner; `FOR UPDATE`
    /// keeps two concurrent operations on the same learner sequential.
    pub async fn find_by_id_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<Option<Learner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM learners WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Learner>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Update a learner's role and/or department. Absent fields keep
    /// their current value.
    pub async fn update_placement(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePlacement,
    ) -> Result<Option<Learner>, sqlx::Error> {
        let query = format!(
            "UPDATE learners SET \
                 role = COALESCE($2, role), \
                 department = COALESCE($3, department), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Learner>(&query)
            .bind(id)
            .bind(input.role.as_deref())
            .bind(input.department.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete a learner. Tasks, profiles, assessments, suggestions, and
    /// notifications cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM learners WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Progression-state writes (transactional)
    // -----------------------------------------------------------------------

    /// Install a course assignment: set the current course, zero progress,
    /// flag the pre-assessment as pending, and remember the first module
    /// title for it.
    pub async fn set_course_assignment_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        course_name: &str,
        pre_assessment_module_title: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE learners SET \
                 current_course = $2, \
                 learning_progress = 0, \
                 proficiency_assessment_status = $3, \
                 pre_assessment_module_title = $4, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(course_name)
        .bind(pathlight_core::progression::ASSESSMENT_STATUS_PRE_PENDING)
        .bind(pre_assessment_module_title)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Reset the course fields to the unassigned state (current course
    /// sentinel, zero progress). Used by unassignment and archival.
    pub async fn clear_course_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE learners SET \
                 current_course = $2, \
                 learning_progress = 0, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(pathlight_core::progression::NO_COURSE)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Store a freshly recomputed learning progress value.
    pub async fn set_progress_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        progress: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE learners SET learning_progress = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(progress)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Store a new proficiency assessment status.
    pub async fn set_assessment_status_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        status: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE learners SET \
                 proficiency_assessment_status = $2, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Analytics
    // -----------------------------------------------------------------------

    /// Total number of registered learners.
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM learners")
            .fetch_one(pool)
            .await
    }

    /// Learner counts grouped by department, largest first.
    pub async fn counts_by_department(
        pool: &PgPool,
    ) -> Result<Vec<DepartmentCount>, sqlx::Error> {
        sqlx::query_as::<_, DepartmentCount>(
            "SELECT department, COUNT(*) AS count FROM learners \
             GROUP BY department ORDER BY count DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Average learning progress grouped by department, highest first.
    pub async fn avg_progress_by_department(
        pool: &PgPool,
    ) -> Result<Vec<DepartmentProgress>, sqlx::Error> {
        sqlx::query_as::<_, DepartmentProgress>(
            "SELECT department, AVG(learning_progress)::DOUBLE PRECISION AS avg_progress \
             FROM learners GROUP BY department ORDER BY avg_progress DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Average learning progress across all learners (0 when there are none).
    pub async fn overall_avg_progress(pool: &PgPool) -> Result<f64, sqlx::Error> {
        let avg: Option<f64> = sqlx::query_scalar(
            "SELECT AVG(learning_progress)::DOUBLE PRECISION FROM learners",
        )
        .fetch_one(pool)
        .await?;
        Ok(avg.unwrap_or(0.0))
    }
}
