//! Repository for the `assigned_tasks` table.
//!
//! Tasks are ordered by `position` within a learner's plan. Appends take
//! `MAX(position) + 1`; the remedial splice shifts later positions up by
//! one so insertion order stays dense and meaningful.

use sqlx::PgPool;

use pathlight_core::types::{DbId, Timestamp};

use crate::models::task::{AssignedTask, NewTask};

/// Column list for `assigned_tasks` queries.
const COLUMNS: &str = "id, learner_id, position, title, summary, articles, \
    video, due_date, completed, test_url, created_at";

/// Completed/total counts for a learner's task list.
#[derive(Debug, Clone, Copy)]
pub struct TaskCounts {
    pub completed: i64,
    pub total: i64,
}

/// Provides operations on a learner's assigned task list.
pub struct TaskRepo;

impl TaskRepo {
    /// List a learner's tasks in plan order.
    pub async fn list_for_learner(
        pool: &PgPool,
        learner_id: DbId,
    ) -> Result<Vec<AssignedTask>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM assigned_tasks WHERE learner_id = $1 ORDER BY position");
        sqlx::query_as::<_, AssignedTask>(&query)
            .bind(learner_id)
            .fetch_all(pool)
            .await
    }

    /// List a learner's tasks in plan order within a transaction.
    pub async fn list_for_learner_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        learner_id: DbId,
    ) -> Result<Vec<AssignedTask>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM assigned_tasks WHERE learner_id = $1 ORDER BY position");
        sqlx::query_as::<_, AssignedTask>(&query)
            .bind(learner_id)
            .fetch_all(&mut **tx)
            .await
    }

    /// Find one of a learner's tasks by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        learner_id: DbId,
        task_id: DbId,
    ) -> Result<Option<AssignedTask>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM assigned_tasks WHERE id = $1 AND learner_id = $2");
        sqlx::query_as::<_, AssignedTask>(&query)
            .bind(task_id)
            .bind(learner_id)
            .fetch_optional(pool)
            .await
    }

    /// Find one of a learner's tasks by ID within a transaction.
    pub async fn find_by_id_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        learner_id: DbId,
        task_id: DbId,
    ) -> Result<Option<AssignedTask>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM assigned_tasks WHERE id = $1 AND learner_id = $2");
        sqlx::query_as::<_, AssignedTask>(&query)
            .bind(task_id)
            .bind(learner_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Append an ad-hoc task at the end of the plan.
    pub async fn append(
        pool: &PgPool,
        learner_id: DbId,
        title: &str,
        due_date: Option<Timestamp>,
    ) -> Result<AssignedTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO assigned_tasks (learner_id, position, title, due_date) \
             SELECT $1, COALESCE(MAX(position), -1) + 1, $2, $3 \
             FROM assigned_tasks WHERE learner_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssignedTask>(&query)
            .bind(learner_id)
            .bind(title)
            .bind(due_date)
            .fetch_one(pool)
            .await
    }

    /// Append an ad-hoc task at the end of the plan within a transaction,
    /// so the caller can recompute progress atomically.
    pub async fn append_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        learner_id: DbId,
        title: &str,
        due_date: Option<Timestamp>,
    ) -> Result<AssignedTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO assigned_tasks (learner_id, position, title, due_date) \
             SELECT $1, COALESCE(MAX(position), -1) + 1, $2, $3 \
             FROM assigned_tasks WHERE learner_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssignedTask>(&query)
            .bind(learner_id)
            .bind(title)
            .bind(due_date)
            .fetch_one(&mut **tx)
            .await
    }

    /// Delete one of a learner's tasks.
    pub async fn delete_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        learner_id: DbId,
        task_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assigned_tasks WHERE id = $1 AND learner_id = $2")
            .bind(task_id)
            .bind(learner_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a task completed. Returns `false` when the task is not part of
    /// the learner's plan.
    pub async fn set_completed_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        learner_id: DbId,
        task_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE assigned_tasks SET completed = TRUE WHERE id = $1 AND learner_id = $2",
        )
        .bind(task_id)
        .bind(learner_id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every task from a learner's plan.
    pub async fn delete_all_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        learner_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM assigned_tasks WHERE learner_id = $1")
            .bind(learner_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Replace the learner's entire plan with a freshly generated
    /// curriculum, preserving the given order.
    pub async fn replace_all_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        learner_id: DbId,
        tasks: &[NewTask],
    ) -> Result<(), sqlx::Error> {
        Self::delete_all_tx(tx, learner_id).await?;

        for (position, task) in tasks.iter().enumerate() {
            sqlx::query(
                "INSERT INTO assigned_tasks \
                     (learner_id, position, title, summary, articles, video, due_date) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(learner_id)
            .bind(position as i32)
            .bind(&task.title)
            .bind(&task.summary)
            .bind(&task.articles)
            .bind(&task.video)
            .bind(task.due_date)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    /// Insert a task at a specific position, shifting later tasks up.
    pub async fn insert_at_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        learner_id: DbId,
        position: i32,
        task: &NewTask,
    ) -> Result<AssignedTask, sqlx::Error> {
        sqlx::query(
            "UPDATE assigned_tasks SET position = position + 1 \
             WHERE learner_id = $1 AND position >= $2",
        )
        .bind(learner_id)
        .bind(position)
        .execute(&mut **tx)
        .await?;

        let query = format!(
            "INSERT INTO assigned_tasks \
                 (learner_id, position, title, summary, articles, video, due_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AssignedTask>(&query)
            .bind(learner_id)
            .bind(position)
            .bind(&task.title)
            .bind(&task.summary)
            .bind(&task.articles)
            .bind(&task.video)
            .bind(task.due_date)
            .fetch_one(&mut **tx)
            .await
    }

    /// Completed/total counts for progress recomputation.
    pub async fn counts_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        learner_id: DbId,
    ) -> Result<TaskCounts, sqlx::Error> {
        let (completed, total): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*) FILTER (WHERE completed), COUNT(*) \
             FROM assigned_tasks WHERE learner_id = $1",
        )
        .bind(learner_id)
        .fetch_one(&mut **tx)
        .await?;
        Ok(TaskCounts { completed, total })
    }
}
