//! Repository for the `suggestions` table.

use sqlx::PgPool;

use pathlight_core::types::DbId;

use crate::models::suggestion::Suggestion;

/// Column list for `suggestions` queries.
const COLUMNS: &str = "id, learner_id, failed_topic, suggested_module_title, \
    justification, status, created_at, updated_at";

/// Provides operations on remedial suggestions.
pub struct SuggestionRepo;

impl SuggestionRepo {
    /// Record a new pending suggestion.
    pub async fn create(
        pool: &PgPool,
        learner_id: DbId,
        failed_topic: &str,
        suggested_module_title: &str,
        justification: &str,
    ) -> Result<Suggestion, sqlx::Error> {
        let query = format!(
            "INSERT INTO suggestions \
                 (learner_id, failed_topic, suggested_module_title, justification) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Suggestion>(&query)
            .bind(learner_id)
            .bind(failed_topic)
            .bind(suggested_module_title)
            .bind(justification)
            .fetch_one(pool)
            .await
    }

    /// List suggestions, newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<Suggestion>, sqlx::Error> {
        match status {
            Some(status) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM suggestions \
                     WHERE status = $1 ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, Suggestion>(&query)
                    .bind(status)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query =
                    format!("SELECT {COLUMNS} FROM suggestions ORDER BY created_at DESC");
                sqlx::query_as::<_, Suggestion>(&query).fetch_all(pool).await
            }
        }
    }

    /// Find a suggestion by ID within an open transaction, locking the
    /// row so concurrent reviews of the same suggestion stay sequential.
    pub async fn find_by_id_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<Option<Suggestion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM suggestions WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Suggestion>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Move a suggestion to a new review status.
    pub async fn set_status_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        status: &str,
    ) -> Result<Suggestion, sqlx::Error> {
        let query = format!(
            "UPDATE suggestions SET status = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Suggestion>(&query)
            .bind(id)
            .bind(status)
            .fetch_one(&mut **tx)
            .await
    }
}
