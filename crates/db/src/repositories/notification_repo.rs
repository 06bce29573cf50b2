//! Repository for the `notifications` table.

use sqlx::PgPool;

use pathlight_core::types::DbId;

use crate::models::notification::Notification;

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, learner_id, message, is_read, created_at";

/// Provides operations on learner notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Record a notification for a learner as part of an engine transaction.
    pub async fn create_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        learner_id: DbId,
        message: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO notifications (learner_id, message) VALUES ($1, $2)")
            .bind(learner_id)
            .bind(message)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// A learner's notifications, newest first.
    pub async fn list_for_learner(
        pool: &PgPool,
        learner_id: DbId,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE learner_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(learner_id)
            .fetch_all(pool)
            .await
    }

    /// Mark all of a learner's notifications as read. Returns the number
    /// of rows flipped.
    pub async fn mark_all_read(pool: &PgPool, learner_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE \
             WHERE learner_id = $1 AND is_read = FALSE",
        )
        .bind(learner_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
