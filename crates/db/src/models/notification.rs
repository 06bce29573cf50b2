//! Notification entity models.

use serde::Serialize;
use sqlx::FromRow;

use pathlight_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
///
/// Creation is fire-and-forget from the engine's point of view; reading
/// and marking read belong to the learner-facing dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub learner_id: DbId,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}
