//! Remedial suggestion entity models.

use serde::Serialize;
use sqlx::FromRow;

use pathlight_core::types::{DbId, Timestamp};

/// A row from the `suggestions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Suggestion {
    pub id: DbId,
    pub learner_id: DbId,
    pub failed_topic: String,
    pub suggested_module_title: String,
    pub justification: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
