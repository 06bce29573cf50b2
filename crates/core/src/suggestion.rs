//! Remedial suggestion status state machine.
//!
//! A suggestion is raised when a learner fails a module assessment and
//! waits for administrator review. It is terminal once approved or
//! dismissed: a suggestion can never be decided twice or flipped.

use crate::error::CoreError;

/// Suggestion awaiting administrator review.
pub const STATUS_PENDING: &str = "pending";

/// Administrator accepted the suggestion; a remedial task was spliced in.
pub const STATUS_APPROVED: &str = "approved";

/// Administrator rejected the suggestion; no further side effects.
pub const STATUS_DISMISSED: &str = "dismissed";

/// All valid suggestion status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_DISMISSED];

/// Validate a status transition.
///
/// Only `pending -> approved` and `pending -> dismissed` are allowed;
/// both targets are terminal.
pub fn validate_transition(from: &str, to: &str) -> Result<(), CoreError> {
    if from == STATUS_PENDING && (to == STATUS_APPROVED || to == STATUS_DISMISSED) {
        Ok(())
    } else {
        Err(CoreError::InvalidState(format!(
            "Suggestion cannot move from '{from}' to '{to}'"
        )))
    }
}
