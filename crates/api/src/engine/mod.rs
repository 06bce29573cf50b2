//! Learning progression and assessment engine.
//!
//! Orchestrates multi-step operations against the repositories and the
//! Content Generation Service: course assignment and task lifecycle
//! ([`progression`]), assessment creation and scoring ([`assessment`]),
//! and the remedial suggestion workflow ([`remedial`]). Every operation
//! that writes more than one row runs inside a single transaction, with
//! the learner row locked first.

pub mod assessment;
pub mod progression;
pub mod remedial;

use pathlight_core::error::CoreError;
use serde::Serialize;

use crate::error::AppError;

/// Serialize a value for a JSONB column.
pub(crate) fn to_jsonb<T: Serialize>(value: &T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(value)
        .map_err(|e| AppError::Core(CoreError::Internal(format!("JSON encoding failed: {e}"))))
}
