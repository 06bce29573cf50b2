//! Learner progression constants and arithmetic.
//!
//! A learner moves through a per-course lifecycle: no course assigned,
//! pre-assessment pending, in progress, and finally archived into the
//! completed-course history (which returns the learner to "no course").
//! The transitions themselves live in the API engine; this module holds
//! the status vocabulary and the progress math both layers share.

use crate::error::CoreError;

/// Sentinel value for `current_course` when no course is assigned.
pub const NO_COURSE: &str = "None";

/// Default role/department for learners that have not been placed yet.
pub const UNASSIGNED: &str = "Unassigned";

// ---------------------------------------------------------------------------
// Proficiency assessment status
// ---------------------------------------------------------------------------

/// No proficiency assessment is currently required.
pub const ASSESSMENT_STATUS_COMPLETED: &str = "completed";

/// An admin reset the learner; a fresh proficiency assessment is expected.
pub const ASSESSMENT_STATUS_PENDING: &str = "pending";

/// A course was just assigned; the learner must take the pre-assessment
/// before the real task list is generated.
pub const ASSESSMENT_STATUS_PRE_PENDING: &str = "pre-assessment-pending";

/// All valid proficiency assessment status values.
pub const VALID_ASSESSMENT_STATUSES: &[&str] = &[
    ASSESSMENT_STATUS_COMPLETED,
    ASSESSMENT_STATUS_PENDING,
    ASSESSMENT_STATUS_PRE_PENDING,
];

/// Validate that an assessment status string is one of the accepted values.
pub fn validate_assessment_status(status: &str) -> Result<(), CoreError> {
    if VALID_ASSESSMENT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid proficiency assessment status '{status}'. Must be one of: {}",
            VALID_ASSESSMENT_STATUSES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Progress arithmetic
// ---------------------------------------------------------------------------

/// Compute `learning_progress` as a rounded percentage of completed tasks.
///
/// Returns 0 when the task list is empty (never divides by zero).
pub fn compute_progress(completed: usize, total: usize) -> i32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as i32
}

/// Whether the learner's active course should be archived.
///
/// A course completes only when progress reaches 100 while a course is
/// actually assigned; ad-hoc tasks with no course never archive anything.
pub fn course_finished(progress: i32, current_course: &str) -> bool {
    progress == 100 && current_course != NO_COURSE
}
