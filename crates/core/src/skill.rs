//! Topic proficiency vocabulary for skill profiles.
//!
//! A skill profile maps topic names to one of three mastery levels, built
//! up from graded assessment questions. Levels are stored as text in the
//! database; this module is the single source of the accepted values.

use crate::error::CoreError;

/// Topic has never been covered by a graded question.
pub const PROFICIENCY_UNTESTED: &str = "Untested";

/// Most recent graded question on this topic was answered incorrectly.
pub const PROFICIENCY_NEEDS_IMPROVEMENT: &str = "Needs Improvement";

/// Most recent graded question on this topic was answered correctly.
pub const PROFICIENCY_MASTERED: &str = "Mastered";

/// All valid topic proficiency values.
pub const VALID_PROFICIENCIES: &[&str] = &[
    PROFICIENCY_UNTESTED,
    PROFICIENCY_NEEDS_IMPROVEMENT,
    PROFICIENCY_MASTERED,
];

/// The proficiency value recorded for a graded question.
pub fn verdict(correct: bool) -> &'static str {
    if correct {
        PROFICIENCY_MASTERED
    } else {
        PROFICIENCY_NEEDS_IMPROVEMENT
    }
}

/// Validate that a proficiency string is one of the accepted values.
pub fn validate_proficiency(proficiency: &str) -> Result<(), CoreError> {
    if VALID_PROFICIENCIES.contains(&proficiency) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid topic proficiency '{proficiency}'. Must be one of: {}",
            VALID_PROFICIENCIES.join(", ")
        )))
    }
}
