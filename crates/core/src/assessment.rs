//! Assessment scoring and proficiency tier classification.
//!
//! Scoring is exact-string-match, case-sensitive, with no partial credit.
//! The final score is an integer percentage rounded to the nearest whole
//! number; a module assessment passes at 50 or above (inclusive).

use chrono::Duration;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Assessment types
// ---------------------------------------------------------------------------

/// Assessment taken right after course assignment to measure the learner's
/// starting proficiency and pick a curriculum tier.
pub const TYPE_PROFICIENCY: &str = "proficiency";

/// Assessment attached to a single assigned task.
pub const TYPE_MODULE: &str = "module";

/// All valid assessment type values.
pub const VALID_TYPES: &[&str] = &[TYPE_PROFICIENCY, TYPE_MODULE];

/// Validate that an assessment type string is one of the accepted values.
pub fn validate_type(assessment_type: &str) -> Result<(), CoreError> {
    if VALID_TYPES.contains(&assessment_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid assessment type '{assessment_type}'. Must be one of: {}",
            VALID_TYPES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Assessment status
// ---------------------------------------------------------------------------

/// Assessment created and waiting for the learner's submission.
pub const STATUS_PENDING: &str = "pending";

/// Assessment submitted and scored; immutable from here on.
pub const STATUS_COMPLETED: &str = "completed";

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Minimum score (inclusive) at which a module assessment passes.
pub const PASSING_SCORE: i32 = 50;

/// Whether a module assessment score counts as a pass.
pub fn is_passing(score: i32) -> bool {
    score >= PASSING_SCORE
}

/// Grade a single answer. Exact string match, case-sensitive.
pub fn grade(correct_answer: &str, submitted: &str) -> bool {
    correct_answer == submitted
}

/// Compute the final score as a rounded percentage of correct answers.
///
/// Returns an error for an assessment with no questions; the content
/// client rejects empty question sets before an assessment is created,
/// so hitting this indicates corrupted data.
pub fn score_submission(correct: usize, total: usize) -> Result<i32, CoreError> {
    if total == 0 {
        return Err(CoreError::Internal(
            "Cannot score an assessment with no questions".to_string(),
        ));
    }
    Ok(((correct as f64 / total as f64) * 100.0).round() as i32)
}

/// Reduce per-question verdicts into one verdict per topic.
///
/// When a topic is covered by multiple questions in the same submission,
/// the last question processed wins. This reproduces the behavior of the
/// system this engine replaced; switching to majority vote is an open
/// question tracked in DESIGN.md.
pub fn topic_verdicts<'a>(graded: &[(&'a str, bool)]) -> Vec<(&'a str, bool)> {
    let mut verdicts: Vec<(&str, bool)> = Vec::new();
    for &(topic, correct) in graded {
        match verdicts.iter_mut().find(|(t, _)| *t == topic) {
            Some(entry) => entry.1 = correct,
            None => verdicts.push((topic, correct)),
        }
    }
    verdicts
}

// ---------------------------------------------------------------------------
// Proficiency tiers
// ---------------------------------------------------------------------------

/// Curriculum difficulty tier derived from a proficiency assessment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProficiencyTier {
    Beginner,
    Intermediate,
    Advanced,
}

impl ProficiencyTier {
    /// Classify a proficiency score: below 50 is beginner, below 80 is
    /// intermediate, everything else is advanced.
    pub fn classify(score: i32) -> Self {
        if score < 50 {
            Self::Beginner
        } else if score < 80 {
            Self::Intermediate
        } else {
            Self::Advanced
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Role string qualified by tier, used to request a tailored curriculum
    /// (e.g. "beginner Backend Engineer").
    pub fn qualified_role(&self, role: &str) -> String {
        format!("{} {role}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Curriculum scheduling
// ---------------------------------------------------------------------------

/// Number of days between consecutive curriculum module due dates.
pub const DUE_DATE_STAGGER_DAYS: i64 = 7;

/// Due date for the module at `position` (0-based) in a freshly generated
/// curriculum: module *i* is due `7 * (i + 1)` days after `now`.
pub fn staggered_due_date(now: Timestamp, position: usize) -> Timestamp {
    now + Duration::days(DUE_DATE_STAGGER_DAYS * (position as i64 + 1))
}
