//! Placement logic for approved remedial tasks.
//!
//! An approved remedial module is spliced into the learner's plan directly
//! after the task that was failed, so the learner sees it as the next step
//! rather than an appendix at the end of the course.

/// Position at which a remedial task should be inserted: immediately after
/// the task whose title matches the failed topic.
///
/// Returns `None` when no task matches — the failed task was removed after
/// the suggestion was raised. Callers must treat that as an explicit error
/// rather than appending at the end.
pub fn insertion_index(task_titles: &[&str], failed_topic: &str) -> Option<usize> {
    task_titles
        .iter()
        .position(|title| *title == failed_topic)
        .map(|index| index + 1)
}
