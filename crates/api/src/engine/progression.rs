//! Course assignment and task lifecycle operations.
//!
//! Each operation locks the learner row (`SELECT ... FOR UPDATE`) before
//! modifying the task list, so progress recomputation always sees a
//! consistent count.

use pathlight_core::error::CoreError;
use pathlight_core::progression;
use pathlight_core::types::{DbId, Timestamp};
use pathlight_db::models::learner::Learner;
use pathlight_db::models::task::AssignedTask;
use pathlight_db::repositories::{
    CompletedCourseRepo, CourseRepo, LearnerRepo, SkillProfileRepo, TaskRepo,
};
use pathlight_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};

use super::to_jsonb;

/// Outcome of completing or removing a task: the recomputed progress and
/// whether the course was archived as a result.
#[derive(Debug, Serialize)]
pub struct ProgressOutcome {
    pub progress: i32,
    pub course_archived: bool,
}

/// Assign a course to a learner by name.
///
/// Rejects courses the learner has already completed and courses with no
/// modules. On success the learner's task list is cleared, progress reset
/// to zero, and the pre-assessment flagged as pending with the first
/// module's title remembered for it.
pub async fn assign_course(
    pool: &DbPool,
    learner_id: DbId,
    course_name: &str,
) -> AppResult<Learner> {
    let course = CourseRepo::find_by_name_with_modules(pool, course_name)
        .await?
        .ok_or_else(|| CoreError::not_found("Course", course_name))?;

    let first_module = course
        .modules
        .first()
        .ok_or_else(|| {
            CoreError::Validation(format!("Course '{course_name}' has no modules"))
        })?
        .title
        .clone();

    let mut tx = pool.begin().await?;

    let learner = LearnerRepo::find_by_id_tx(&mut tx, learner_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Learner", learner_id))?;

    let completed = CompletedCourseRepo::names_for_learner_tx(&mut tx, learner.id).await?;
    if completed.iter().any(|name| name == course_name) {
        return Err(AppError::Core(CoreError::InvalidState(format!(
            "Learner has already completed course '{course_name}'"
        ))));
    }

    TaskRepo::delete_all_tx(&mut tx, learner.id).await?;
    LearnerRepo::set_course_assignment_tx(&mut tx, learner.id, course_name, &first_module).await?;

    tx.commit().await?;

    tracing::info!(learner_id, course_name, "Course assigned");

    let learner = LearnerRepo::find_by_id(pool, learner_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Learner", learner_id))?;
    Ok(learner)
}

/// Unassign the learner's current course: clear the task list and reset
/// the course fields. The proficiency assessment status is left untouched;
/// [`reset_assessment`] exists for the full reset.
pub async fn unassign_course(pool: &DbPool, learner_id: DbId) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    let learner = LearnerRepo::find_by_id_tx(&mut tx, learner_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Learner", learner_id))?;

    TaskRepo::delete_all_tx(&mut tx, learner.id).await?;
    LearnerRepo::clear_course_tx(&mut tx, learner.id).await?;

    tx.commit().await?;

    tracing::info!(learner_id, "Course unassigned");
    Ok(())
}

/// Append an ad-hoc task to the end of the learner's plan and recompute
/// progress: the plan grew by one uncompleted task, so progress shrinks.
pub async fn schedule_task(
    pool: &DbPool,
    learner_id: DbId,
    title: &str,
    due_date: Option<Timestamp>,
) -> AppResult<AssignedTask> {
    let mut tx = pool.begin().await?;

    let learner = LearnerRepo::find_by_id_tx(&mut tx, learner_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Learner", learner_id))?;

    let task = TaskRepo::append_tx(&mut tx, learner.id, title, due_date).await?;

    let counts = TaskRepo::counts_tx(&mut tx, learner.id).await?;
    let progress =
        progression::compute_progress(counts.completed as usize, counts.total as usize);
    LearnerRepo::set_progress_tx(&mut tx, learner.id, progress).await?;

    tx.commit().await?;

    tracing::info!(learner_id, task_id = task.id, title, progress, "Task scheduled");
    Ok(task)
}

/// Remove a task from the learner's plan and recompute progress.
/// An emptied list yields progress zero.
pub async fn remove_task(
    pool: &DbPool,
    learner_id: DbId,
    task_id: DbId,
) -> AppResult<ProgressOutcome> {
    let mut tx = pool.begin().await?;

    let learner = LearnerRepo::find_by_id_tx(&mut tx, learner_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Learner", learner_id))?;

    let deleted = TaskRepo::delete_tx(&mut tx, learner.id, task_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Task", task_id)));
    }

    let counts = TaskRepo::counts_tx(&mut tx, learner.id).await?;
    let progress =
        progression::compute_progress(counts.completed as usize, counts.total as usize);
    LearnerRepo::set_progress_tx(&mut tx, learner.id, progress).await?;

    tx.commit().await?;

    tracing::info!(learner_id, task_id, progress, "Task removed");
    Ok(ProgressOutcome {
        progress,
        course_archived: false,
    })
}

/// Mark a task completed and recompute progress. Reaching 100% with an
/// active course archives it: the course name and a snapshot of the task
/// list move to the completed-course history and the learner's course
/// fields reset.
pub async fn complete_task(
    pool: &DbPool,
    learner_id: DbId,
    task_id: DbId,
) -> AppResult<ProgressOutcome> {
    let mut tx = pool.begin().await?;

    let learner = LearnerRepo::find_by_id_tx(&mut tx, learner_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Learner", learner_id))?;

    let updated = TaskRepo::set_completed_tx(&mut tx, learner.id, task_id).await?;
    if !updated {
        return Err(AppError::Core(CoreError::not_found("Task", task_id)));
    }

    let counts = TaskRepo::counts_tx(&mut tx, learner.id).await?;
    let progress =
        progression::compute_progress(counts.completed as usize, counts.total as usize);

    let archived = finish_or_store_progress(&mut tx, &learner, progress).await?;

    tx.commit().await?;

    tracing::info!(learner_id, task_id, progress, archived, "Task completed");
    Ok(ProgressOutcome {
        progress,
        course_archived: archived,
    })
}

/// Reset the learner's assessment state: proficiency status back to
/// `pending`, skill profiles wiped, task list cleared, progress zeroed.
pub async fn reset_assessment(pool: &DbPool, learner_id: DbId) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    let learner = LearnerRepo::find_by_id_tx(&mut tx, learner_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Learner", learner_id))?;

    LearnerRepo::set_assessment_status_tx(
        &mut tx,
        learner.id,
        progression::ASSESSMENT_STATUS_PENDING,
    )
    .await?;
    SkillProfileRepo::delete_all_tx(&mut tx, learner.id).await?;
    TaskRepo::delete_all_tx(&mut tx, learner.id).await?;
    LearnerRepo::set_progress_tx(&mut tx, learner.id, 0).await?;

    tx.commit().await?;

    tracing::info!(learner_id, "Assessment state reset");
    Ok(())
}

/// Store the recomputed progress, archiving the course when it just
/// reached 100% with an active course. Returns whether archival happened.
///
/// Shared by task completion and module-assessment pass handling; this is
/// the sole path to course completion.
pub(super) async fn finish_or_store_progress(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    learner: &Learner,
    progress: i32,
) -> AppResult<bool> {
    if progression::course_finished(progress, &learner.current_course) {
        let tasks = TaskRepo::list_for_learner_tx(tx, learner.id).await?;
        let snapshot = to_jsonb(&tasks)?;

        CompletedCourseRepo::insert_tx(tx, learner.id, &learner.current_course, &snapshot)
            .await?;
        TaskRepo::delete_all_tx(tx, learner.id).await?;
        LearnerRepo::clear_course_tx(tx, learner.id).await?;

        tracing::info!(
            learner_id = learner.id,
            course_name = %learner.current_course,
            "Course completed and archived"
        );
        return Ok(true);
    }

    LearnerRepo::set_progress_tx(tx, learner.id, progress).await?;
    Ok(false)
}
