//! Remedial suggestion workflow.
//!
//! A failed module assessment raises a suggestion; a reviewer approves or
//! dismisses it. Approval splices the remedial module into the learner's
//! plan immediately after the failed task and notifies the learner. Both
//! terminal transitions are one-shot.

use pathlight_contentgen::ContentAgentClient;
use pathlight_core::error::CoreError;
use pathlight_core::types::DbId;
use pathlight_core::{progression, remedial, suggestion};
use pathlight_db::models::suggestion::Suggestion;
use pathlight_db::models::task::NewTask;
use pathlight_db::repositories::{
    LearnerRepo, NotificationRepo, SuggestionRepo, TaskRepo,
};
use pathlight_db::DbPool;

use crate::error::{AppError, AppResult};

use super::to_jsonb;

/// Raise a pending suggestion for a failed topic. The suggested module
/// title and justification come from the Content Generation Service; the
/// learner's task list is not touched until approval.
pub async fn raise_suggestion(
    pool: &DbPool,
    client: &ContentAgentClient,
    learner_id: DbId,
    failed_topic: &str,
) -> AppResult<Suggestion> {
    let learner = LearnerRepo::find_by_id(pool, learner_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Learner", learner_id))?;

    let generated = client.generate_remedial_suggestion(failed_topic).await?;

    let suggestion = SuggestionRepo::create(
        pool,
        learner.id,
        failed_topic,
        &generated.suggested_module_title,
        &generated.justification,
    )
    .await?;

    tracing::info!(
        learner_id,
        suggestion_id = suggestion.id,
        failed_topic,
        suggested_module = %suggestion.suggested_module_title,
        "Remedial suggestion raised"
    );
    Ok(suggestion)
}

/// Approve a pending suggestion: fetch the remedial module's learning
/// materials, splice it into the plan immediately after the failed task,
/// mark the suggestion approved, and notify the learner.
///
/// Fails with a conflict when the suggestion is no longer pending, or
/// when the failed task has been removed from the plan since the
/// suggestion was raised.
pub async fn approve_suggestion(
    pool: &DbPool,
    client: &ContentAgentClient,
    suggestion_id: DbId,
) -> AppResult<Suggestion> {
    let mut tx = pool.begin().await?;

    let suggestion = SuggestionRepo::find_by_id_tx(&mut tx, suggestion_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Suggestion", suggestion_id))?;

    suggestion::validate_transition(&suggestion.status, suggestion::STATUS_APPROVED)
        .map_err(AppError::Core)?;

    let learner = LearnerRepo::find_by_id_tx(&mut tx, suggestion.learner_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Learner", suggestion.learner_id))?;

    let tasks = TaskRepo::list_for_learner_tx(&mut tx, learner.id).await?;
    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    let position = remedial::insertion_index(&titles, &suggestion.failed_topic).ok_or_else(
        || {
            CoreError::InvalidState(format!(
                "Task for failed topic '{}' is no longer in the learner's plan",
                suggestion.failed_topic
            ))
        },
    )?;

    let content = client
        .generate_module_content(&suggestion.suggested_module_title)
        .await?;

    let task = NewTask {
        title: suggestion.suggested_module_title.clone(),
        summary: content.summary,
        articles: to_jsonb(&content.articles)?,
        video: content.video.as_ref().map(to_jsonb).transpose()?,
        due_date: None,
    };
    TaskRepo::insert_at_tx(&mut tx, learner.id, position as i32, &task).await?;

    // The plan grew by one uncompleted task, so progress shrinks.
    let counts = TaskRepo::counts_tx(&mut tx, learner.id).await?;
    let progress =
        progression::compute_progress(counts.completed as usize, counts.total as usize);
    LearnerRepo::set_progress_tx(&mut tx, learner.id, progress).await?;

    let updated =
        SuggestionRepo::set_status_tx(&mut tx, suggestion.id, suggestion::STATUS_APPROVED)
            .await?;

    NotificationRepo::create_tx(
        &mut tx,
        learner.id,
        &format!(
            "A remedial module '{}' was added to your plan to strengthen '{}'",
            updated.suggested_module_title, updated.failed_topic
        ),
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        suggestion_id,
        learner_id = learner.id,
        position,
        "Remedial suggestion approved"
    );
    Ok(updated)
}

/// Dismiss a pending suggestion. Terminal, with no side effects on the
/// learner's plan.
pub async fn dismiss_suggestion(pool: &DbPool, suggestion_id: DbId) -> AppResult<Suggestion> {
    let mut tx = pool.begin().await?;

    let suggestion = SuggestionRepo::find_by_id_tx(&mut tx, suggestion_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Suggestion", suggestion_id))?;

    suggestion::validate_transition(&suggestion.status, suggestion::STATUS_DISMISSED)
        .map_err(AppError::Core)?;

    let updated =
        SuggestionRepo::set_status_tx(&mut tx, suggestion.id, suggestion::STATUS_DISMISSED)
            .await?;

    tx.commit().await?;

    tracing::info!(suggestion_id, "Remedial suggestion dismissed");
    Ok(updated)
}
