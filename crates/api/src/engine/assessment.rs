//! Assessment creation and the scoring pipeline.
//!
//! Submission is the central algorithm: grade every question, fold the
//! results into the learner's skill profile, persist the score, and then
//! apply the per-type consequences (curriculum install for proficiency,
//! task completion or remedial suggestion for module assessments). Score,
//! profile, and consequence writes share one transaction; a failed
//! curriculum fetch rolls everything back so the learner can resubmit.

use std::collections::HashMap;

use pathlight_contentgen::ContentAgentClient;
use pathlight_core::assessment::{self, ProficiencyTier};
use pathlight_core::error::CoreError;
use pathlight_core::types::DbId;
use pathlight_core::{progression, skill};
use pathlight_db::models::assessment::{
    AssessmentWithQuestions, NewQuestion, SubmissionResult,
};
use pathlight_db::models::task::NewTask;
use pathlight_db::repositories::{
    AssessmentRepo, CourseRepo, LearnerRepo, SkillProfileRepo, TaskRepo,
};
use pathlight_db::DbPool;

use crate::error::{AppError, AppResult};

use super::progression::finish_or_store_progress;
use super::{remedial, to_jsonb};

/// Create a pending proficiency assessment for the learner's current
/// course, with questions generated for their role.
///
/// The assigned course must still exist in the catalog; an assignment
/// orphaned by a course deletion cannot be assessed.
pub async fn start_proficiency_assessment(
    pool: &DbPool,
    client: &ContentAgentClient,
    learner_id: DbId,
) -> AppResult<AssessmentWithQuestions> {
    let learner = LearnerRepo::find_by_id(pool, learner_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Learner", learner_id))?;

    if learner.current_course == progression::NO_COURSE {
        return Err(AppError::Core(CoreError::InvalidState(
            "Learner has no active course to assess".to_string(),
        )));
    }

    CourseRepo::find_by_name_with_modules(pool, &learner.current_course)
        .await?
        .ok_or_else(|| CoreError::not_found("Course", &learner.current_course))?;

    let quiz = client.generate_proficiency_assessment(&learner.role).await?;
    let questions = quiz_questions(quiz)?;

    let created = AssessmentRepo::create_with_questions(
        pool,
        learner.id,
        &learner.current_course,
        assessment::TYPE_PROFICIENCY,
        None,
        &questions,
    )
    .await?;

    tracing::info!(
        learner_id,
        assessment_id = created.assessment.id,
        question_count = created.questions.len(),
        "Proficiency assessment created"
    );
    Ok(created)
}

/// Create a pending module assessment attached to one assigned task, with
/// questions generated for the task's subject.
pub async fn start_module_assessment(
    pool: &DbPool,
    client: &ContentAgentClient,
    learner_id: DbId,
    task_id: DbId,
) -> AppResult<AssessmentWithQuestions> {
    let learner = LearnerRepo::find_by_id(pool, learner_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Learner", learner_id))?;

    let task = TaskRepo::find_by_id(pool, learner.id, task_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Task", task_id))?;

    let quiz = client.generate_proficiency_assessment(&task.title).await?;
    let questions = quiz_questions(quiz)?;

    let created = AssessmentRepo::create_with_questions(
        pool,
        learner.id,
        &learner.current_course,
        assessment::TYPE_MODULE,
        Some(task.id),
        &questions,
    )
    .await?;

    tracing::info!(
        learner_id,
        task_id,
        assessment_id = created.assessment.id,
        "Module assessment created"
    );
    Ok(created)
}

/// Score a submission and apply its consequences.
///
/// Guards: the assessment must exist and still be pending. Every question
/// is graded by exact string match, with absent answers recorded as empty
/// (always wrong). Topic verdicts are upserted into the skill profile for
/// the learner's role, last write winning within the submission. Then:
///
/// - proficiency: learner's assessment status flips to completed, the
///   score picks a tier, and a full curriculum for the tier-qualified role
///   replaces the task list with weekly staggered due dates;
/// - module, passing (>= 50): the related task is marked complete and
///   progress recomputed, archiving the course at 100%;
/// - module, failing: a remedial suggestion is raised for the task's
///   subject after the score commits.
pub async fn submit_assessment(
    pool: &DbPool,
    client: &ContentAgentClient,
    assessment_id: DbId,
    answers: &HashMap<DbId, String>,
) -> AppResult<SubmissionResult> {
    let mut tx = pool.begin().await?;

    let record = AssessmentRepo::find_by_id_tx(&mut tx, assessment_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Assessment", assessment_id))?;

    if record.status == assessment::STATUS_COMPLETED {
        return Err(AppError::Core(CoreError::InvalidState(format!(
            "Assessment {assessment_id} has already been submitted"
        ))));
    }

    let learner = LearnerRepo::find_by_id_tx(&mut tx, record.learner_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Learner", record.learner_id))?;

    // Grade every question, recording the submitted answer as we go.
    let questions = AssessmentRepo::questions_tx(&mut tx, record.id).await?;
    let mut graded: Vec<(&str, bool)> = Vec::with_capacity(questions.len());
    for question in &questions {
        let answer = answers
            .get(&question.id)
            .map(String::as_str)
            .unwrap_or("");
        AssessmentRepo::record_answer_tx(&mut tx, question.id, answer).await?;
        graded.push((
            question.topic.as_str(),
            assessment::grade(&question.correct_answer, answer),
        ));
    }

    let correct = graded.iter().filter(|(_, ok)| *ok).count();
    let score = assessment::score_submission(correct, graded.len()).map_err(AppError::Core)?;

    // Fold verdicts into the skill profile for the learner's role.
    let profile = SkillProfileRepo::find_or_create_tx(&mut tx, learner.id, &learner.role).await?;
    for (topic, ok) in assessment::topic_verdicts(&graded) {
        SkillProfileRepo::upsert_topic_tx(&mut tx, profile.id, topic, skill::verdict(ok)).await?;
    }

    AssessmentRepo::complete_tx(&mut tx, record.id, score).await?;

    let passed = assessment::is_passing(score);
    let mut failed_topic: Option<String> = None;

    match record.assessment_type.as_str() {
        assessment::TYPE_PROFICIENCY => {
            install_curriculum(&mut tx, client, &learner, score).await?;
        }
        assessment::TYPE_MODULE => {
            let task_id = record.related_task_id.ok_or_else(|| {
                CoreError::Internal(format!(
                    "Module assessment {assessment_id} has no related task"
                ))
            })?;
            let task = TaskRepo::find_by_id_tx(&mut tx, learner.id, task_id)
                .await?
                .ok_or_else(|| CoreError::not_found("Task", task_id))?;

            if passed {
                let updated = TaskRepo::set_completed_tx(&mut tx, learner.id, task.id).await?;
                if !updated {
                    return Err(AppError::Core(CoreError::not_found("Task", task.id)));
                }
                let counts = TaskRepo::counts_tx(&mut tx, learner.id).await?;
                let progress = progression::compute_progress(
                    counts.completed as usize,
                    counts.total as usize,
                );
                finish_or_store_progress(&mut tx, &learner, progress).await?;
            } else {
                failed_topic = Some(task.title);
            }
        }
        other => {
            return Err(AppError::Core(CoreError::Internal(format!(
                "Assessment {assessment_id} has unknown type '{other}'"
            ))));
        }
    }

    tx.commit().await?;

    tracing::info!(
        assessment_id,
        learner_id = learner.id,
        score,
        passed,
        "Assessment submitted"
    );

    // A failed module assessment raises a remedial suggestion once the
    // score is committed; a suggestion failure never unwinds the score.
    if let Some(topic) = failed_topic {
        remedial::raise_suggestion(pool, client, learner.id, &topic).await?;
    }

    Ok(SubmissionResult {
        assessment_id: record.id,
        score,
        passed,
    })
}

/// Replace the learner's task list with a full curriculum for the role
/// qualified by the score's tier, due dates staggered a week per module,
/// and flip the proficiency assessment status to completed.
async fn install_curriculum(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    client: &ContentAgentClient,
    learner: &pathlight_db::models::learner::Learner,
    score: i32,
) -> AppResult<()> {
    LearnerRepo::set_assessment_status_tx(
        tx,
        learner.id,
        progression::ASSESSMENT_STATUS_COMPLETED,
    )
    .await?;

    let tier = ProficiencyTier::classify(score);
    let qualified_role = tier.qualified_role(&learner.role);
    let curriculum = client.generate_full_course_content(&qualified_role).await?;

    let now = chrono::Utc::now();
    let mut tasks = Vec::with_capacity(curriculum.modules.len());
    for (position, module) in curriculum.modules.iter().enumerate() {
        tasks.push(NewTask {
            title: module.title.clone(),
            summary: module.summary.clone(),
            articles: to_jsonb(&module.articles)?,
            video: module.video.as_ref().map(to_jsonb).transpose()?,
            due_date: Some(assessment::staggered_due_date(now, position)),
        });
    }

    TaskRepo::replace_all_tx(tx, learner.id, &tasks).await?;
    LearnerRepo::set_progress_tx(tx, learner.id, 0).await?;

    tracing::info!(
        learner_id = learner.id,
        tier = tier.as_str(),
        module_count = tasks.len(),
        "Curriculum installed"
    );
    Ok(())
}

/// Convert generated quiz questions into insertable rows.
fn quiz_questions(
    quiz: pathlight_contentgen::GeneratedQuiz,
) -> AppResult<Vec<NewQuestion>> {
    quiz.questions
        .into_iter()
        .map(|q| {
            Ok(NewQuestion {
                question_text: q.question_text,
                options: to_jsonb(&q.options)?,
                correct_answer: q.correct_answer,
                topic: q.topic,
            })
        })
        .collect()
}
