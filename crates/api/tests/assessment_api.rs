//! Integration tests for assessment creation, scoring, and consequences.
//!
//! A mock Content Generation Service serves canned quizzes (two questions:
//! "HTTP Basics" with answer `A`, "REST Design" with answer `B`) and a
//! three-module curriculum.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete, get, mock_content_agent, post_json, put_json, register_learner,
    schedule_task, seed_course,
};
use serde_json::{json, Value};
use sqlx::PgPool;

/// Create a module assessment for a task and return `(assessment_id,
/// question_ids)`.
async fn start_module_assessment(
    app: &axum::Router,
    learner: i64,
    task: i64,
) -> (i64, Vec<i64>) {
    let response = post_json(
        app,
        &format!("/api/v1/learners/{learner}/tasks/{task}/assessment"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();
    let questions = question_ids(&json);
    (id, questions)
}

/// Build a `{ "answers": { "<id>": "<answer>" } }` submission body.
fn answers(pairs: &[(i64, &str)]) -> Value {
    let map: serde_json::Map<String, Value> = pairs
        .iter()
        .map(|(id, answer)| (id.to_string(), Value::String((*answer).to_string())))
        .collect();
    json!({ "answers": map })
}

fn question_ids(json: &Value) -> Vec<i64> {
    json["data"]["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn module_assessment_is_created_pending_with_questions(pool: PgPool) {
    let agent = mock_content_agent().await;
    let app = common::build_test_app_with_agent(pool, agent);

    let learner = register_learner(&app, "avery").await;
    let task = schedule_task(&app, learner, "Databases").await;

    let response = post_json(
        &app,
        &format!("/api/v1/learners/{learner}/tasks/{task}/assessment"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["assessment_type"], "module");
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["score"], 0);
    assert_eq!(json["data"]["related_task_id"].as_i64(), Some(task));
    assert_eq!(json["data"]["questions"].as_array().unwrap().len(), 2);
    // The answer key stays server-side in this payload's questions, but
    // the learner's answer starts empty.
    assert_eq!(json["data"]["questions"][0]["learner_answer"], "");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn passing_module_assessment_completes_the_task(pool: PgPool) {
    let agent = mock_content_agent().await;
    let app = common::build_test_app_with_agent(pool, agent);

    let learner = register_learner(&app, "avery").await;
    let task = schedule_task(&app, learner, "Databases").await;
    let (assessment, questions) = start_module_assessment(&app, learner, task).await;

    let response = post_json(
        &app,
        &format!("/api/v1/assessments/{assessment}/submit"),
        answers(&[(questions[0], "A"), (questions[1], "B")]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["score"], 100);
    assert_eq!(json["data"]["passed"], true);

    let json = body_json(get(&app, &format!("/api/v1/learners/{learner}/tasks")).await).await;
    assert_eq!(json["data"][0]["completed"], true);

    let json = body_json(get(&app, &format!("/api/v1/learners/{learner}")).await).await;
    assert_eq!(json["data"]["learning_progress"], 100);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn one_of_two_correct_scores_fifty_and_passes(pool: PgPool) {
    let agent = mock_content_agent().await;
    let app = common::build_test_app_with_agent(pool, agent);

    let learner = register_learner(&app, "avery").await;
    let task = schedule_task(&app, learner, "Databases").await;
    let (assessment, questions) = start_module_assessment(&app, learner, task).await;

    // One right, one wrong: exactly the passing threshold.
    let response = post_json(
        &app,
        &format!("/api/v1/assessments/{assessment}/submit"),
        answers(&[(questions[0], "A"), (questions[1], "D")]),
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["score"], 50);
    assert_eq!(json["data"]["passed"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn failing_module_assessment_raises_a_suggestion(pool: PgPool) {
    let agent = mock_content_agent().await;
    let app = common::build_test_app_with_agent(pool, agent);

    let learner = register_learner(&app, "avery").await;
    let task = schedule_task(&app, learner, "Databases").await;
    let (assessment, questions) = start_module_assessment(&app, learner, task).await;

    // Unanswered questions count as wrong.
    let response = post_json(
        &app,
        &format!("/api/v1/assessments/{assessment}/submit"),
        answers(&[(questions[0], "C")]),
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["score"], 0);
    assert_eq!(json["data"]["passed"], false);

    // The task stays open and a pending suggestion names its subject.
    let json = body_json(get(&app, &format!("/api/v1/learners/{learner}/tasks")).await).await;
    assert_eq!(json["data"][0]["completed"], false);

    let json = body_json(get(&app, "/api/v1/suggestions?status=pending").await).await;
    let suggestions = json["data"].as_array().unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["failed_topic"], "Databases");
    assert_eq!(suggestions[0]["suggested_module_title"], "Refresher Module");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn double_submission_conflicts_and_score_is_unchanged(pool: PgPool) {
    let agent = mock_content_agent().await;
    let app = common::build_test_app_with_agent(pool, agent);

    let learner = register_learner(&app, "avery").await;
    let task = schedule_task(&app, learner, "Databases").await;
    let (assessment, questions) = start_module_assessment(&app, learner, task).await;

    let first = post_json(
        &app,
        &format!("/api/v1/assessments/{assessment}/submit"),
        answers(&[(questions[0], "A"), (questions[1], "B")]),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json(
        &app,
        &format!("/api/v1/assessments/{assessment}/submit"),
        answers(&[]),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let json = body_json(second).await;
    assert_eq!(json["code"], "INVALID_STATE");

    // The recorded score is untouched by the rejected resubmission.
    let json = body_json(
        get(&app, &format!("/api/v1/learners/{learner}/assessments")).await,
    )
    .await;
    let history = json["data"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["score"], 100);
    assert_eq!(history[0]["status"], "completed");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn proficiency_assessment_installs_a_tiered_curriculum(pool: PgPool) {
    let agent = mock_content_agent().await;
    let app = common::build_test_app_with_agent(pool.clone(), agent);
    seed_course(&pool, "Backend Engineering Fundamentals", &["Intro to APIs"]).await;

    let learner = register_learner(&app, "avery").await;
    put_json(
        &app,
        &format!("/api/v1/learners/{learner}"),
        Some(json!({ "role": "Backend Engineer" })),
    )
    .await;
    post_json(
        &app,
        &format!("/api/v1/learners/{learner}/course"),
        json!({ "course_name": "Backend Engineering Fundamentals" }),
    )
    .await;

    let response = post_json(
        &app,
        &format!("/api/v1/learners/{learner}/assessments/proficiency"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["assessment_type"], "proficiency");
    let assessment = json["data"]["id"].as_i64().unwrap();
    let questions = question_ids(&json);

    let response = post_json(
        &app,
        &format!("/api/v1/assessments/{assessment}/submit"),
        answers(&[(questions[0], "A"), (questions[1], "B")]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Pre-assessment resolved; curriculum from the mock replaces the plan.
    let json = body_json(get(&app, &format!("/api/v1/learners/{learner}")).await).await;
    assert_eq!(json["data"]["proficiency_assessment_status"], "completed");
    assert_eq!(json["data"]["learning_progress"], 0);

    let json = body_json(get(&app, &format!("/api/v1/learners/{learner}/tasks")).await).await;
    let tasks = json["data"].as_array().unwrap();
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0]["title"], "Week One Foundations");
    assert_eq!(tasks[2]["title"], "Week Three Project");
    // Due dates stagger a week apart per module.
    let due_dates: Vec<&str> = tasks
        .iter()
        .map(|t| t["due_date"].as_str().unwrap())
        .collect();
    assert!(due_dates[0] < due_dates[1] && due_dates[1] < due_dates[2]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn proficiency_assessment_requires_an_active_course(pool: PgPool) {
    let agent = mock_content_agent().await;
    let app = common::build_test_app_with_agent(pool, agent);

    let learner = register_learner(&app, "avery").await;
    let response = post_json(
        &app,
        &format!("/api/v1/learners/{learner}/assessments/proficiency"),
        json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn proficiency_assessment_requires_the_course_to_still_exist(pool: PgPool) {
    let agent = mock_content_agent().await;
    let app = common::build_test_app_with_agent(pool.clone(), agent);
    let course = seed_course(&pool, "Backend Engineering Fundamentals", &["Intro to APIs"]).await;

    let learner = register_learner(&app, "avery").await;
    post_json(
        &app,
        &format!("/api/v1/learners/{learner}/course"),
        json!({ "course_name": "Backend Engineering Fundamentals" }),
    )
    .await;

    // Deleting the course orphans the assignment; the pre-assessment can
    // no longer be started against it.
    let response = delete(&app, &format!("/api/v1/courses/{course}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        &app,
        &format!("/api/v1/learners/{learner}/assessments/proficiency"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn submission_records_topic_verdicts_in_the_skill_profile(pool: PgPool) {
    let agent = mock_content_agent().await;
    let app = common::build_test_app_with_agent(pool, agent);

    let learner = register_learner(&app, "avery").await;
    put_json(
        &app,
        &format!("/api/v1/learners/{learner}"),
        Some(json!({ "role": "Backend Engineer" })),
    )
    .await;
    let task = schedule_task(&app, learner, "Databases").await;
    let (assessment, questions) = start_module_assessment(&app, learner, task).await;

    post_json(
        &app,
        &format!("/api/v1/assessments/{assessment}/submit"),
        answers(&[(questions[0], "A"), (questions[1], "wrong")]),
    )
    .await;

    let json = body_json(
        get(&app, &format!("/api/v1/learners/{learner}/skill-profiles")).await,
    )
    .await;
    let profiles = json["data"].as_array().unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["skill_name"], "Backend Engineer");

    let topics = profiles[0]["topics"].as_array().unwrap();
    assert_eq!(topics.len(), 2);
    let verdict = |name: &str| {
        topics
            .iter()
            .find(|t| t["topic_name"] == name)
            .map(|t| t["proficiency"].as_str().unwrap().to_string())
            .unwrap()
    };
    assert_eq!(verdict("HTTP Basics"), "Mastered");
    assert_eq!(verdict("REST Design"), "Needs Improvement");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn submitting_an_unknown_assessment_returns_404(pool: PgPool) {
    let agent = mock_content_agent().await;
    let app = common::build_test_app_with_agent(pool, agent);

    let response = post_json(
        &app,
        "/api/v1/assessments/9999/submit",
        answers(&[]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
