//! Integration tests for course assignment, the task lifecycle, and
//! progress recomputation.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete, get, post_json, put_json, register_learner, schedule_task, seed_course,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn completing_tasks_updates_progress(pool: PgPool) {
    let app = common::build_test_app(pool);

    let learner = register_learner(&app, "avery").await;
    let first = schedule_task(&app, learner, "Intro to APIs").await;
    schedule_task(&app, learner, "Databases").await;

    let response = put_json(
        &app,
        &format!("/api/v1/learners/{learner}/tasks/{first}/complete"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["progress"], 50);
    assert_eq!(json["data"]["course_archived"], false);

    let json = body_json(get(&app, &format!("/api/v1/learners/{learner}")).await).await;
    assert_eq!(json["data"]["learning_progress"], 50);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn scheduling_a_task_recomputes_progress(pool: PgPool) {
    let app = common::build_test_app(pool);

    let learner = register_learner(&app, "avery").await;
    let first = schedule_task(&app, learner, "Intro to APIs").await;
    put_json(
        &app,
        &format!("/api/v1/learners/{learner}/tasks/{first}/complete"),
        None,
    )
    .await;

    let json = body_json(get(&app, &format!("/api/v1/learners/{learner}")).await).await;
    assert_eq!(json["data"]["learning_progress"], 100);

    // The plan grew by one uncompleted task: 1 of 2 done is 50%.
    schedule_task(&app, learner, "Databases").await;

    let json = body_json(get(&app, &format!("/api/v1/learners/{learner}")).await).await;
    assert_eq!(json["data"]["learning_progress"], 50);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn removing_a_task_recomputes_progress(pool: PgPool) {
    let app = common::build_test_app(pool);

    let learner = register_learner(&app, "avery").await;
    let first = schedule_task(&app, learner, "Intro to APIs").await;
    schedule_task(&app, learner, "Databases").await;

    put_json(
        &app,
        &format!("/api/v1/learners/{learner}/tasks/{first}/complete"),
        None,
    )
    .await;

    // Removing the completed task leaves one uncompleted task: 0%.
    let response = delete(&app, &format!("/api/v1/learners/{learner}/tasks/{first}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["progress"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn removing_the_last_task_zeroes_progress(pool: PgPool) {
    let app = common::build_test_app(pool);

    let learner = register_learner(&app, "avery").await;
    let task = schedule_task(&app, learner, "Intro to APIs").await;

    put_json(
        &app,
        &format!("/api/v1/learners/{learner}/tasks/{task}/complete"),
        None,
    )
    .await;

    let response = delete(&app, &format!("/api/v1/learners/{learner}/tasks/{task}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["progress"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn assign_course_sets_pre_assessment_state(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    seed_course(&pool, "Backend Engineering Fundamentals", &["Intro to APIs", "Databases"]).await;

    let learner = register_learner(&app, "avery").await;
    // A leftover task from before assignment must be cleared.
    schedule_task(&app, learner, "Old orientation task").await;

    let response = post_json(
        &app,
        &format!("/api/v1/learners/{learner}/course"),
        json!({ "course_name": "Backend Engineering Fundamentals" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["data"]["current_course"],
        "Backend Engineering Fundamentals"
    );
    assert_eq!(json["data"]["learning_progress"], 0);
    assert_eq!(
        json["data"]["proficiency_assessment_status"],
        "pre-assessment-pending"
    );
    assert_eq!(json["data"]["pre_assessment_module_title"], "Intro to APIs");

    let json = body_json(get(&app, &format!("/api/v1/learners/{learner}/tasks")).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn assign_rejects_unknown_course(pool: PgPool) {
    let app = common::build_test_app(pool);

    let learner = register_learner(&app, "avery").await;
    let response = post_json(
        &app,
        &format!("/api/v1/learners/{learner}/course"),
        json!({ "course_name": "No Such Course" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn assign_rejects_course_with_no_modules(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    seed_course(&pool, "Empty Course", &[]).await;

    let learner = register_learner(&app, "avery").await;
    let response = post_json(
        &app,
        &format!("/api/v1/learners/{learner}/course"),
        json!({ "course_name": "Empty Course" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn assign_rejects_already_completed_course(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    seed_course(&pool, "Backend Engineering Fundamentals", &["Intro to APIs"]).await;

    let learner = register_learner(&app, "avery").await;

    // Complete the course once: assign, add a task, finish it.
    post_json(
        &app,
        &format!("/api/v1/learners/{learner}/course"),
        json!({ "course_name": "Backend Engineering Fundamentals" }),
    )
    .await;
    let task = schedule_task(&app, learner, "Intro to APIs").await;
    put_json(
        &app,
        &format!("/api/v1/learners/{learner}/tasks/{task}/complete"),
        None,
    )
    .await;

    // Re-assignment of the archived course is rejected.
    let response = post_json(
        &app,
        &format!("/api/v1/learners/{learner}/course"),
        json!({ "course_name": "Backend Engineering Fundamentals" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_STATE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn completing_all_tasks_archives_active_course(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    seed_course(&pool, "Backend Engineering Fundamentals", &["Intro to APIs"]).await;

    let learner = register_learner(&app, "avery").await;
    post_json(
        &app,
        &format!("/api/v1/learners/{learner}/course"),
        json!({ "course_name": "Backend Engineering Fundamentals" }),
    )
    .await;
    let task = schedule_task(&app, learner, "Intro to APIs").await;

    let response = put_json(
        &app,
        &format!("/api/v1/learners/{learner}/tasks/{task}/complete"),
        None,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["progress"], 100);
    assert_eq!(json["data"]["course_archived"], true);

    // Learner fields reset; exactly one history row with the task snapshot.
    let json = body_json(get(&app, &format!("/api/v1/learners/{learner}")).await).await;
    assert_eq!(json["data"]["current_course"], "None");
    assert_eq!(json["data"]["learning_progress"], 0);

    let json = body_json(
        get(&app, &format!("/api/v1/learners/{learner}/completed-courses")).await,
    )
    .await;
    let history = json["data"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(
        history[0]["course_name"],
        "Backend Engineering Fundamentals"
    );
    assert_eq!(history[0]["tasks"].as_array().unwrap().len(), 1);

    let json = body_json(get(&app, &format!("/api/v1/learners/{learner}/tasks")).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unassign_clears_course_and_tasks_but_not_assessment_status(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    seed_course(&pool, "Backend Engineering Fundamentals", &["Intro to APIs"]).await;

    let learner = register_learner(&app, "avery").await;
    post_json(
        &app,
        &format!("/api/v1/learners/{learner}/course"),
        json!({ "course_name": "Backend Engineering Fundamentals" }),
    )
    .await;
    schedule_task(&app, learner, "Intro to APIs").await;

    let response = delete(&app, &format!("/api/v1/learners/{learner}/course")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(&app, &format!("/api/v1/learners/{learner}")).await).await;
    assert_eq!(json["data"]["current_course"], "None");
    assert_eq!(json["data"]["learning_progress"], 0);
    // Unassignment leaves the pre-assessment flag alone.
    assert_eq!(
        json["data"]["proficiency_assessment_status"],
        "pre-assessment-pending"
    );

    let json = body_json(get(&app, &format!("/api/v1/learners/{learner}/tasks")).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reset_assessment_clears_state(pool: PgPool) {
    let app = common::build_test_app(pool);

    let learner = register_learner(&app, "avery").await;
    schedule_task(&app, learner, "Intro to APIs").await;

    let response = put_json(
        &app,
        &format!("/api/v1/learners/{learner}/reset-assessment"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(&app, &format!("/api/v1/learners/{learner}")).await).await;
    assert_eq!(json["data"]["proficiency_assessment_status"], "pending");
    assert_eq!(json["data"]["learning_progress"], 0);

    let json = body_json(get(&app, &format!("/api/v1/learners/{learner}/tasks")).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn completing_an_unknown_task_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let learner = register_learner(&app, "avery").await;
    let response = put_json(
        &app,
        &format!("/api/v1/learners/{learner}/tasks/9999/complete"),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
