//! Shared helpers for API integration tests: router construction, a mock
//! Content Generation Service, and request/response utilities.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use pathlight_api::config::ServerConfig;
use pathlight_api::router::build_app_router;
use pathlight_api::state::AppState;
use pathlight_contentgen::ContentAgentClient;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(content_agent_url: String) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        content_agent_url,
    }
}

/// Build the full application router with all middleware layers, pointing
/// the content client at an address nothing listens on. Suitable for tests
/// that never trigger content generation.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_agent(pool, "http://127.0.0.1:9".to_string())
}

/// Build the application router with the content client pointed at the
/// given base URL (normally a [`mock_content_agent`]).
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app_with_agent(pool: PgPool, agent_url: String) -> Router {
    let config = test_config(agent_url.clone());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        content_client: ContentAgentClient::new(agent_url),
    };

    build_app_router(state, &config)
}

/// Spawn a mock Content Generation Service on an ephemeral port and return
/// its base URL. Responses are canned:
///
/// - quizzes always have two questions ("HTTP Basics" answer `A`,
///   "REST Design" answer `B`);
/// - the full curriculum always has three modules;
/// - the remedial suggestion is always "Refresher Module".
pub async fn mock_content_agent() -> String {
    let app = Router::new()
        .route(
            "/generate-course",
            post(|| async {
                Json(json!({
                    "name": "Backend Engineering Fundamentals",
                    "description": "Core skills for backend work",
                    "modules": [
                        { "title": "Intro to APIs" },
                        { "title": "Databases" },
                    ]
                }))
            }),
        )
        .route(
            "/generate-module-content",
            post(|| async {
                Json(json!({
                    "summary": "A focused refresher on the fundamentals.",
                    "articles": [
                        { "title": "Getting started", "url": "https://example.com/start" }
                    ],
                    "video": { "title": "Walkthrough", "youtube_id": "dQw4w9WgXcQ" }
                }))
            }),
        )
        .route(
            "/generate-assessment",
            post(|| async {
                Json(json!({
                    "questions": [
                        {
                            "question_text": "Which verb fetches a resource?",
                            "options": ["A", "B", "C", "D"],
                            "correct_answer": "A",
                            "topic": "HTTP Basics"
                        },
                        {
                            "question_text": "Which status signals creation?",
                            "options": ["A", "B", "C", "D"],
                            "correct_answer": "B",
                            "topic": "REST Design"
                        }
                    ]
                }))
            }),
        )
        .route(
            "/generate-full-course-content",
            post(|| async {
                Json(json!({
                    "modules": [
                        {
                            "title": "Week One Foundations",
                            "summary": "Start here.",
                            "articles": [
                                { "title": "Basics", "url": "https://example.com/basics" }
                            ]
                        },
                        {
                            "title": "Week Two Practice",
                            "summary": "Hands-on exercises.",
                            "articles": []
                        },
                        {
                            "title": "Week Three Project",
                            "summary": "Put it together.",
                            "articles": [],
                            "video": { "title": "Demo", "youtube_id": "abc123" }
                        }
                    ]
                }))
            }),
        )
        .route(
            "/generate-remedial-suggestion",
            post(|| async {
                Json(json!({
                    "suggested_module_title": "Refresher Module",
                    "justification": "The learner needs another pass at this topic."
                }))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock content agent");
    let addr = listener.local_addr().expect("Mock agent has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock agent failed");
    });

    format!("http://{addr}")
}

/// Issue a GET request against the app.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    request(app, Method::GET, uri, None).await
}

/// Issue a POST request with a JSON body.
pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    request(app, Method::POST, uri, Some(body)).await
}

/// Issue a PUT request, optionally with a JSON body.
pub async fn put_json(app: &Router, uri: &str, body: Option<Value>) -> Response<Body> {
    request(app, Method::PUT, uri, body).await
}

/// Issue a DELETE request.
pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    request(app, Method::DELETE, uri, None).await
}

async fn request(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    app.clone()
        .oneshot(request)
        .await
        .expect("Request failed to complete")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Response body is not valid JSON")
}

/// Register a learner through the API and return its id.
pub async fn register_learner(app: &Router, username: &str) -> i64 {
    let response = post_json(
        app,
        "/api/v1/learners",
        json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "employee_id": format!("EMP-{username}"),
            "password_hash": "argon2id$stub",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    json["data"]["id"].as_i64().expect("Learner id missing")
}

/// Seed a course with the given module titles directly through the
/// repository layer, returning its id.
pub async fn seed_course(pool: &PgPool, name: &str, module_titles: &[&str]) -> i64 {
    use pathlight_db::models::course::{CreateCourse, NewCourseModule};
    use pathlight_db::repositories::CourseRepo;

    let modules = module_titles
        .iter()
        .map(|title| NewCourseModule {
            title: (*title).to_string(),
            summary: String::new(),
            articles: json!([]),
            video: None,
            content: String::new(),
        })
        .collect();

    let created = CourseRepo::create(
        pool,
        &CreateCourse {
            name: name.to_string(),
            description: "Seeded for tests".to_string(),
            target_department: "Engineering".to_string(),
            target_role: "Backend Engineer".to_string(),
            modules,
        },
    )
    .await
    .expect("Failed to seed course");
    created.course.id
}

/// Schedule an ad-hoc task for a learner and return its id.
pub async fn schedule_task(app: &Router, learner_id: i64, title: &str) -> i64 {
    let response = post_json(
        app,
        &format!("/api/v1/learners/{learner_id}/tasks"),
        json!({ "title": title }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    json["data"]["id"].as_i64().expect("Task id missing")
}
