//! Security-facing behavior of the public and private surfaces
//!
//! Tests cover:
//! - CORS preflight on the intake endpoint (no store contact)
//! - Unsupported content types rejected before any write
//! - Dashboard token middleware (missing / wrong / correct / disabled)
//! - The intake endpoint staying public when dashboard auth is on

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use formdrop_common::db::{init_database, projects, submissions};
use formdrop_web::{build_router, AppState};
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::util::ServiceExt;
use uuid::Uuid;

async fn setup_test_db() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().expect("Should create temp dir");
    let pool = init_database(&dir.path().join("formdrop.db"))
        .await
        .expect("Should initialize test database");
    (dir, pool)
}

async fn seed_project(pool: &SqlitePool) -> Uuid {
    projects::create_project(pool, "secure", None, None)
        .await
        .expect("Should create project")
        .id
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

// =============================================================================
// Intake endpoint: preflight and content-type gating
// =============================================================================

#[tokio::test]
async fn test_options_preflight_succeeds_without_touching_store() {
    let (_dir, pool) = setup_test_db().await;
    let project_id = seed_project(&pool).await;
    // Auth enabled - preflight must still pass, it carries no token
    let app = build_router(AppState::new(pool.clone(), 12345));

    let request = Request::builder()
        .method("OPTIONS")
        .uri(format!("/api/submit/{}", project_id))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let stored = submissions::submissions_for_project(&pool, project_id)
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_unsupported_content_type_rejected_without_write() {
    let (_dir, pool) = setup_test_db().await;
    let project_id = seed_project(&pool).await;
    let app = build_router(AppState::new(pool.clone(), 0));

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/submit/{}", project_id))
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("name=Ada"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Unsupported Content-Type");

    let stored = submissions::submissions_for_project(&pool, project_id)
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_missing_content_type_rejected() {
    let (_dir, pool) = setup_test_db().await;
    let project_id = seed_project(&pool).await;
    let app = build_router(AppState::new(pool, 0));

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/submit/{}", project_id))
        .body(Body::from(r#"{"a": 1}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Dashboard token middleware
// =============================================================================

#[tokio::test]
async fn test_dashboard_requires_token_when_secret_set() {
    let (_dir, pool) = setup_test_db().await;
    let app = build_router(AppState::new(pool, 98765));

    // No token
    let request = Request::builder()
        .method("GET")
        .uri("/api/projects")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Wrong token
    let request = Request::builder()
        .method("GET")
        .uri("/api/projects")
        .header("x-auth-token", "11111")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Correct token
    let request = Request::builder()
        .method("GET")
        .uri("/api/projects")
        .header("x-auth-token", "98765")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_dashboard_open_when_secret_is_zero() {
    let (_dir, pool) = setup_test_db().await;
    let app = build_router(AppState::new(pool, 0));

    let request = Request::builder()
        .method("GET")
        .uri("/api/projects")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_intake_stays_public_when_dashboard_auth_is_on() {
    let (_dir, pool) = setup_test_db().await;
    let project_id = seed_project(&pool).await;
    let app = build_router(AppState::new(pool.clone(), 98765));

    // No token on the intake endpoint - by design
    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/submit/{}", project_id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name": "Ada"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let stored = submissions::submissions_for_project(&pool, project_id)
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_health_requires_no_token() {
    let (_dir, pool) = setup_test_db().await;
    let app = build_router(AppState::new(pool, 98765));

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
