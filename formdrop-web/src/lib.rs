//! formdrop-web library - FormDrop web service
//!
//! One Axum service carrying three surfaces:
//! - the public submission intake endpoint (CORS-open, unauthenticated)
//! - the private dashboard JSON API (projects, submissions table, export)
//! - the embedded static dashboard UI

use axum::http::{header, Method};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};

pub mod api;
pub mod export;
pub mod normalize;
pub mod pagination;
pub mod table;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Shared token for dashboard API authentication (0 disables the check)
    pub shared_secret: i64,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, shared_secret: i64) -> Self {
        Self { db, shared_secret }
    }
}

/// Build application router
///
/// Dashboard routes sit behind the shared-token middleware; the intake
/// endpoint, health check, and UI are public. The whole service is served
/// with permissive CORS so third-party pages can POST submissions
/// cross-origin.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};

    // Protected routes (dashboard API)
    let protected = Router::new()
        .route(
            "/api/projects",
            get(api::list_projects).post(api::create_project),
        )
        .route(
            "/api/projects/:id",
            get(api::get_project).delete(api::delete_project),
        )
        .route("/api/projects/:id/submissions", get(api::get_submissions))
        .route("/api/projects/:id/export", get(api::export_submissions))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth_middleware,
        ));

    // Public routes (intake, health, UI)
    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route(
            "/api/submit/:project_id",
            post(api::submit).options(api::submit_options),
        )
        // A POST with no project id segment is answered explicitly
        .route(
            "/api/submit",
            post(api::submit_missing_id).options(api::submit_options),
        )
        .merge(api::health_routes());

    // Combine routers
    Router::new()
        .merge(protected)
        .merge(public)
        .layer(cors_layer())
        .with_state(state)
}

/// Permissive CORS: the intake endpoint is intentionally public and
/// cross-origin-callable from any page embedding a form.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
