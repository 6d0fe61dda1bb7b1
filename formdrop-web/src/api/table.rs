//! Submissions table endpoint
//!
//! Serves one immutable snapshot per request: all of a project's
//! submissions are fetched newest-first, then filtered and paged in
//! memory. Interactive refinement (drawer, raw view) happens client-side
//! against the rows already delivered - no further store round-trips.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use formdrop_common::db::{projects, submissions};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::pagination::PAGE_SIZE;
use crate::table::{build_rows, filter_rows, page_rows, TableRow};
use crate::AppState;

/// Query parameters for the submissions table
#[derive(Debug, Deserialize)]
pub struct SubmissionsQuery {
    /// Free-text filter matched against every visible column
    #[serde(default)]
    pub search: String,

    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

/// Submissions table response
#[derive(Debug, Serialize)]
pub struct SubmissionTableResponse {
    pub project_id: Uuid,
    pub total_rows: i64,
    pub filtered_rows: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub rows: Vec<TableRow>,
}

/// GET /api/projects/:id/submissions
pub async fn get_submissions(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Query(query): Query<SubmissionsQuery>,
) -> Result<Json<SubmissionTableResponse>, TableError> {
    projects::get_project(&state.db, project_id)
        .await
        .map_err(|e| TableError::StoreRead(e.to_string()))?
        .ok_or(TableError::ProjectNotFound)?;

    let snapshot = submissions::submissions_for_project(&state.db, project_id)
        .await
        .map_err(|e| TableError::StoreRead(e.to_string()))?;

    let total_rows = snapshot.len() as i64;
    let filtered = filter_rows(build_rows(&snapshot), query.search.trim());
    let filtered_rows = filtered.len() as i64;
    let (pagination, rows) = page_rows(filtered, query.page);

    Ok(Json(SubmissionTableResponse {
        project_id,
        total_rows,
        filtered_rows,
        page: pagination.page,
        page_size: PAGE_SIZE,
        total_pages: pagination.total_pages,
        rows,
    }))
}

/// Table API errors
#[derive(Debug)]
pub enum TableError {
    ProjectNotFound,
    StoreRead(String),
}

impl IntoResponse for TableError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            TableError::ProjectNotFound => (StatusCode::NOT_FOUND, "Project not found"),
            TableError::StoreRead(detail) => {
                error!("Submissions read failed: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load submissions")
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
