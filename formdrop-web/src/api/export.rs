//! Export download endpoint
//!
//! Builds the two-sheet workbook from the same snapshot the table reads
//! and serves it as an attachment named after the project.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use formdrop_common::db::{projects, submissions};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::export::{build_workbook, ExportError};
use crate::AppState;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// GET /api/projects/:id/export
pub async fn export_submissions(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> Result<Response, ExportApiError> {
    let project = projects::get_project(&state.db, project_id)
        .await
        .map_err(|e| ExportApiError::StoreRead(e.to_string()))?
        .ok_or(ExportApiError::ProjectNotFound)?;

    let snapshot = submissions::submissions_for_project(&state.db, project_id)
        .await
        .map_err(|e| ExportApiError::StoreRead(e.to_string()))?;

    let bytes = build_workbook(&snapshot).map_err(|e| match e {
        ExportError::EmptyExportSet => ExportApiError::EmptyExportSet,
        ExportError::Workbook(detail) => ExportApiError::Workbook(detail),
    })?;

    let filename = format!("{}.xlsx", sanitize_filename(&project.name));
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// Reduce a project name to a safe attachment filename
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();

    if cleaned.trim_matches('-').is_empty() {
        "submissions".to_string()
    } else {
        cleaned
    }
}

/// Export API errors
#[derive(Debug)]
pub enum ExportApiError {
    ProjectNotFound,
    EmptyExportSet,
    StoreRead(String),
    Workbook(String),
}

impl IntoResponse for ExportApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ExportApiError::ProjectNotFound => (StatusCode::NOT_FOUND, "Project not found"),
            ExportApiError::EmptyExportSet => (StatusCode::BAD_REQUEST, "No data to export"),
            ExportApiError::StoreRead(detail) => {
                error!("Export read failed: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load submissions")
            }
            ExportApiError::Workbook(detail) => {
                error!("Export workbook build failed: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to export data")
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
