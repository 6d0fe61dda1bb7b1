//! Project CRUD handlers for the dashboard API
//!
//! Projects are immutable once created: the dashboard can create, list,
//! inspect, and delete them, nothing else. Ownership checks belong to the
//! external user store; `user_id` is stored opaquely.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use formdrop_common::db::models::{Project, ProjectSummary};
use formdrop_common::db::projects;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectSummary>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), ProjectError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ProjectError::InvalidName);
    }

    let project = projects::create_project(
        &state.db,
        name,
        request.description.as_deref(),
        request.user_id.as_deref(),
    )
    .await
    .map_err(|e| ProjectError::Database(e.to_string()))?;

    info!("Created project {} ({})", project.name, project.id);
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<ProjectListResponse>, ProjectError> {
    let projects = projects::list_projects(&state.db)
        .await
        .map_err(|e| ProjectError::Database(e.to_string()))?;

    Ok(Json(ProjectListResponse { projects }))
}

/// GET /api/projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Project>, ProjectError> {
    let project = projects::get_project(&state.db, id)
        .await
        .map_err(|e| ProjectError::Database(e.to_string()))?
        .ok_or(ProjectError::NotFound)?;

    Ok(Json(project))
}

/// DELETE /api/projects/:id
///
/// Cascades to the project's submissions.
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusResponse>, ProjectError> {
    let deleted = projects::delete_project(&state.db, id)
        .await
        .map_err(|e| ProjectError::Database(e.to_string()))?;

    if !deleted {
        return Err(ProjectError::NotFound);
    }

    info!("Deleted project {}", id);
    Ok(Json(StatusResponse {
        status: "deleted".to_string(),
    }))
}

/// Project API errors
#[derive(Debug)]
pub enum ProjectError {
    InvalidName,
    NotFound,
    Database(String),
}

impl IntoResponse for ProjectError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ProjectError::InvalidName => {
                (StatusCode::BAD_REQUEST, "Project name is required")
            }
            ProjectError::NotFound => (StatusCode::NOT_FOUND, "Project not found"),
            ProjectError::Database(detail) => {
                error!("Project query failed: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
