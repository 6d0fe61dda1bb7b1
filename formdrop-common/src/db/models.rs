//! Database models

use crate::fields::Document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named collection point owned by one user, each with its own public
/// intake endpoint. Ownership (`user_id`) is an opaque reference into an
/// external user store; this service does not interpret it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Project plus its submission count, for the dashboard list
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: Project,
    pub submission_count: i64,
}

/// One schema-less record received at a project's intake endpoint.
///
/// `data` is always a JSON object (never a bare scalar or array at the top
/// level); beyond that, no key set or value shape is guaranteed across
/// submissions to the same project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub project_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub data: Document,
}
