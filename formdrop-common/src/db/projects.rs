//! Project queries
//!
//! Projects are created and deleted explicitly from the dashboard and are
//! otherwise immutable. Deleting a project cascades to its submissions via
//! the foreign key on the submissions table.

use crate::db::models::{Project, ProjectSummary};
use crate::{time, Error, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

type ProjectRow = (String, String, Option<String>, Option<String>, DateTime<Utc>);

fn project_from_row(row: ProjectRow) -> Result<Project> {
    Ok(Project {
        id: Uuid::parse_str(&row.0).map_err(|e| Error::Internal(format!("Bad project id: {}", e)))?,
        name: row.1,
        description: row.2,
        user_id: row.3,
        created_at: row.4,
    })
}

/// Insert a new project and return it
pub async fn create_project(
    pool: &SqlitePool,
    name: &str,
    description: Option<&str>,
    user_id: Option<&str>,
) -> Result<Project> {
    let project = Project {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: description.map(str::to_string),
        user_id: user_id.map(str::to_string),
        created_at: time::now(),
    };

    sqlx::query(
        "INSERT INTO projects (id, name, description, user_id, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(project.id.to_string())
    .bind(&project.name)
    .bind(&project.description)
    .bind(&project.user_id)
    .bind(project.created_at)
    .execute(pool)
    .await?;

    Ok(project)
}

/// List all projects newest first, each with its submission count
pub async fn list_projects(pool: &SqlitePool) -> Result<Vec<ProjectSummary>> {
    let rows = sqlx::query_as::<_, (String, String, Option<String>, Option<String>, DateTime<Utc>, i64)>(
        r#"
        SELECT p.id, p.name, p.description, p.user_id, p.created_at,
               (SELECT COUNT(*) FROM submissions s WHERE s.project_id = p.id)
        FROM projects p
        ORDER BY p.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(id, name, description, user_id, created_at, submission_count)| {
            Ok(ProjectSummary {
                project: project_from_row((id, name, description, user_id, created_at))?,
                submission_count,
            })
        })
        .collect()
}

/// Fetch one project by id, or None if it does not exist
pub async fn get_project(pool: &SqlitePool, id: Uuid) -> Result<Option<Project>> {
    let row = sqlx::query_as::<_, ProjectRow>(
        "SELECT id, name, description, user_id, created_at FROM projects WHERE id = ?",
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    row.map(project_from_row).transpose()
}

/// Delete a project (cascades to its submissions)
///
/// Returns false when no project with that id existed.
pub async fn delete_project(pool: &SqlitePool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
