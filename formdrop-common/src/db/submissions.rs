//! Submission queries
//!
//! A submission is written exactly once at ingestion and never mutated.
//! The document is stored as JSON text, byte-for-byte the mapping the
//! normalizer produced: no field whitelisting, no trimming, no type
//! coercion. Key order survives the round trip (serde_json preserve_order),
//! which the field inference engine relies on.

use crate::db::models::Submission;
use crate::fields::Document;
use crate::{time, Error, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

fn submission_from_row(row: (String, String, String, DateTime<Utc>)) -> Result<Submission> {
    let (id, project_id, data, created_at) = row;
    Ok(Submission {
        id: Uuid::parse_str(&id).map_err(|e| Error::Internal(format!("Bad submission id: {}", e)))?,
        project_id: Uuid::parse_str(&project_id)
            .map_err(|e| Error::Internal(format!("Bad project id: {}", e)))?,
        data: serde_json::from_str(&data)
            .map_err(|e| Error::Internal(format!("Stored document is not valid JSON: {}", e)))?,
        created_at,
    })
}

/// Insert one submission for a project and return it.
///
/// The creation timestamp is assigned here, by the store. The project id is
/// NOT validated against any caller identity - the intake endpoint is
/// public - but the foreign key rejects ids that do not exist at all.
pub async fn insert_submission(
    pool: &SqlitePool,
    project_id: Uuid,
    data: &Document,
) -> Result<Submission> {
    let submission = Submission {
        id: Uuid::new_v4(),
        project_id,
        created_at: time::now(),
        data: data.clone(),
    };

    let serialized = serde_json::to_string(&submission.data)
        .map_err(|e| Error::Internal(format!("Document serialization failed: {}", e)))?;

    sqlx::query("INSERT INTO submissions (id, project_id, data, created_at) VALUES (?, ?, ?, ?)")
        .bind(submission.id.to_string())
        .bind(submission.project_id.to_string())
        .bind(serialized)
        .bind(submission.created_at)
        .execute(pool)
        .await?;

    Ok(submission)
}

/// Fetch all submissions for a project, newest first.
///
/// The dashboard's table and export both operate on this snapshot; they
/// never page at the SQL level.
pub async fn submissions_for_project(
    pool: &SqlitePool,
    project_id: Uuid,
) -> Result<Vec<Submission>> {
    let rows = sqlx::query_as::<_, (String, String, String, DateTime<Utc>)>(
        r#"
        SELECT id, project_id, data, created_at
        FROM submissions
        WHERE project_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(project_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(submission_from_row).collect()
}
