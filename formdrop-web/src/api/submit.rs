//! Public submission intake endpoint
//!
//! POST /api/submit/:project_id accepts JSON, URL-encoded, and multipart
//! bodies from anyone who knows the project id - it is a public intake
//! endpoint, not an authenticated API, and the id is never checked against
//! a caller identity. The normalized payload is stored verbatim; every
//! failure is terminal for that request (no retries, no partial writes).

use axum::{
    extract::{FromRequest, Multipart, Path, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use formdrop_common::db::submissions;
use formdrop_common::fields::Document;
use serde_json::{json, Value};
use tracing::{error, warn};
use uuid::Uuid;

use crate::normalize::{self, PayloadKind};
use crate::AppState;

/// Maximum accepted body size (10 MB)
const BODY_LIMIT: usize = 10 * 1024 * 1024;

/// POST /api/submit/:project_id
///
/// On success, programmatic callers get a JSON acknowledgment; a browser
/// form post (Accept includes text/html, body is not JSON, Referer known)
/// is redirected back to its referring page with `?success=true` appended.
pub async fn submit(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    request: Request,
) -> Result<Response, SubmitError> {
    let content_type = header_string(&request, header::CONTENT_TYPE);
    let accept = header_string(&request, header::ACCEPT);
    let referer = request
        .headers()
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let kind = normalize::classify_content_type(&content_type)
        .ok_or_else(|| SubmitError::UnsupportedContentType(content_type.clone()))?;

    let document = match kind {
        PayloadKind::Json => {
            let body = read_body(request).await?;
            normalize::parse_json_document(&body)
                .map_err(|e| SubmitError::MalformedPayload(e.to_string()))?
        }
        PayloadKind::UrlEncoded => {
            let body = read_body(request).await?;
            normalize::parse_urlencoded_document(&body)
                .map_err(|e| SubmitError::MalformedPayload(e.to_string()))?
        }
        PayloadKind::Multipart => collect_multipart(&state, request).await?,
    };

    // The id is opaque to the caller; a malformed or unknown one surfaces
    // as the same generic store failure so nothing is probed
    let project_id = Uuid::parse_str(&project_id)
        .map_err(|e| SubmitError::StoreWrite(format!("Malformed project id: {}", e)))?;

    submissions::insert_submission(&state.db, project_id, &document)
        .await
        .map_err(|e| SubmitError::StoreWrite(e.to_string()))?;

    // Browser form posts bounce back to the page that hosted the form
    if accept.contains("text/html") && !content_type.contains("application/json") {
        if let Some(referer) = referer {
            return Ok(Redirect::to(&format!("{}?success=true", referer)).into_response());
        }
    }

    Ok(Json(json!({ "success": true })).into_response())
}

/// POST /api/submit (no project id segment)
pub async fn submit_missing_id() -> SubmitError {
    SubmitError::MissingProjectId
}

/// OPTIONS /api/submit/:project_id
///
/// CORS preflight: empty JSON body, permissive headers added by the CORS
/// layer. Never touches the store.
pub async fn submit_options() -> Json<Value> {
    Json(json!({}))
}

fn header_string(request: &Request, name: header::HeaderName) -> String {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

async fn read_body(request: Request) -> Result<Vec<u8>, SubmitError> {
    let bytes = axum::body::to_bytes(request.into_body(), BODY_LIMIT)
        .await
        .map_err(|e| SubmitError::MalformedPayload(format!("Failed to read body: {}", e)))?;
    Ok(bytes.to_vec())
}

/// Flatten a multipart body into a document: each part's text content
/// under its field name, last occurrence of a repeated name winning.
async fn collect_multipart(state: &AppState, request: Request) -> Result<Document, SubmitError> {
    let mut multipart = Multipart::from_request(request, state)
        .await
        .map_err(|e| SubmitError::MalformedPayload(e.to_string()))?;

    let mut doc = Document::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| SubmitError::MalformedPayload(e.to_string()))?
    {
        let name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        let text = field
            .text()
            .await
            .map_err(|e| SubmitError::MalformedPayload(e.to_string()))?;
        doc.insert(name, Value::String(text));
    }
    Ok(doc)
}

/// Intake errors
///
/// Client-facing messages are deliberately generic; the detail strings go
/// to the server log only.
#[derive(Debug)]
pub enum SubmitError {
    MissingProjectId,
    UnsupportedContentType(String),
    MalformedPayload(String),
    StoreWrite(String),
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            SubmitError::MissingProjectId => {
                (StatusCode::BAD_REQUEST, "Project ID is required")
            }
            SubmitError::UnsupportedContentType(detail) => {
                warn!("Submission with unsupported content type: {:?}", detail);
                (StatusCode::BAD_REQUEST, "Unsupported Content-Type")
            }
            SubmitError::MalformedPayload(detail) => {
                warn!("Submission with malformed payload: {}", detail);
                (StatusCode::BAD_REQUEST, "Invalid request")
            }
            SubmitError::StoreWrite(detail) => {
                error!("Submission store write failed: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save submission")
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
