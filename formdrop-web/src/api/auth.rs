//! Authentication middleware for the dashboard API
//!
//! Protected routes require the shared token in the `X-Auth-Token` header.
//! The token lives in the settings table and is generated on first
//! startup; a stored value of 0 disables the check entirely. The public
//! intake endpoint, health check, and UI never pass through here.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::AppState;

/// Header carrying the dashboard token
pub const AUTH_HEADER: &str = "x-auth-token";

/// Authentication middleware
///
/// Returns 401 Unauthorized when the token is missing or wrong.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    // Secret 0 disables all auth checking
    if state.shared_secret == 0 {
        return Ok(next.run(request).await);
    }

    let provided = request
        .headers()
        .get(AUTH_HEADER)
        .and_then(|v| v.to_str().ok());

    match provided {
        Some(token) if token == state.shared_secret.to_string() => Ok(next.run(request).await),
        Some(_) => {
            warn!("Dashboard request with invalid auth token");
            Err(AuthError::InvalidToken)
        }
        None => Err(AuthError::MissingToken),
    }
}

/// Authentication error types for HTTP responses
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "Missing auth token",
            AuthError::InvalidToken => "Invalid auth token",
        };

        let body = Json(json!({
            "error": message,
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
