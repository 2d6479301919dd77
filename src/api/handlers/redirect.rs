//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::{AppError, SERVER_ERROR_MESSAGE};
use crate::state::AppState;
use crate::utils::target_url::encode_location;

/// Redirects a short code to its target and counts the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Behavior
///
/// Answers `302 Found` so every visit passes through the service and is
/// counted. Non-ASCII characters of the target are percent-encoded in the
/// `Location` header.
///
/// # Errors
///
/// Answers in plain text:
/// - 404 `Not found` for unknown or malformed codes
/// - 500 `Server error` on store failures
pub async fn redirect_handler(Path(code): Path<String>, State(state): State<AppState>) -> Response {
    match state.link_service.resolve_and_count(&code).await {
        Ok(target) => match HeaderValue::try_from(encode_location(&target)) {
            Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
            Err(e) => {
                tracing::error!(code = %code, error = %e, "Stored target is not a valid Location header");
                server_error()
            }
        },
        Err(AppError::NotFound) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        Err(err) => {
            err.log();
            server_error()
        }
    }
}

fn server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response()
}
