//! Handlers for link management endpoints (create, list, stats, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::link::{CreateLinkRequest, CreateLinkResponse, LinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "target": "https://example.com/page", "code": "abc123" }
/// ```
///
/// `code` is optional; a random 6-8 character code is allocated without it.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "code": "abc123", "shortUrl": "http://localhost:10000/abc123", "target": "https://example.com/page" }
/// ```
///
/// # Errors
///
/// - 400 if the body, target or custom code is invalid
/// - 409 if the custom code already exists
/// - 500 on store failures
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    let Json(payload) = payload?;

    let target = payload.target.ok_or(AppError::InvalidTarget)?;

    let created = state
        .link_service
        .create_link(&target, payload.code)
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Lists every link, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Returns the stored attributes and counters of one link.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// - 400 if the code is malformed
/// - 404 if no link has this code
pub async fn link_stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link_stats(&code).await?;

    Ok(Json(link.into()))
}

/// Permanently deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Errors
///
/// - 400 if the code is malformed
/// - 404 if no link has this code (including one deleted earlier)
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}
