//! Handlers for URL management endpoints (list, update, delete).

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::pagination::ListParams;
use crate::api::dto::url::{MessageResponse, UpdateUrlRequest, UrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists stored URLs in creation order, expired ones included.
///
/// # Endpoint
///
/// `GET /api/urls?skip=0&limit=10`
///
/// # Errors
///
/// Returns 400 Bad Request if `limit` is outside 1-1000.
pub async fn list_urls_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<UrlResponse>>, AppError> {
    let (skip, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let records = state.url_service.list(skip, limit).await?;

    Ok(Json(records.into_iter().map(UrlResponse::from).collect()))
}

/// Replaces the destination of a short code.
///
/// # Endpoint
///
/// `PUT /api/urls/{code}`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://new-destination.com",
///   "expires_at": "2026-12-31T23:59:59Z"   // optional, absent keeps current
/// }
/// ```
///
/// # Errors
///
/// - 404 Not Found if the code doesn't exist
/// - 400 Bad Request if the new URL is not http(s)
pub async fn update_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateUrlRequest>,
) -> Result<Json<UrlResponse>, AppError> {
    payload.validate()?;

    let record = state
        .url_service
        .update(&code, payload.original_url, payload.expires_at)
        .await?;

    Ok(Json(record.into()))
}

/// Permanently deletes a short code.
///
/// # Endpoint
///
/// `DELETE /api/urls/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn delete_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.url_service.delete(&code).await? {
        return Err(AppError::not_found(code));
    }

    Ok(Json(MessageResponse {
        message: "URL deleted successfully".to_string(),
    }))
}
