//! Handler for the link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::url::{CreateUrlRequest, UrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com",
///   "custom_alias": "promo",                 // optional
///   "expires_at": "2026-12-31T23:59:59Z"     // optional
/// }
/// ```
///
/// # Errors
///
/// - 400 if the URL scheme is not http(s) or the alias is malformed
/// - 409 if the custom alias is already taken
/// - 503 if no free short code could be allocated
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<UrlResponse>), AppError> {
    payload.validate()?;

    let record = state
        .url_service
        .create(payload.original_url, payload.custom_alias, payload.expires_at)
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}
