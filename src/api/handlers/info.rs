//! Handlers for read-only lookups. Neither counts a click.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::url::{AnalyticsResponse, UrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the full record behind a live code.
///
/// # Endpoint
///
/// `GET /api/info/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist or has expired.
pub async fn info_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlResponse>, AppError> {
    let record = state.url_service.get_info(&code).await?;
    Ok(Json(record.into()))
}

/// Returns click statistics for a live code.
///
/// # Endpoint
///
/// `GET /api/analytics/{code}`
///
/// # Response
///
/// ```json
/// {
///   "short_code": "promo",
///   "original_url": "https://example.com",
///   "clicks": 42,
///   "created_at": "2026-01-01T00:00:00Z",
///   "custom_alias": "promo"
/// }
/// ```
pub async fn analytics_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let analytics = state.url_service.get_analytics(&code).await?;
    Ok(Json(analytics.into()))
}
