//! API route configuration.

use crate::api::handlers::{
    analytics_handler, delete_url_handler, info_handler, list_urls_handler, shorten_handler,
    update_url_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// All routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST   /shorten`           - Create a short URL (generated code or custom alias)
/// - `GET    /urls`              - List stored URLs (paginated with `skip`/`limit`)
/// - `PUT    /urls/{code}`       - Replace destination and optionally expiry
/// - `DELETE /urls/{code}`       - Delete a short URL
/// - `GET    /info/{code}`       - Full record of a live code
/// - `GET    /analytics/{code}`  - Click statistics of a live code
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls", get(list_urls_handler))
        .route(
            "/urls/{code}",
            put(update_url_handler).delete(delete_url_handler),
        )
        .route("/info/{code}", get(info_handler))
        .route("/analytics/{code}", get(analytics_handler))
}
