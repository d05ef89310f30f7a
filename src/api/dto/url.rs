//! DTOs for URL create, update, info and analytics endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::timestamp;
use crate::domain::entities::{UrlAnalytics, UrlRecord};

/// Request to create a short URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    /// Destination; must start with `http://` or `https://`.
    #[validate(length(min = 1, max = 2048))]
    pub original_url: String,

    /// Optional user-chosen short code. An empty string means none.
    #[validate(length(max = 50))]
    pub custom_alias: Option<String>,

    /// Optional expiry. After this instant the code stops resolving.
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Request to replace the destination (and optionally the expiry) of a code.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUrlRequest {
    #[validate(length(min = 1, max = 2048))]
    pub original_url: String,

    /// New expiry. Absent or `null` leaves the current expiry unchanged.
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Wire representation of a stored record.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UrlResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub custom_alias: Option<String>,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl From<UrlRecord> for UrlResponse {
    fn from(r: UrlRecord) -> Self {
        Self {
            id: r.id,
            original_url: r.original_url,
            short_code: r.short_code,
            custom_alias: r.custom_alias,
            clicks: r.clicks,
            created_at: r.created_at,
            expires_at: r.expires_at,
            is_active: r.is_active,
        }
    }
}

/// Usage summary for a single code.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsResponse {
    pub short_code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub custom_alias: Option<String>,
}

impl From<UrlAnalytics> for AnalyticsResponse {
    fn from(a: UrlAnalytics) -> Self {
        Self {
            short_code: a.short_code,
            original_url: a.original_url,
            clicks: a.clicks,
            created_at: a.created_at,
            custom_alias: a.custom_alias,
        }
    }
}

/// Confirmation body returned after a delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
