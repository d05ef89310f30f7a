//! URL record entity: the unit of storage behind every short code.

use chrono::{DateTime, Utc};

/// A shortened URL mapping with its usage counter.
///
/// `short_code` is unique across the store and never changes after creation.
/// When a custom alias was supplied, `custom_alias` equals `short_code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub custom_alias: Option<String>,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl UrlRecord {
    /// Returns true if the record has an expiry that lies before `now`.
    ///
    /// This is the only liveness test; the persisted `is_active` flag is a
    /// write-back of this fact and is never consulted for resolution.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| e < now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Input data for inserting a new record. The store assigns `id`,
/// `created_at`, `clicks = 0` and `is_active = true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub original_url: String,
    pub short_code: String,
    pub custom_alias: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Field-scoped update applied by the management `update` operation.
///
/// `expires_at: None` leaves the current expiry untouched. Counters are not
/// part of the patch so an update never races with click increments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPatch {
    pub original_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Usage summary returned by the analytics operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlAnalytics {
    pub short_code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub custom_alias: Option<String>,
}

impl From<UrlRecord> for UrlAnalytics {
    fn from(record: UrlRecord) -> Self {
        Self {
            short_code: record.short_code,
            original_url: record.original_url,
            clicks: record.clicks,
            created_at: record.created_at,
            custom_alias: record.custom_alias,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(expires_at: Option<DateTime<Utc>>) -> UrlRecord {
        UrlRecord {
            id: 1,
            original_url: "https://example.com".to_string(),
            short_code: "abc123".to_string(),
            custom_alias: None,
            clicks: 0,
            created_at: Utc::now(),
            expires_at,
            is_active: true,
        }
    }

    #[test]
    fn test_record_without_expiry_never_expires() {
        let r = record(None);
        assert!(!r.is_expired());
        assert!(!r.is_expired_at(Utc::now() + Duration::days(3650)));
    }

    #[test]
    fn test_record_expired_in_the_past() {
        let r = record(Some(Utc::now() - Duration::hours(1)));
        assert!(r.is_expired());
    }

    #[test]
    fn test_record_with_future_expiry_is_live() {
        let r = record(Some(Utc::now() + Duration::hours(1)));
        assert!(!r.is_expired());
    }

    #[test]
    fn test_expiry_ignores_is_active_flag() {
        let mut r = record(Some(Utc::now() + Duration::hours(1)));
        r.is_active = false;
        assert!(!r.is_expired());

        let mut r = record(Some(Utc::now() - Duration::seconds(1)));
        r.is_active = true;
        assert!(r.is_expired());
    }

    #[test]
    fn test_analytics_from_record() {
        let mut r = record(None);
        r.clicks = 7;
        r.custom_alias = Some("abc123".to_string());

        let analytics = UrlAnalytics::from(r.clone());
        assert_eq!(analytics.short_code, "abc123");
        assert_eq!(analytics.original_url, r.original_url);
        assert_eq!(analytics.clicks, 7);
        assert_eq!(analytics.created_at, r.created_at);
        assert_eq!(analytics.custom_alias.as_deref(), Some("abc123"));
    }
}
