//! Record store contract consumed by the allocation and resolution logic.

use crate::domain::entities::{NewUrlRecord, UrlPatch, UrlRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Errors raised by a record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The storage-level uniqueness constraint on `short_code` rejected an insert.
    #[error("short code '{code}' is already in use")]
    DuplicateCode { code: String },

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Durable storage for URL records, keyed by short code.
///
/// Implementations must enforce uniqueness of `short_code` themselves:
/// the application-level existence check done during allocation is only
/// advisory, and `insert` is the point where a concurrent duplicate is
/// rejected.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record with `clicks = 0` and `is_active = true`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateCode`] if the short code already exists.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, StoreError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, StoreError>;

    /// Applies a field-scoped update to `original_url` and, when given,
    /// `expires_at`. Returns `Ok(None)` if no record has this code.
    async fn update(&self, code: &str, patch: UrlPatch) -> Result<Option<UrlRecord>, StoreError>;

    /// Persists `is_active = false`. Returns `false` if the record is gone.
    async fn mark_inactive(&self, code: &str) -> Result<bool, StoreError>;

    /// Atomically increments `clicks` and returns the updated record.
    ///
    /// The increment is only applied while the record is live at `now`
    /// (no expiry, or expiry not yet reached). Returns `Ok(None)` when the
    /// record is missing or expired, in which case nothing is written.
    async fn increment_clicks(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<UrlRecord>, StoreError>;

    /// Permanently removes the record. Returns `true` if it existed.
    async fn delete_by_code(&self, code: &str) -> Result<bool, StoreError>;

    /// Lists records in creation order.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<UrlRecord>, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;
}
