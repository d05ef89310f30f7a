//! Short code resolution with live expiry checks and click counting.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::domain::resolution::ResolutionOutcome;
use crate::error::AppError;

/// Resolves short codes to records.
///
/// Expiry is always evaluated against the current time. The first time an
/// expired record is observed its `is_active` flag is written back as
/// `false`; the flag is never consulted when deciding liveness.
pub struct ResolutionService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UrlRepository + ?Sized> ResolutionService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Looks up a code without counting a click.
    ///
    /// The not-found path performs no writes. The expired path writes at
    /// most once per record (only while `is_active` is still `true`).
    pub async fn resolve(&self, code: &str) -> Result<ResolutionOutcome, AppError> {
        let Some(record) = self.repository.find_by_code(code).await? else {
            debug!(code, "Short code not found");
            return Ok(ResolutionOutcome::NotFound);
        };

        if record.is_expired_at(Utc::now()) {
            self.deactivate(&record).await?;
            return Ok(ResolutionOutcome::Expired);
        }

        Ok(ResolutionOutcome::Found(record))
    }

    /// Resolves a code for redirection and counts one click.
    ///
    /// The increment is an atomic store operation that only applies to a
    /// live record, so concurrent redirects never lose updates and an
    /// expired record is never counted. The returned record carries the
    /// post-increment counter.
    pub async fn resolve_for_redirect(&self, code: &str) -> Result<ResolutionOutcome, AppError> {
        let outcome = self.resolve(code).await?;
        if !outcome.is_found() {
            return Ok(outcome);
        }

        match self.repository.increment_clicks(code, Utc::now()).await? {
            Some(record) => {
                debug!(code, clicks = record.clicks, "Click recorded");
                Ok(ResolutionOutcome::Found(record))
            }
            None => self.settle_missed_increment(code).await,
        }
    }

    /// The record was deleted or expired between the lookup and the
    /// increment. Report it without counting.
    async fn settle_missed_increment(&self, code: &str) -> Result<ResolutionOutcome, AppError> {
        match self.repository.find_by_code(code).await? {
            Some(record) if record.is_expired_at(Utc::now()) => {
                self.deactivate(&record).await?;
                Ok(ResolutionOutcome::Expired)
            }
            _ => Ok(ResolutionOutcome::NotFound),
        }
    }

    async fn deactivate(&self, record: &UrlRecord) -> Result<(), AppError> {
        if record.is_active {
            self.repository.mark_inactive(&record.short_code).await?;
            info!(code = %record.short_code, expires_at = ?record.expires_at, "Short code expired, marked inactive");
        } else {
            debug!(code = %record.short_code, "Short code expired");
        }
        Ok(())
    }
}
