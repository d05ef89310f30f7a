//! Outcome of looking up a short code.

use crate::domain::entities::UrlRecord;
use crate::error::AppError;

/// Result of resolving a short code against the record store.
///
/// `Expired` is kept distinct internally so callers can log it, but the
/// public contract treats it exactly like `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Found(UrlRecord),
    NotFound,
    Expired,
}

impl ResolutionOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, ResolutionOutcome::Found(_))
    }

    /// Collapses the outcome into the public contract: a live record or a
    /// not-found error.
    pub fn into_record(self, code: &str) -> Result<UrlRecord, AppError> {
        match self {
            ResolutionOutcome::Found(record) => Ok(record),
            ResolutionOutcome::NotFound | ResolutionOutcome::Expired => {
                Err(AppError::not_found_or_expired(code))
            }
        }
    }
}
