//! Destination URL validation.
//!
//! Deliberately shallow: only the scheme prefix is checked. No DNS lookup,
//! reachability test or full URI grammar.

use crate::error::AppError;

/// Returns true iff `url` starts with `http://` or `https://`.
pub fn is_valid_destination(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Fails with [`AppError::InvalidUrlFormat`] when `url` is not a valid destination.
pub fn ensure_valid_destination(url: &str) -> Result<(), AppError> {
    if is_valid_destination(url) {
        Ok(())
    } else {
        Err(AppError::InvalidUrlFormat {
            url: url.to_string(),
        })
    }
}
