//! Pagination query parameters for the listing endpoint.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

/// Default number of records per listing request.
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest accepted `limit`.
pub const MAX_LIMIT: u32 = 1000;

/// `skip`/`limit` query parameters.
///
/// Uses `serde_with` to parse numbers from query strings.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub skip: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ListParams {
    /// Validates parameters and converts to store offset/limit.
    ///
    /// # Defaults
    ///
    /// - `skip`: 0
    /// - `limit`: 10
    ///
    /// # Validation
    ///
    /// - Limit must be between 1 and 1000
    pub fn validate_and_get_offset_limit(&self) -> Result<(i64, i64), String> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);

        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(format!("Limit must be between 1 and {MAX_LIMIT}"));
        }

        Ok((i64::from(skip), i64::from(limit)))
    }
}
