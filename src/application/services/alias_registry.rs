//! Short code allocation: generated codes and custom aliases share one namespace.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::{StoreError, UrlRepository};
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, validate_custom_alias};

/// Default retry budget for generated codes.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Authoritative owner of the short code namespace.
///
/// The existence check done before inserting is an optimization only. The
/// record store's uniqueness constraint is what makes concurrent allocation
/// safe: a [`StoreError::DuplicateCode`] on insert is treated exactly like a
/// failed existence check.
pub struct AliasRegistry<R: UrlRepository + ?Sized, G: CodeGenerator + ?Sized> {
    repository: Arc<R>,
    generator: Arc<G>,
    max_attempts: usize,
}

impl<R: UrlRepository + ?Sized, G: CodeGenerator + ?Sized> AliasRegistry<R, G> {
    pub fn new(repository: Arc<R>, generator: Arc<G>, max_attempts: usize) -> Self {
        Self {
            repository,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Picks a short code that is unused at the time of the check.
    ///
    /// With a custom alias the alias itself is the code, or the call fails
    /// with [`AppError::AliasTaken`]. Without one, generated candidates are
    /// tried up to the retry budget before failing with
    /// [`AppError::AllocationExhausted`].
    ///
    /// The result is advisory; use [`Self::register`] to allocate and insert
    /// in one step.
    pub async fn allocate(&self, custom_alias: Option<&str>) -> Result<String, AppError> {
        if let Some(alias) = custom_alias {
            validate_custom_alias(alias)?;

            if self.is_taken(alias).await? {
                warn!(alias, "Custom alias already taken");
                return Err(AppError::AliasTaken {
                    alias: alias.to_string(),
                });
            }

            return Ok(alias.to_string());
        }

        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate();

            if !self.is_taken(&code).await? {
                return Ok(code);
            }

            debug!(attempt, code = %code, "Generated code collided, retrying");
        }

        warn!(
            attempts = self.max_attempts,
            code_length = self.generator.code_length(),
            "Short code allocation exhausted"
        );
        Err(AppError::AllocationExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Allocates a short code and inserts the record.
    ///
    /// A generated code that loses an insert race is retried with a fresh
    /// candidate and counts against the retry budget. A custom alias that
    /// loses the race fails with [`AppError::AliasTaken`].
    pub async fn register(
        &self,
        original_url: String,
        custom_alias: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<UrlRecord, AppError> {
        if let Some(alias) = custom_alias {
            let short_code = self.allocate(Some(alias.as_str())).await?;

            let new_record = NewUrlRecord {
                original_url,
                short_code,
                custom_alias: Some(alias.clone()),
                expires_at,
            };

            return match self.repository.insert(new_record).await {
                Ok(record) => Ok(record),
                Err(StoreError::DuplicateCode { .. }) => {
                    warn!(alias = %alias, "Custom alias claimed concurrently");
                    Err(AppError::AliasTaken { alias })
                }
                Err(e) => Err(e.into()),
            };
        }

        for attempt in 1..=self.max_attempts {
            let short_code = self.generator.generate();

            if self.is_taken(&short_code).await? {
                debug!(attempt, code = %short_code, "Generated code collided, retrying");
                continue;
            }

            let new_record = NewUrlRecord {
                original_url: original_url.clone(),
                short_code,
                custom_alias: None,
                expires_at,
            };

            match self.repository.insert(new_record).await {
                Ok(record) => return Ok(record),
                Err(StoreError::DuplicateCode { code }) => {
                    debug!(attempt, code = %code, "Generated code inserted concurrently, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(
            attempts = self.max_attempts,
            code_length = self.generator.code_length(),
            "Short code allocation exhausted"
        );
        Err(AppError::AllocationExhausted {
            attempts: self.max_attempts,
        })
    }

    async fn is_taken(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.repository.find_by_code(code).await?.is_some())
    }
}
