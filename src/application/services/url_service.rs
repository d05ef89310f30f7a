//! URL management operations exposed to the HTTP and CLI layers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::application::services::{AliasRegistry, ResolutionService};
use crate::domain::entities::{UrlAnalytics, UrlPatch, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_validator::ensure_valid_destination;

/// Service for creating, resolving and managing shortened URLs.
///
/// Redirect resolution and info lookups are separate operations: only
/// [`Self::resolve_for_redirect`] counts a click.
pub struct UrlService<R: UrlRepository + ?Sized, G: CodeGenerator + ?Sized> {
    repository: Arc<R>,
    registry: AliasRegistry<R, G>,
    resolver: ResolutionService<R>,
}

impl<R: UrlRepository + ?Sized, G: CodeGenerator + ?Sized> UrlService<R, G> {
    /// Creates a new URL service.
    ///
    /// `max_attempts` bounds the number of generated candidates tried per
    /// create before failing with [`AppError::AllocationExhausted`].
    pub fn new(repository: Arc<R>, generator: Arc<G>, max_attempts: usize) -> Self {
        Self {
            registry: AliasRegistry::new(repository.clone(), generator, max_attempts),
            resolver: ResolutionService::new(repository.clone()),
            repository,
        }
    }

    /// Creates a short URL.
    ///
    /// An empty `custom_alias` is treated as absent and a code is generated.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrlFormat`] if the destination is not http(s)
    /// - [`AppError::Validation`] if the custom alias is malformed
    /// - [`AppError::AliasTaken`] if the custom alias is already a short code
    /// - [`AppError::AllocationExhausted`] if no free code was found
    pub async fn create(
        &self,
        original_url: String,
        custom_alias: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<UrlRecord, AppError> {
        ensure_valid_destination(&original_url)?;

        // A blank alias field means "generate one".
        let custom_alias = custom_alias.filter(|alias| !alias.is_empty());

        let record = self
            .registry
            .register(original_url, custom_alias, expires_at)
            .await?;

        info!(
            code = %record.short_code,
            custom = record.custom_alias.is_some(),
            expires_at = ?record.expires_at,
            "Short URL created"
        );

        Ok(record)
    }

    /// Resolves a code for redirection, counting one click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown or expired.
    pub async fn resolve_for_redirect(&self, code: &str) -> Result<UrlRecord, AppError> {
        self.resolver
            .resolve_for_redirect(code)
            .await?
            .into_record(code)
    }

    /// Returns the record behind a live code without counting a click.
    pub async fn get_info(&self, code: &str) -> Result<UrlRecord, AppError> {
        self.resolver.resolve(code).await?.into_record(code)
    }

    /// Returns usage figures for a live code without counting a click.
    pub async fn get_analytics(&self, code: &str) -> Result<UrlAnalytics, AppError> {
        self.get_info(code).await.map(UrlAnalytics::from)
    }

    /// Lists records in creation order, expired ones included.
    pub async fn list(&self, skip: i64, limit: i64) -> Result<Vec<UrlRecord>, AppError> {
        Ok(self.repository.list(skip, limit).await?)
    }

    /// Replaces the destination and, when given, the expiry of a record.
    ///
    /// Clicks are left untouched. A `None` expiry keeps the current one.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no record has this code (checked first)
    /// - [`AppError::InvalidUrlFormat`] if the new destination is not http(s)
    pub async fn update(
        &self,
        code: &str,
        new_original_url: String,
        new_expires_at: Option<DateTime<Utc>>,
    ) -> Result<UrlRecord, AppError> {
        if self.repository.find_by_code(code).await?.is_none() {
            return Err(AppError::not_found(code));
        }

        ensure_valid_destination(&new_original_url)?;

        let patch = UrlPatch {
            original_url: new_original_url,
            expires_at: new_expires_at,
        };

        let record = self
            .repository
            .update(code, patch)
            .await?
            .ok_or_else(|| AppError::not_found(code))?;

        info!(code, "Short URL updated");
        Ok(record)
    }

    /// Permanently deletes a record. Returns `false` if it did not exist.
    pub async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let deleted = self.repository.delete_by_code(code).await?;
        if deleted {
            info!(code, "Short URL deleted");
        }
        Ok(deleted)
    }

    /// Total number of stored records.
    pub async fn count(&self) -> Result<i64, AppError> {
        Ok(self.repository.count().await?)
    }
}
