//! Short code creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::InsertOutcome;
use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;
use crate::utils::code_generator::{self, MAX_SOURCE_INDEX, SHORT_CODE_LENGTH};
use crate::utils::url_normalizer::normalize_url;
use serde_json::json;
use tracing::{debug, error, info};

/// Extra candidates tried after the first one collides.
pub const DEFAULT_MAX_CONFLICT_RETRIES: usize = 10;

/// Largest retry bound that still stays inside one digest.
pub const MAX_CONFLICT_RETRIES_LIMIT: usize = MAX_SOURCE_INDEX;

/// Service for turning long URLs into deterministic short codes and back.
///
/// The service holds no mutable state; uniqueness is delegated to the
/// repository's atomic insert, and every race or collision is settled by
/// re-reading the store and moving to the next candidate.
pub struct ShortenerService<R: UrlMappingRepository + ?Sized> {
    repository: Arc<R>,
    max_conflict_retries: usize,
}

impl<R: UrlMappingRepository + ?Sized> ShortenerService<R> {
    /// Creates a service with the default retry bound.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_max_conflict_retries(repository, DEFAULT_MAX_CONFLICT_RETRIES)
    }

    /// Creates a service that tries at most `1 + max_conflict_retries` candidates.
    ///
    /// Values above [`MAX_CONFLICT_RETRIES_LIMIT`] are clamped, since a digest
    /// has no further candidates to offer.
    pub fn with_max_conflict_retries(repository: Arc<R>, max_conflict_retries: usize) -> Self {
        Self {
            repository,
            max_conflict_retries: max_conflict_retries.min(MAX_CONFLICT_RETRIES_LIMIT),
        }
    }

    /// Returns the configured retry bound.
    pub fn max_conflict_retries(&self) -> usize {
        self.max_conflict_retries
    }

    /// Returns the short code for a long URL, creating the mapping if needed.
    ///
    /// Repeated calls with equivalent URLs return the same code. An existing
    /// mapping is always returned before any write is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the URL cannot be normalized.
    /// Returns [`AppError::ConflictingData`] if every allowed candidate is
    /// held by a different URL.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn shorten(&self, long_url: &str) -> Result<String, AppError> {
        let normalized_url = normalize_url(long_url).map_err(|e| {
            info!(reason = %e, "Rejected malformed URL");
            AppError::invalid_input("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        if let Some(existing) = self.repository.find_by_long_url(&normalized_url).await? {
            info!(
                long_url = %normalized_url,
                short_code = %existing.short_code,
                "Found existing mapping"
            );
            return Ok(existing.short_code);
        }

        let attempts = self.max_conflict_retries + 1;

        for candidate in code_generator::candidates(&normalized_url).take(attempts) {
            match self
                .repository
                .insert(&candidate.short_code, &normalized_url)
                .await?
            {
                InsertOutcome::Inserted(mapping) => {
                    info!(
                        long_url = %normalized_url,
                        short_code = %mapping.short_code,
                        source_index = candidate.source_index,
                        "Created mapping"
                    );
                    return Ok(mapping.short_code);
                }
                InsertOutcome::Conflict => {
                    debug!(
                        long_url = %normalized_url,
                        short_code = %candidate.short_code,
                        source_index = candidate.source_index,
                        "Insert conflicted"
                    );

                    if let Some(existing) =
                        self.repository.find_by_long_url(&normalized_url).await?
                    {
                        info!(
                            long_url = %normalized_url,
                            short_code = %existing.short_code,
                            "Concurrent writer stored the same URL"
                        );
                        return Ok(existing.short_code);
                    }
                }
            }
        }

        error!(
            long_url = %normalized_url,
            attempts,
            "Unable to find a free short code"
        );

        Err(AppError::conflicting_data(
            "Unable to create a unique short code",
            json!({ "long_url": normalized_url, "attempts": attempts }),
        ))
    }

    /// Returns the long URL stored for a short code.
    ///
    /// Codes of the wrong length are rejected without querying the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping exists.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        if short_code.chars().count() != SHORT_CODE_LENGTH {
            info!(short_code, "Rejected short code with wrong length");
            return Err(not_found(short_code));
        }

        self.repository
            .find_by_short_code(short_code)
            .await?
            .map(|mapping| mapping.long_url)
            .ok_or_else(|| {
                info!(short_code, "Short code not found");
                not_found(short_code)
            })
    }

    /// Reports whether the underlying store is reachable.
    pub async fn storage_healthy(&self) -> bool {
        self.repository.health_check().await
    }
}

fn not_found(short_code: &str) -> AppError {
    AppError::not_found("Short code not found", json!({ "code": short_code }))
}
