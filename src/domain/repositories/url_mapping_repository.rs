//! Repository trait for URL mapping storage.

use crate::domain::entities::{InsertOutcome, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract consumed by the shortening engine.
///
/// The store owns uniqueness: `short_code` and `long_url` are each unique, and
/// [`insert`](UrlMappingRepository::insert) must check both and write in one
/// atomic step. Of two racing inserts touching the same key, exactly one gets
/// [`InsertOutcome::Inserted`] and the other [`InsertOutcome::Conflict`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryUrlMappingRepository`] - process-local store
/// - [`crate::infrastructure::persistence::PgUrlMappingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlMappingRepository: Send + Sync {
    /// Finds the mapping for a normalized long URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Finds the mapping for an exact short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Atomically inserts a new mapping.
    ///
    /// A uniqueness violation on either column is reported as
    /// `Ok(InsertOutcome::Conflict)`, never as an error and never as an overwrite.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on backend errors.
    async fn insert(&self, short_code: &str, long_url: &str) -> Result<InsertOutcome, AppError>;

    /// Reports whether the backend is reachable.
    async fn health_check(&self) -> bool;
}
