//! In-memory implementation of the URL mapping repository.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::domain::entities::{InsertOutcome, UrlMapping};
use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;

#[derive(Debug, Default)]
struct Indexes {
    by_short_code: HashMap<String, UrlMapping>,
    short_code_by_long_url: HashMap<String, String>,
}

/// Process-local repository holding both unique indexes behind one lock.
///
/// `insert` checks and writes both indexes under a single write guard, so
/// racing inserts on the same short code or long URL are serialized and all
/// but one observe [`InsertOutcome::Conflict`].
#[derive(Debug, Default)]
pub struct InMemoryUrlMappingRepository {
    indexes: RwLock<Indexes>,
}

impl InMemoryUrlMappingRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored mappings.
    pub fn len(&self) -> usize {
        self.indexes.read().by_short_code.len()
    }

    /// Returns `true` if nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UrlMappingRepository for InMemoryUrlMappingRepository {
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>, AppError> {
        let indexes = self.indexes.read();

        Ok(indexes
            .short_code_by_long_url
            .get(long_url)
            .and_then(|code| indexes.by_short_code.get(code))
            .cloned())
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        Ok(self.indexes.read().by_short_code.get(short_code).cloned())
    }

    async fn insert(&self, short_code: &str, long_url: &str) -> Result<InsertOutcome, AppError> {
        let mut indexes = self.indexes.write();

        if indexes.by_short_code.contains_key(short_code)
            || indexes.short_code_by_long_url.contains_key(long_url)
        {
            return Ok(InsertOutcome::Conflict);
        }

        let mapping = UrlMapping::new(short_code.to_string(), long_url.to_string(), Utc::now());

        indexes
            .short_code_by_long_url
            .insert(long_url.to_string(), short_code.to_string());
        indexes
            .by_short_code
            .insert(short_code.to_string(), mapping.clone());

        Ok(InsertOutcome::Inserted(mapping))
    }

    async fn health_check(&self) -> bool {
        true
    }
}
