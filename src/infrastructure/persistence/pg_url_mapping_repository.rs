//! PostgreSQL implementation of the URL mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::{InsertOutcome, UrlMapping};
use crate::domain::repositories::UrlMappingRepository;
use crate::error::{AppError, map_sqlx_error};

/// PostgreSQL repository for URL mappings.
///
/// Uniqueness of `short_code` and `long_url` is enforced by table constraints
/// (see `migrations/`), so an insert is a single statement and a unique
/// violation on either column is reported as [`InsertOutcome::Conflict`].
pub struct PgUrlMappingRepository {
    pool: Arc<PgPool>,
}

impl PgUrlMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

fn mapping_from_row(row: PgRow) -> Result<UrlMapping, AppError> {
    let short_code: String = row.try_get("short_code")?;
    let long_url: String = row.try_get("long_url")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(UrlMapping::new(short_code, long_url, created_at))
}

#[async_trait]
impl UrlMappingRepository for PgUrlMappingRepository {
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT short_code, long_url, created_at
            FROM url_mappings
            WHERE long_url = $1
            "#,
        )
        .bind(long_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(mapping_from_row).transpose()
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT short_code, long_url, created_at
            FROM url_mappings
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(mapping_from_row).transpose()
    }

    async fn insert(&self, short_code: &str, long_url: &str) -> Result<InsertOutcome, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO url_mappings (short_code, long_url)
            VALUES ($1, $2)
            RETURNING short_code, long_url, created_at
            "#,
        )
        .bind(short_code)
        .bind(long_url)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(InsertOutcome::Inserted(mapping_from_row(row)?)),
            Err(e) if is_unique_violation(&e) => Ok(InsertOutcome::Conflict),
            Err(e) => Err(map_sqlx_error(e)),
        }
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
