//! Repository implementations.
//!
//! - [`InMemoryUrlMappingRepository`] - Process-local store for development and tests
//! - [`PgUrlMappingRepository`] - PostgreSQL store backed by SQLx

pub mod memory_url_mapping_repository;
pub mod pg_url_mapping_repository;

pub use memory_url_mapping_repository::InMemoryUrlMappingRepository;
pub use pg_url_mapping_repository::PgUrlMappingRepository;
