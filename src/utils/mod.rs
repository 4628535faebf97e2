//! Pure helpers used by the shortening engine.
//!
//! - [`code_generator`] - Deterministic short code candidates
//! - [`url_normalizer`] - URL validation and canonicalization

pub mod code_generator;
pub mod url_normalizer;
