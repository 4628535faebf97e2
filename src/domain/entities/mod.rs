//! Core domain entities.
//!
//! - [`UrlMapping`] - A persisted short code to long URL mapping
//! - [`Candidate`] - A proposed short code for one attempt
//! - [`InsertOutcome`] - Tagged result of an atomic insert

pub mod url_mapping;

pub use url_mapping::{Candidate, InsertOutcome, UrlMapping};
