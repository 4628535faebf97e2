//! URL mapping entity representing a stored short code.

use chrono::{DateTime, Utc};

/// A persisted mapping between a short code and a normalized long URL.
///
/// Both `short_code` and `long_url` are unique across the store, and the pair
/// never changes once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(short_code: String, long_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            short_code,
            long_url,
            created_at,
        }
    }
}

/// A short code proposed by the generator, not yet confirmed unique.
///
/// `source_index` is the offset into the URL digest the code was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub short_code: String,
    pub source_index: usize,
}

/// Result of an atomic insert into a mapping store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The pair was stored.
    Inserted(UrlMapping),
    /// Either the short code or the long URL is already taken.
    Conflict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_mapping_creation() {
        let now = Utc::now();
        let mapping = UrlMapping::new(
            "5d4140".to_string(),
            "http://example.com/".to_string(),
            now,
        );

        assert_eq!(mapping.short_code, "5d4140");
        assert_eq!(mapping.long_url, "http://example.com/");
        assert_eq!(mapping.created_at, now);
    }

    #[test]
    fn test_insert_outcome_carries_mapping() {
        let mapping = UrlMapping::new(
            "abcdef".to_string(),
            "http://example.com/".to_string(),
            Utc::now(),
        );

        let outcome = InsertOutcome::Inserted(mapping.clone());
        assert_eq!(outcome, InsertOutcome::Inserted(mapping));
        assert_ne!(outcome, InsertOutcome::Conflict);
    }
}
