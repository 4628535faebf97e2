//! Deterministic short code derivation.
//!
//! A normalized URL is hashed with MD5 and rendered as 32 lowercase hex
//! characters. The candidate for attempt `i` is the 6-character window of the
//! digest starting at offset `i`, so every URL owns a fixed, repeatable
//! sequence of candidates.

use crate::domain::entities::Candidate;
use md5::{Digest, Md5};

/// Length of every short code.
pub const SHORT_CODE_LENGTH: usize = 6;

/// Highest digest offset a candidate may start at.
pub const MAX_SOURCE_INDEX: usize = 25;

/// Number of distinct candidates a single digest yields.
pub const MAX_CANDIDATES: usize = MAX_SOURCE_INDEX + 1;

/// Returns the lowercase hex MD5 digest of the URL's UTF-8 bytes.
pub fn digest_hex(normalized_url: &str) -> String {
    hex::encode(Md5::digest(normalized_url.as_bytes()))
}

/// Returns the candidate at `source_index`, or `None` past the last offset.
///
/// # Examples
///
/// ```ignore
/// let first = candidate_at("hello", 0).unwrap();
/// assert_eq!(first.short_code, "5d4140");
/// ```
pub fn candidate_at(normalized_url: &str, source_index: usize) -> Option<Candidate> {
    window(&digest_hex(normalized_url), source_index)
}

/// Returns the ordered candidate sequence for a normalized URL.
///
/// The digest is computed once; the iterator yields at most
/// [`MAX_CANDIDATES`] items.
pub fn candidates(normalized_url: &str) -> Candidates {
    Candidates {
        digest: digest_hex(normalized_url),
        next_index: 0,
    }
}

/// Iterator over the candidates derived from one digest.
#[derive(Debug, Clone)]
pub struct Candidates {
    digest: String,
    next_index: usize,
}

impl Iterator for Candidates {
    type Item = Candidate;

    fn next(&mut self) -> Option<Self::Item> {
        let candidate = window(&self.digest, self.next_index)?;
        self.next_index += 1;
        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = MAX_CANDIDATES.saturating_sub(self.next_index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Candidates {}

fn window(digest: &str, source_index: usize) -> Option<Candidate> {
    if source_index > MAX_SOURCE_INDEX {
        return None;
    }

    let short_code = digest.get(source_index..source_index + SHORT_CODE_LENGTH)?;

    Some(Candidate {
        short_code: short_code.to_string(),
        source_index,
    })
}
