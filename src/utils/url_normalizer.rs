//! URL validation and canonicalization.
//!
//! Produces the canonical absolute form used both as the storage key and as
//! the input to short code derivation.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use url::Url;

/// Matches a leading RFC 3986 scheme.
///
/// A colon followed by a digit is a port (`localhost:8080`), not a scheme.
static SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:(?:[^0-9]|$)").unwrap());

/// Scheme assumed when the input carries none.
const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// Longest normalized URL accepted, in bytes.
///
/// Percent-encoding can grow the input several times over, so the limit is
/// applied to the canonical form that gets stored and indexed.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlNormalizationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL contains illegal character {0:?}")]
    IllegalCharacter(char),

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL must contain a host")]
    MissingHost,

    #[error("Normalized URL is {0} bytes long, the limit is {MAX_URL_LENGTH}")]
    TooLong(usize),
}

/// Normalizes a URL to its canonical absolute form.
///
/// # Normalization Rules
///
/// 1. **Empty input**: Rejected (including whitespace-only input)
/// 2. **Characters**: Anything RFC 3986 never allows in a URI (controls, space,
///    quotes, angle brackets, braces, pipe, backslash, caret, backtick) is
///    rejected rather than escaped
/// 3. **Scheme**: `http://` is prepended only when the input has no scheme;
///    `host:port` counts as schemeless
/// 4. **Host**: Required, so host-less URIs such as `mailto:` are rejected
/// 5. **Output**: The parser's serialization (lowercase scheme and host,
///    `/` for an empty path, default port dropped), at most
///    [`MAX_URL_LENGTH`] bytes
///
/// The scheme and any `www.` prefix are kept, so `https://example.com`,
/// `http://example.com` and `http://www.example.com` stay distinct.
///
/// # Errors
///
/// Returns a [`UrlNormalizationError`] describing the first rule violated.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("google.com").unwrap(), "http://google.com/");
/// assert_eq!(normalize_url("http://google.com").unwrap(), "http://google.com/");
/// assert_eq!(normalize_url("https://google.com").unwrap(), "https://google.com/");
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    if input.trim().is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    if let Some(c) = input.chars().find(|c| is_excluded(*c)) {
        return Err(UrlNormalizationError::IllegalCharacter(c));
    }

    let absolute = if SCHEME_REGEX.is_match(input) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(format!("{DEFAULT_SCHEME_PREFIX}{input}"))
    };

    let url =
        Url::parse(&absolute).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlNormalizationError::MissingHost),
    }

    let normalized = url.to_string();
    if normalized.len() > MAX_URL_LENGTH {
        return Err(UrlNormalizationError::TooLong(normalized.len()));
    }

    Ok(normalized)
}

fn is_excluded(c: char) -> bool {
    c.is_ascii_control()
        || matches!(
            c,
            ' ' | '"' | '<' | '>' | '\\' | '^' | '`' | '{' | '|' | '}'
        )
}
