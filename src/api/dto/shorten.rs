//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
///
/// `longUrl` is optional at the JSON level so that a missing or `null`
/// value is reported as a validation error (400) instead of a body
/// rejection. The length check here bounds the raw input; the stored form
/// is bounded again after normalization.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[validate(
        required(message = "longUrl is required"),
        length(max = 2048, message = "longUrl must be at most 2048 characters")
    )]
    pub long_url: Option<String>,
}

/// Short code created (or found) for the submitted URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    /// The URL exactly as submitted.
    pub long_url: String,
    pub short_url: String,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_long_url_fails_validation() {
        let request: ShortenRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_err());

        let request: ShortenRequest = serde_json::from_str(r#"{"longUrl": null}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_overlong_url_fails_validation() {
        let request = ShortenRequest {
            long_url: Some(format!("http://example.com/{}", "a".repeat(2048))),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_response_uses_camel_case() {
        let response = ShortenResponse {
            long_url: "google.com".to_string(),
            short_url: "http://localhost:3000/abc123".to_string(),
            code: "abc123".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["longUrl"], "google.com");
        assert_eq!(json["shortUrl"], "http://localhost:3000/abc123");
        assert_eq!(json["code"], "abc123");
    }
}
