//! Handler for link shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates (or returns the existing) short URL for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "longUrl": "google.com" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "longUrl": "google.com",
///   "shortUrl": "http://localhost:3000/6ab016",
///   "code": "6ab016"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if `longUrl` is missing or not a usable URL
/// - 409 Conflict if no free short code could be found
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let long_url = payload.long_url.unwrap_or_default();
    let code = state.shortener.shorten(&long_url).await?;

    Ok(Json(ShortenResponse {
        long_url,
        short_url: state.short_url(&code),
        code,
    }))
}
