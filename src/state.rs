//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::ShortenerService;
use crate::domain::repositories::UrlMappingRepository;

/// Service handle type shared by the server and the admin CLI.
pub type DynShortenerService = ShortenerService<dyn UrlMappingRepository>;

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<DynShortenerService>,
    pub base_url: String,
}

impl AppState {
    pub fn new(shortener: Arc<DynShortenerService>, base_url: impl Into<String>) -> Self {
        Self {
            shortener,
            base_url: base_url.into(),
        }
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryUrlMappingRepository;

    fn state_with_base(base_url: &str) -> AppState {
        let repository: Arc<dyn UrlMappingRepository> =
            Arc::new(InMemoryUrlMappingRepository::new());
        AppState::new(Arc::new(ShortenerService::new(repository)), base_url)
    }

    #[test]
    fn test_short_url() {
        let state = state_with_base("http://localhost:3000");
        assert_eq!(state.short_url("abc123"), "http://localhost:3000/abc123");
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let state = state_with_base("https://s.example.com/");
        assert_eq!(state.short_url("abc123"), "https://s.example.com/abc123");
    }
}
