#![allow(dead_code)]

use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use hashlink::application::services::ShortenerService;
use hashlink::domain::repositories::UrlMappingRepository;
use hashlink::infrastructure::persistence::InMemoryUrlMappingRepository;
use hashlink::routes::app_router;
use hashlink::state::AppState;
use hashlink::utils::code_generator;
use std::sync::Arc;

pub const BASE_URL: &str = "http://short.test";

pub fn create_test_state() -> (AppState, Arc<InMemoryUrlMappingRepository>) {
    let repository = Arc::new(InMemoryUrlMappingRepository::new());
    let state = create_state_with_repository(repository.clone());

    (state, repository)
}

pub fn create_state_with_repository(repository: Arc<dyn UrlMappingRepository>) -> AppState {
    let service = Arc::new(ShortenerService::new(repository));

    AppState::new(service, BASE_URL)
}

pub fn create_test_server(state: AppState) -> TestServer {
    let app = app_router(state);

    TestServer::new(ServiceExt::<Request>::into_make_service(app)).unwrap()
}

/// Occupies the first `count` candidates of `normalized_url` with unrelated URLs.
pub async fn occupy_candidates(
    repository: &InMemoryUrlMappingRepository,
    normalized_url: &str,
    count: usize,
) {
    for candidate in code_generator::candidates(normalized_url).take(count) {
        let squatter = format!("http://squatter-{}.test/", candidate.source_index);
        repository
            .insert(&candidate.short_code, &squatter)
            .await
            .unwrap();
    }
}
