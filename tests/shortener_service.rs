mod common;

use hashlink::application::services::ShortenerService;
use hashlink::domain::repositories::UrlMappingRepository;
use hashlink::error::AppError;
use hashlink::infrastructure::persistence::InMemoryUrlMappingRepository;
use hashlink::utils::code_generator;
use std::sync::Arc;

fn service() -> (
    Arc<ShortenerService<InMemoryUrlMappingRepository>>,
    Arc<InMemoryUrlMappingRepository>,
) {
    let repository = Arc::new(InMemoryUrlMappingRepository::new());
    let service = Arc::new(ShortenerService::new(repository.clone()));

    (service, repository)
}

#[tokio::test]
async fn test_round_trip() {
    let (service, _repository) = service();

    for url in [
        "google.com",
        "https://example.com/a/b?c=d#e",
        "http://localhost:8080/path",
    ] {
        let code = service.shorten(url).await.unwrap();
        assert_eq!(code.len(), code_generator::SHORT_CODE_LENGTH);

        let resolved = service.resolve(&code).await.unwrap();
        assert_eq!(service.shorten(&resolved).await.unwrap(), code);
    }
}

#[tokio::test]
async fn test_deterministic_across_instances() {
    let (first, _) = service();
    let (second, _) = service();

    let a = first.shorten("https://example.com/page").await.unwrap();
    let b = second.shorten("https://example.com/page").await.unwrap();

    assert_eq!(a, b);
    assert_eq!(
        a,
        code_generator::candidate_at("https://example.com/page", 0)
            .unwrap()
            .short_code
    );
}

#[tokio::test]
async fn test_bounded_conflict_resolution() {
    let (service, repository) = service();
    common::occupy_candidates(&repository, "http://example.com/crowded", 11).await;

    let result = service.shorten("example.com/crowded").await;

    assert!(matches!(result, Err(AppError::ConflictingData { .. })));
    assert_eq!(repository.len(), 11);
}

#[tokio::test]
async fn test_wider_retry_bound_finds_free_candidate() {
    let repository = Arc::new(InMemoryUrlMappingRepository::new());
    let service = ShortenerService::with_max_conflict_retries(repository.clone(), 11);
    common::occupy_candidates(&repository, "http://example.com/crowded", 11).await;

    let code = service.shorten("http://example.com/crowded").await.unwrap();

    let expected = code_generator::candidate_at("http://example.com/crowded", 11).unwrap();
    assert_eq!(code, expected.short_code);
}

#[tokio::test]
async fn test_existing_mapping_survives_squatters() {
    let (service, repository) = service();

    let code = service.shorten("http://example.com/early").await.unwrap();
    common::occupy_candidates(&repository, "http://example.com/early", 11).await;

    assert_eq!(service.shorten("http://example.com/early").await.unwrap(), code);
    assert_eq!(
        service.resolve(&code).await.unwrap(),
        "http://example.com/early"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_shorten_same_url() {
    let (service, repository) = service();
    let mut handles = vec![];

    for _ in 0..16 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service.shorten("https://race.example.com/").await.unwrap()
        }));
    }

    let mut codes = vec![];
    for handle in handles {
        codes.push(handle.await.unwrap());
    }

    assert!(codes.iter().all(|code| code == &codes[0]));
    assert_eq!(repository.len(), 1);
    assert!(
        repository
            .find_by_long_url("https://race.example.com/")
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_shorten_distinct_urls() {
    let (service, repository) = service();
    let mut handles = vec![];

    for i in 0..32 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            let url = format!("https://example.com/{i}");
            let code = service.shorten(&url).await.unwrap();
            (url, code)
        }));
    }

    for handle in handles {
        let (url, code) = handle.await.unwrap();
        assert_eq!(service.resolve(&code).await.unwrap(), url);
    }
    assert_eq!(repository.len(), 32);
}
