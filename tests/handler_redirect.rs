mod common;

use serde_json::{Value, json};

#[tokio::test]
async fn test_redirect_success() {
    let (state, _repository) = common::create_test_state();
    let server = common::create_test_server(state);

    let created: Value = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com/target" }))
        .await
        .json();
    let code = created["code"].as_str().unwrap();

    let response = server.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), 307);
    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_trailing_slash() {
    let (state, _repository) = common::create_test_state();
    let server = common::create_test_server(state);

    let created: Value = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "google.com" }))
        .await
        .json();
    let code = created["code"].as_str().unwrap();

    let response = server.get(&format!("/{code}/")).await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "http://google.com/");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _repository) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.get("/abc123").await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_wrong_length() {
    let (state, _repository) = common::create_test_state();
    let server = common::create_test_server(state);

    for code in ["elu39", "balling"] {
        let response = server.get(&format!("/{code}")).await;
        response.assert_status_not_found();
    }
}
