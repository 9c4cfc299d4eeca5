//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: impl Into<String>) -> ClientConfig {
    ClientConfig::builder()
        .base_url(base_url)
        .token("test-token")
        .build()
}

#[test]
fn test_client_config_default() {
    let config = ClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.token.is_none());
    assert!(config.user_agent.starts_with("canvas-kit/"));
}

#[test]
fn test_client_config_builder() {
    let config = ClientConfig::builder()
        .base_url("https://canvas.example.edu")
        .token("secret")
        .timeout(Duration::from_secs(60))
        .header("Accept", "application/vnd.github+json")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(
        config.base_url,
        Some("https://canvas.example.edu".to_string())
    );
    assert_eq!(config.token, Some("secret".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers,
        vec![(
            "Accept".to_string(),
            "application/vnd.github+json".to_string()
        )]
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_missing_base_url_is_rejected() {
    let config = ClientConfig::builder().token("secret").build();
    let err = HttpClient::new(config).unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { ref field } if field == "base_url"));
}

#[test]
fn test_missing_token_is_rejected() {
    let config = ClientConfig::builder()
        .base_url("https://canvas.example.edu")
        .build();
    let err = HttpClient::new(config).unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { ref field } if field == "token"));
}

#[test]
fn test_empty_strings_are_rejected() {
    // No implicit empty-string fallback
    let config = ClientConfig::builder().base_url("").token("secret").build();
    assert!(HttpClient::new(config).is_err());

    let config = ClientConfig::builder()
        .base_url("https://canvas.example.edu")
        .token("")
        .build();
    assert!(HttpClient::new(config).is_err());
}

#[tokio::test]
async fn test_get_sends_auth_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/1/profile"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(test_config(mock_server.uri())).unwrap();
    let response = client.get("/api/v1/users/1/profile", &[]).await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_get_repeated_query_keys() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/things"))
        .and(query_param("include[]", "user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(test_config(mock_server.uri())).unwrap();
    let query = vec![
        ("include[]".to_string(), "user".to_string()),
        ("include[]".to_string(), "course".to_string()),
    ];
    let response = client.get("/api/v1/things", &query).await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_post_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/graphql"))
        .and(body_json(json!({"query": "{ me }", "variables": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(test_config(mock_server.uri())).unwrap();
    let body = json!({"query": "{ me }", "variables": null});
    let response = client.post("/api/graphql", &body, &[]).await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_put_and_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/things/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"updated": true})))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/things/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": true})))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(test_config(mock_server.uri())).unwrap();

    let body: serde_json::Value = client
        .put_json("/api/v1/things/1", &json!({"x": 1}), &[])
        .await
        .unwrap();
    assert_eq!(body["updated"], true);

    let response = client.delete("/api/v1/things/1", &[]).await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_non_2xx_raises_with_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(test_config(mock_server.uri())).unwrap();
    let err = client.get("/api/v1/missing", &[]).await.unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "Not found");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    // One request only; a retry would trip the expect(1)
    Mock::given(method("GET"))
        .and(path("/api/v1/flaky"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(test_config(mock_server.uri())).unwrap();
    let err = client.get("/api/v1/flaky", &[]).await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_follows_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/old"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", "/api/v1/new".to_string()),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"moved": true})))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new(test_config(mock_server.uri())).unwrap();
    let body: serde_json::Value = client.get_json("/api/v1/old", &[]).await.unwrap();

    assert_eq!(body["moved"], true);
}

#[tokio::test]
async fn test_absolute_url_bypasses_base() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    // Base URL points nowhere useful; the absolute URL wins
    let client = HttpClient::new(test_config("https://unused.example.edu")).unwrap();
    let response = client
        .get(&format!("{}/elsewhere", mock_server.uri()), &[])
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[test]
fn test_debug_hides_token() {
    let client = HttpClient::new(test_config("https://canvas.example.edu")).unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(!debug_str.contains("test-token"));
}
