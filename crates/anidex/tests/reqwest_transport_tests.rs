//! End-to-end tests of the queue over a real HTTP transport

use anidex::fetch_queue::{FetchError, FetchQueueConfig, RateLimitedFetchQueue, ReqwestTransport};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_config() -> FetchQueueConfig {
    FetchQueueConfig::default()
        .with_request_spacing(Duration::from_millis(10))
        .with_rate_limit_backoff(Duration::from_millis(20))
        .with_request_timeout(Duration::from_secs(5))
}

fn queue_for(base_url: &str) -> RateLimitedFetchQueue {
    let transport =
        ReqwestTransport::new(base_url, "anidex-tests", Duration::from_secs(2)).unwrap();
    RateLimitedFetchQueue::new(fast_config(), Arc::new(transport))
}

#[tokio::test]
async fn test_payload_passed_through_unmodified() {
    let server = MockServer::start().await;
    let body = json!({ "data": [{ "mal_id": 1 }], "pagination": { "has_next_page": true } });
    Mock::given(method("GET"))
        .and(path("/anime"))
        .and(query_param("order_by", "score"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let queue = queue_for(&server.uri());
    let payload = queue
        .fetch("/anime?order_by=score&sort=desc&page=1")
        .await
        .unwrap();

    assert_eq!(payload, body);
}

#[tokio::test]
async fn test_429_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top/anime"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/top/anime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let queue = queue_for(&server.uri());
    let payload = queue.fetch("/top/anime?page=1").await.unwrap();

    assert_eq!(payload, json!({ "data": [] }));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_persistent_429_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(2)
        .mount(&server)
        .await;

    let queue = queue_for(&server.uri());
    let err = queue.fetch("/top/anime?page=1").await.unwrap_err();

    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn test_server_error_and_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let queue = queue_for(&server.uri());
    let broken = queue.enqueue("/broken");
    let html = queue.enqueue("/html");

    assert!(matches!(
        broken.await,
        Err(FetchError::HttpStatus { status: 503, .. })
    ));
    assert!(html.await.unwrap_err().is_malformed());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Port 1 is reserved and nothing listens there
    let queue = queue_for("http://127.0.0.1:1");
    let err = queue.fetch("/anime").await.unwrap_err();

    assert!(matches!(err, FetchError::Transport { .. }));
    assert!(err.is_transport());
}
