//! HTTP fetcher tests: headers, status handling and scheduled retries

use brewery_atlas::config::FetcherConfig;
use brewery_atlas::crawler::{Fetch, HttpFetcher, Scheduler, BROWSER_USER_AGENT};
use brewery_atlas::FetchError;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> HttpFetcher {
    let config = FetcherConfig {
        timeout_secs: 5,
        ..FetcherConfig::default()
    };
    HttpFetcher::new(&config).unwrap()
}

fn scheduler(max_retries: u32) -> Scheduler {
    Scheduler::new(2, Duration::ZERO).with_retries(max_retries, 0)
}

#[tokio::test]
async fn test_fetch_returns_body_and_sends_browser_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/brewpub/"))
        .and(header("user-agent", BROWSER_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let body = fetcher()
        .fetch(&format!("{}/brewpub/", server.uri()))
        .await
        .unwrap();

    assert_eq!(body, "<html>ok</html>");
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let result = scheduler(3)
        .fetch(&fetcher(), &format!("{}/brewpub/nowhere", server.uri()))
        .await;

    match result {
        Err(FetchError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transient_server_error_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
        .expect(1)
        .mount(&server)
        .await;

    let body = scheduler(2)
        .fetch(&fetcher(), &format!("{}/brewpub/ohio", server.uri()))
        .await
        .unwrap();

    assert_eq!(body, "recovered");
}

#[tokio::test]
async fn test_persistent_server_error_exhausts_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let url = format!("{}/brewpub/ohio", server.uri());
    let error = scheduler(2).fetch(&fetcher(), &url).await.unwrap_err();

    assert!(matches!(error, FetchError::Status { status: 503, .. }));
    assert_eq!(error.url(), url);
}

#[tokio::test]
async fn test_single_fetch_does_not_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let error = fetcher()
        .fetch(&format!("{}/brewpub/ohio", server.uri()))
        .await
        .unwrap_err();

    assert!(error.is_retriable());
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = FetcherConfig {
        timeout_secs: 1,
        ..FetcherConfig::default()
    };
    let error = HttpFetcher::new(&config)
        .unwrap()
        .fetch(&format!("{}/brewpub/", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(error, FetchError::Timeout { .. }));
}
