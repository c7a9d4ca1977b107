//! Integration tests for `SearchClient::fetch_search_page`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. Covers the happy path, query encoding, and the
//! status-code error taxonomy including retry behavior.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use snapprice_scraper::{ScraperError, SearchClient};

/// Builds a `SearchClient` against the mock server: 5-second timeout, no retries.
fn test_client(server: &MockServer) -> SearchClient {
    SearchClient::new(&server.uri(), 5, "snapprice-test/0.1", 0, 0)
        .expect("failed to build test SearchClient")
}

/// Builds a `SearchClient` with retries enabled and zero backoff delay.
fn test_client_with_retries(server: &MockServer, max_retries: u32) -> SearchClient {
    SearchClient::new(&server.uri(), 5, "snapprice-test/0.1", max_retries, 0)
        .expect("failed to build test SearchClient")
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_search_page_returns_body_on_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "acme"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let body = client
        .fetch_search_page("acme", 1)
        .await
        .expect("fetch should succeed");

    assert_eq!(body, "<html>ok</html>");
}

#[tokio::test]
async fn fetch_search_page_url_encodes_the_brand() {
    let server = MockServer::start().await;

    // wiremock matches against the decoded query value, so a match here
    // proves the client encoded the space on the wire.
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "two words"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client
        .fetch_search_page("two words", 2)
        .await
        .expect("fetch should succeed");
}

// ---------------------------------------------------------------------------
// Status-code taxonomy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_is_typed_and_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with_retries(&server, 3);
    let result = client.fetch_search_page("acme", 1).await;

    assert!(matches!(result, Err(ScraperError::NotFound { .. })));
}

#[tokio::test]
async fn forbidden_is_unexpected_status_and_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with_retries(&server, 3);
    let result = client.fetch_search_page("acme", 1).await;

    assert!(
        matches!(result, Err(ScraperError::UnexpectedStatus { status: 403, .. })),
        "expected UnexpectedStatus(403), got: {result:?}"
    );
}

#[tokio::test]
async fn rate_limited_reads_retry_after_and_retries_until_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        // max_retries=2 → 3 total attempts
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client_with_retries(&server, 2);
    let result = client.fetch_search_page("acme", 1).await;

    assert!(
        matches!(
            result,
            Err(ScraperError::RateLimited {
                retry_after_secs: 7
            })
        ),
        "expected RateLimited(7), got: {result:?}"
    );
}

#[tokio::test]
async fn server_error_is_retried_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>recovered</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with_retries(&server, 3);
    let body = client
        .fetch_search_page("acme", 1)
        .await
        .expect("fetch should recover after transient 5xx");

    assert_eq!(body, "<html>recovered</html>");
}
