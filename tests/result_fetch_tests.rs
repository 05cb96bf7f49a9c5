//! Integration tests for bulk result-file fetching.
//!
//! These tests serve line-delimited result bodies from a local mock
//! server and verify streaming parsing, id formatting, and the
//! download-to-file contract.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopify_bulk::{
    AccessToken, BulkError, BulkOperationsClient, HostUrl, IdFormat, StoreConfig, StoreDomain,
};

/// Creates a client whose requests go to the mock server.
fn client_for(mock_server: &MockServer) -> BulkOperationsClient {
    let config = StoreConfig::builder()
        .store(StoreDomain::new("test-shop").unwrap())
        .access_token(AccessToken::new("shpat_test_token").unwrap())
        .host(HostUrl::new(mock_server.uri()).unwrap())
        .poll_interval(Duration::from_millis(20))
        .build()
        .unwrap();
    BulkOperationsClient::new(&config)
}

/// Mounts `body` as the result file at `/results.jsonl` and returns its
/// full URL.
async fn serve_results(mock_server: &MockServer, body: &str) -> String {
    Mock::given(method("GET"))
        .and(path("/results.jsonl"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(mock_server)
        .await;
    format!("{}/results.jsonl", mock_server.uri())
}

/// Five-line result body: two products, three variants.
const RESULTS: &str = concat!(
    r#"{"id":"gid://shopify/Product/1629753868406"}"#,
    "\n",
    r#"{"id":"gid://shopify/ProductVariant/19047055687798","title":"Default Title","sku":"BOOK-001","__parentId":"gid://shopify/Product/1629753868406"}"#,
    "\n",
    r#"{"id":"gid://shopify/ProductVariant/19047055720566","title":"Hardcover","sku":"BOOK-002","__parentId":"gid://shopify/Product/1629753868406"}"#,
    "\n",
    r#"{"id":"gid://shopify/Product/1629753934989"}"#,
    "\n",
    r#"{"id":"gid://shopify/ProductVariant/19047056015478","title":"Default Title","sku":"BOOK-003","__parentId":"gid://shopify/Product/1629753934989"}"#,
    "\n",
);

// ============================================================================
// In-memory Fetch Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_variants_skips_product_lines() {
    let mock_server = MockServer::start().await;
    let url = serve_results(&mock_server, RESULTS).await;

    let client = client_for(&mock_server);
    let records = client.fetch_variants(&url, IdFormat::Numeric).await.unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].variant_id, "19047055687798");
    assert_eq!(records[0].sku, "BOOK-001");
    assert_eq!(records[0].product_id, "1629753868406");
    assert_eq!(records[1].title, "Hardcover");
    assert_eq!(records[2].product_id, "1629753934989");
}

#[tokio::test]
async fn test_fetch_variants_with_full_gid_format() {
    let mock_server = MockServer::start().await;
    let url = serve_results(&mock_server, RESULTS).await;

    let client = client_for(&mock_server);
    let records = client.fetch_variants(&url, IdFormat::FullGid).await.unwrap();

    assert_eq!(
        records[0].variant_id,
        "gid://shopify/ProductVariant/19047055687798"
    );
    assert_eq!(
        records[0].product_id,
        "gid://shopify/Product/1629753868406"
    );
}

#[tokio::test]
async fn test_refetching_the_same_url_is_idempotent() {
    let mock_server = MockServer::start().await;
    let url = serve_results(&mock_server, RESULTS).await;

    let client = client_for(&mock_server);
    let first = client.fetch_variants(&url, IdFormat::Numeric).await.unwrap();
    let second = client.fetch_variants(&url, IdFormat::Numeric).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_fetch_parses_final_line_without_trailing_newline() {
    let mock_server = MockServer::start().await;
    let url = serve_results(&mock_server, RESULTS.trim_end()).await;

    let client = client_for(&mock_server);
    let records = client.fetch_variants(&url, IdFormat::Numeric).await.unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[2].sku, "BOOK-003");
}

#[tokio::test]
async fn test_fetch_of_empty_body_yields_no_records() {
    let mock_server = MockServer::start().await;
    let url = serve_results(&mock_server, "").await;

    let client = client_for(&mock_server);
    let records = client.fetch_variants(&url, IdFormat::Numeric).await.unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_fetch_variants_rejects_error_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/results.jsonl"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    let url = format!("{}/results.jsonl", mock_server.uri());

    let client = client_for(&mock_server);
    let error = client
        .fetch_variants(&url, IdFormat::Numeric)
        .await
        .unwrap_err();

    match error {
        BulkError::Download { reason } => assert!(reason.contains("404")),
        other => panic!("expected Download, got {other:?}"),
    }
}

#[tokio::test]
async fn test_download_carries_no_store_credentials() {
    let mock_server = MockServer::start().await;
    let url = serve_results(&mock_server, RESULTS).await;

    let client = client_for(&mock_server);
    client.fetch_variants(&url, IdFormat::Numeric).await.unwrap();

    // Result URLs point at third-party storage; the access token must
    // not leak there.
    let requests = mock_server.received_requests().await.unwrap();
    let download = requests
        .iter()
        .find(|request| request.method.to_string() == "GET")
        .unwrap();
    assert!(!download
        .headers
        .keys()
        .any(|name| name.as_str().eq_ignore_ascii_case("x-shopify-access-token")));
}

// ============================================================================
// Download-to-file Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_to_file_writes_and_verifies() {
    let mock_server = MockServer::start().await;
    let url = serve_results(&mock_server, RESULTS).await;
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("variants.jsonl");

    let client = client_for(&mock_server);
    let written = client.fetch_to_file(&url, &target).await.unwrap();

    assert_eq!(written, target);
    let contents = tokio::fs::read_to_string(&target).await.unwrap();
    assert_eq!(contents, RESULTS);
}

#[tokio::test]
async fn test_fetch_to_file_replaces_existing_file() {
    let mock_server = MockServer::start().await;
    let url = serve_results(&mock_server, RESULTS).await;
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("variants.jsonl");
    tokio::fs::write(&target, "stale contents from an earlier run")
        .await
        .unwrap();

    let client = client_for(&mock_server);
    client.fetch_to_file(&url, &target).await.unwrap();

    let contents = tokio::fs::read_to_string(&target).await.unwrap();
    assert_eq!(contents, RESULTS);
}

#[tokio::test]
async fn test_fetch_to_file_removes_stale_file_even_when_download_fails() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/results.jsonl"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;
    let url = format!("{}/results.jsonl", mock_server.uri());
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("variants.jsonl");
    tokio::fs::write(&target, "stale contents").await.unwrap();

    let client = client_for(&mock_server);
    let error = client.fetch_to_file(&url, &target).await.unwrap_err();

    // The stale file is cleared before the download starts, so a failed
    // run never leaves outdated data behind.
    assert!(matches!(error, BulkError::Download { .. }));
    assert!(tokio::fs::metadata(&target).await.is_err());
}
