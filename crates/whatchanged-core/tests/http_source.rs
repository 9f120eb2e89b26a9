//! Integration tests for the HTTP source and the manifest resolver.
//!
//! These tests use wiremock to serve a fake release server. The blocking
//! client runs on a blocking task so it never touches the async runtime.

use std::sync::Arc;

use whatchanged_core::{
    CatalogResolver, ChangeContent, ChangeSelector, CoreError, FetchError, HttpSource,
    ManifestResolver, RangeAggregator, TextSource, Version,
};
use whatchanged_links::{Linkifier, PlainFormatter};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn fetch(url: String) -> Result<String, FetchError> {
    tokio::task::spawn_blocking(move || HttpSource::default().fetch(&url))
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sources/foo/1.0/foo-1.0.news"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Version 1.0\n"))
        .mount(&server)
        .await;

    let body = fetch(format!("{}/sources/foo/1.0/foo-1.0.news", server.uri()))
        .await
        .unwrap();
    assert_eq!(body, "Version 1.0\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_not_found() {
    let server = MockServer::start().await;

    let result = fetch(format!("{}/sources/foo/cache.json", server.uri())).await;
    match result {
        Err(FetchError::Status { status, .. }) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_defaults_to_utf8() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("Übersetzungen aktualisiert “de”".as_bytes().to_vec(), "text/plain"),
        )
        .mount(&server)
        .await;

    let body = fetch(format!("{}/notes", server.uri())).await.unwrap();
    assert_eq!(body, "Übersetzungen aktualisiert “de”");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_manifest_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sources/foo/cache.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            4,
            {"foo": {
                "1.0": {"news": "1.0/foo-1.0.news"},
                "1.1": {"news": "1.1/foo-1.1.news"},
                "1.2": {"tar.xz": "1.2/foo-1.2.tar.xz"}
            }},
            {"foo": ["1.2", "1.0", "1.1"]},
            {}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sources/foo/1.1/foo-1.1.news"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Fixed #12"))
        .mount(&server)
        .await;

    let sources_url = format!("{}/sources", server.uri());
    let rendered = tokio::task::spawn_blocking(move || {
        let source: Arc<dyn TextSource> = Arc::new(HttpSource::default());
        let aggregator = RangeAggregator::new(
            Box::new(ManifestResolver::new(Arc::clone(&source), sources_url.clone())),
            ChangeSelector::new(source, sources_url),
            Linkifier::default(),
        );
        let start = Version::parse("1.0").unwrap();
        let end = Version::parse("1.2").unwrap();
        aggregator
            .changes_in_range("foo", &start, &end, &PlainFormatter)
            .unwrap()
            .collect::<Vec<_>>()
    })
    .await
    .unwrap();

    assert_eq!(rendered.len(), 2);
    assert_eq!(rendered[0].version.as_str(), "1.1");
    assert_eq!(rendered[0].content, ChangeContent::Document("Fixed #12".to_string()));
    assert_eq!(rendered[1].content, ChangeContent::NoDocument);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_manifest_server_error_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sources/foo/cache.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let sources_url = format!("{}/sources", server.uri());
    let result = tokio::task::spawn_blocking(move || {
        ManifestResolver::new(Arc::new(HttpSource::default()), sources_url).fetch("foo")
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(CoreError::ManifestFetch { .. })));
}
