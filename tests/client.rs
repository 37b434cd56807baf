//! HTTP-level tests for the search client, against a local mock server.

use gpse::{SearchClient, SearchError, SearchOptions};
use serde_json::json;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> SearchClient {
    SearchClient::new("test-key", "test-engine")
        .unwrap()
        .with_base_url(format!("{}/customsearch/v1", server.uri()))
}

fn items_body() -> serde_json::Value {
    json!({
        "kind": "customsearch#search",
        "items": [
            {
                "title": "The Rust Programming Language",
                "link": "https://www.rust-lang.org/",
                "snippet": "A language empowering everyone to build reliable software."
            },
            {
                "title": "Rust (programming language) - Wikipedia",
                "link": "https://en.wikipedia.org/wiki/Rust_(programming_language)",
                "snippet": "Rust is a general-purpose programming\nlanguage."
            },
            {
                "title": "crates.io: Rust Package Registry",
                "link": "https://crates.io/",
                "snippet": "The Rust community's crate registry."
            }
        ]
    })
}

#[tokio::test]
async fn returns_results_in_payload_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("key", "test-key"))
        .and(query_param("cx", "test-engine"))
        .and(query_param("q", "rust"))
        .and(query_param("num", "10"))
        .and(query_param("start", "1"))
        .and(query_param("safe", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items_body()))
        .expect(1)
        .mount(&server)
        .await;

    let results = test_client(&server)
        .search("rust", &SearchOptions::default())
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].title, "The Rust Programming Language");
    assert_eq!(results[1].link, "https://en.wikipedia.org/wiki/Rust_(programming_language)");
    assert_eq!(results[2].title, "crates.io: Rust Package Registry");
    // Newlines inside snippets are flattened.
    assert_eq!(results[1].snippet, "Rust is a general-purpose programminglanguage.");
}

#[tokio::test]
async fn empty_items_array_yields_empty_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let results = test_client(&server)
        .search("no hits for this", &SearchOptions::default())
        .await
        .unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn out_of_range_result_count_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let err = test_client(&server)
        .search("rust", &SearchOptions::new().with_result_count(11))
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Configuration(_)));
}

#[tokio::test]
async fn blank_query_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let client = test_client(&server);
    for query in ["", "   ", "\n\t"] {
        let err = client.search(query, &SearchOptions::default()).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery));
    }
}

#[tokio::test]
async fn http_429_maps_to_quota_exceeded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .search("rust", &SearchOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_quota_exceeded());
    // Quota exhaustion is still an API failure, so a single generic arm
    // catches it too.
    assert!(err.is_api_failure());
}

#[tokio::test]
async fn resource_exhausted_body_maps_to_quota_exceeded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 429,
                "message": "Quota exceeded for quota metric 'Queries'",
                "status": "RESOURCE_EXHAUSTED"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .search("rust", &SearchOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_quota_exceeded());
}

#[tokio::test]
async fn other_http_errors_carry_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .search("rust", &SearchOptions::default())
        .await
        .unwrap_err();

    match err {
        SearchError::Api { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_items_key_is_an_unexpected_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "customsearch#search",
            "searchInformation": {"totalResults": "0"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .search("rust", &SearchOptions::default())
        .await
        .unwrap_err();

    match &err {
        SearchError::UnexpectedPayload { body } => {
            assert!(body.contains("customsearch#search"));
        }
        other => panic!("expected UnexpectedPayload, got {other:?}"),
    }
    assert!(err.response_body().is_some());
}

#[tokio::test]
async fn image_search_sets_search_type_and_keeps_optional_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("searchType", "image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "title": "Ferris the crab",
                    "link": "https://rustacean.net/assets/rustacean-flat-happy.png",
                    "snippet": "The unofficial mascot.",
                    "image": {
                        "thumbnailLink": "https://example.com/thumb1.png",
                        "width": 1200,
                        "height": 800
                    }
                },
                {
                    "title": "A crab without metadata",
                    "link": "https://example.com/crab.png",
                    "snippet": "No image object on this one."
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = test_client(&server)
        .image_search("ferris", &SearchOptions::default())
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    let image = results[0].image.as_ref().expect("first item has metadata");
    assert_eq!(image.url, "https://example.com/thumb1.png");
    assert_eq!(image.width, 1200);
    assert_eq!(image.height, 800);
    assert!(results[1].image.is_none());
}
