//! Integration tests for feed pagination: initial load, load-more, refresh.
//!
//! Each test runs against its own wiremock server standing in for the post
//! service, exercising the loader's page cursor and single-flight guard
//! across composed operations.

use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kisan::feed::{FeedLoader, LoadOutcome};

fn posts_body(ids: std::ops::Range<i64>) -> String {
    let posts: Vec<String> = ids
        .map(|id| {
            format!(
                r#"{{"userId": 1, "id": {id}, "title": "Post {id}", "body": "Body {id}"}}"#
            )
        })
        .collect();
    format!("[{}]", posts.join(","))
}

fn loader(server_uri: &str, page_size: u32) -> FeedLoader {
    FeedLoader::new(reqwest::Client::new(), server_uri, server_uri, page_size)
}

fn mock_page(page: &str, body: String) -> Mock {
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("_limit", "10"))
        .and(query_param("_page", page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
}

// ============================================================================
// Cursor Progression
// ============================================================================

#[tokio::test]
async fn test_three_pages_append_in_order() {
    let server = MockServer::start().await;
    mock_page("1", posts_body(1..11)).expect(1).mount(&server).await;
    mock_page("2", posts_body(11..21)).expect(1).mount(&server).await;
    mock_page("3", posts_body(21..31)).expect(1).mount(&server).await;

    let loader = loader(&server.uri(), 10);
    assert!(matches!(
        loader.load_initial().await.unwrap(),
        LoadOutcome::Loaded(10)
    ));
    assert!(matches!(
        loader.load_more().await.unwrap(),
        LoadOutcome::Loaded(10)
    ));
    assert!(matches!(
        loader.load_more().await.unwrap(),
        LoadOutcome::Loaded(10)
    ));

    let snapshot = loader.snapshot();
    assert_eq!(snapshot.items.len(), 30);
    let ids: Vec<i64> = snapshot.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, (1..31).collect::<Vec<i64>>());
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn test_refresh_after_load_more_restarts_from_page_one() {
    let server = MockServer::start().await;
    // Page 1 is served twice: initial load, then the refresh.
    mock_page("1", posts_body(1..11)).expect(2).mount(&server).await;
    mock_page("2", posts_body(11..21)).expect(2).mount(&server).await;

    let loader = loader(&server.uri(), 10);
    loader.load_initial().await.unwrap();
    loader.load_more().await.unwrap();
    assert_eq!(loader.snapshot().items.len(), 20);

    loader.refresh().await.unwrap();
    let snapshot = loader.snapshot();
    assert_eq!(snapshot.items.len(), 10, "refresh replaces, never merges");

    // The cursor was reset: the next load-more asks for page 2 again.
    loader.load_more().await.unwrap();
    assert_eq!(loader.snapshot().items.len(), 20);
}

#[tokio::test]
async fn test_failed_page_does_not_advance_cursor() {
    let server = MockServer::start().await;
    mock_page("1", posts_body(1..11)).expect(1).mount(&server).await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("_page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mock_page("2", posts_body(11..21)).expect(1).mount(&server).await;

    let loader = loader(&server.uri(), 10);
    loader.load_initial().await.unwrap();

    assert!(loader.load_more().await.is_err());
    assert_eq!(loader.snapshot().items.len(), 10, "failed page adds nothing");

    // Retry fetches the same page, not page 3.
    loader.load_more().await.unwrap();
    assert_eq!(loader.snapshot().items.len(), 20);
}

// ============================================================================
// Duplicates Across Pages
// ============================================================================

#[tokio::test]
async fn test_overlapping_pages_keep_duplicate_ids() {
    let server = MockServer::start().await;
    mock_page("1", posts_body(1..11)).mount(&server).await;
    // Server pages overlap: ids 6..16 share 6..11 with page 1.
    mock_page("2", posts_body(6..16)).mount(&server).await;

    let loader = loader(&server.uri(), 10);
    loader.load_initial().await.unwrap();
    loader.load_more().await.unwrap();

    let snapshot = loader.snapshot();
    assert_eq!(snapshot.items.len(), 20, "duplicates are not collapsed");

    let dup_count = snapshot.items.iter().filter(|p| p.id == 7).count();
    assert_eq!(dup_count, 2);

    // The duplicates carry distinct render keys.
    let keys: Vec<&str> = snapshot
        .items
        .iter()
        .filter(|p| p.id == 7)
        .map(|p| p.unique_key.as_str())
        .collect();
    assert_ne!(keys[0], keys[1]);
}

// ============================================================================
// Single-Flight Guard Across Operations
// ============================================================================

#[tokio::test]
async fn test_refresh_and_load_more_do_not_interleave() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(posts_body(1..11))
                .set_delay(std::time::Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let loader = loader(&server.uri(), 10);
    let (refresh_result, more_result) = tokio::join!(loader.refresh(), loader.load_more());

    let outcomes = [refresh_result.unwrap(), more_result.unwrap()];
    let loaded = outcomes
        .iter()
        .filter(|o| matches!(o, LoadOutcome::Loaded(_)))
        .count();
    let skipped = outcomes
        .iter()
        .filter(|o| matches!(o, LoadOutcome::InFlight))
        .count();
    assert_eq!((loaded, skipped), (1, 1));

    let snapshot = loader.snapshot();
    assert_eq!(snapshot.items.len(), 10);
    assert!(!snapshot.loading);
    assert!(!snapshot.refreshing);
}

#[tokio::test]
async fn test_refresh_failure_clears_indicator_and_keeps_items() {
    let server = MockServer::start().await;
    mock_page("1", posts_body(1..11)).up_to_n_times(1).mount(&server).await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let loader = loader(&server.uri(), 10);
    loader.load_initial().await.unwrap();

    assert!(loader.refresh().await.is_err());

    let snapshot = loader.snapshot();
    assert_eq!(snapshot.items.len(), 10, "failed refresh keeps the old feed");
    assert!(!snapshot.refreshing);
    assert!(!snapshot.loading);
}

// ============================================================================
// Details Fetch
// ============================================================================

#[tokio::test]
async fn test_details_fetch_is_independent_of_list_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"userId": 4, "id": 42, "title": "Answer", "body": "Detail body"}"#,
        ))
        .mount(&server)
        .await;

    // No list fetch ever happened; details still work.
    let loader = loader(&server.uri(), 10);
    let item = loader.fetch_post(42).await.unwrap();
    assert_eq!(item.id, 42);
    assert_eq!(item.title, "Answer");
    assert_eq!(loader.snapshot().items.len(), 0);
}
