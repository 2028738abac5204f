//! Integration tests for the incremental feed pipeline.
//!
//! These drive the loader the way the event loop does: trigger a load,
//! receive the completion event, fold it into the app state, and re-evaluate
//! the sentinel. The HTTP side is either a wiremock server (for guard and
//! failure behavior, where request counts matter) or the real feed API
//! router (for the full-stack walk).

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use vidgrid::app::{App, AppEvent};
use vidgrid::feed::FeedClient;
use vidgrid::server::{router, FeedPage};
use vidgrid::storage::{demo_video, Database, VideoRecord, PAGE_SIZE};

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_app(base_url: &str) -> App {
    let mut app = App::new(
        FeedClient::new(base_url),
        vec!["all".to_string(), "music".to_string()],
        8,
    );
    // 80x24 terminal: 3 columns, 3 card rows in view
    app.terminal_rows = 24;
    app.update_grid_columns(80);
    app
}

fn record(id: &str) -> VideoRecord {
    VideoRecord {
        id: id.to_string(),
        title: format!("Title {}", id),
        category: Some("music".to_string()),
        image_url: None,
        channel_name: None,
        channel_image_url: None,
        view_count: Some(1),
    }
}

fn page_body(current_page: u32, ids: &[String]) -> FeedPage {
    FeedPage {
        message: "video list retrieved".to_string(),
        current_page,
        has_next_page: ids.len() == PAGE_SIZE,
        data: ids.iter().map(|id| record(id)).collect(),
    }
}

async fn recv_and_apply(app: &mut App, rx: &mut mpsc::Receiver<AppEvent>) -> bool {
    let event = timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for feed event")
        .expect("event channel closed");
    let AppEvent::FeedPageLoaded { page, result } = event;
    app.apply_page_result(page, result)
}

// ============================================================================
// Duplicate-Trigger Guard
// ============================================================================

#[tokio::test]
async fn test_rapid_triggers_issue_exactly_one_request() {
    let mock_server = MockServer::start().await;
    let ids: Vec<String> = (0..3).map(|i| format!("video-{:05}", i)).collect();
    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(1, &ids))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1) // the guard must collapse all triggers into one fetch
        .mount(&mock_server)
        .await;

    let mut app = test_app(&mock_server.uri());
    let (tx, mut rx) = mpsc::channel::<AppEvent>(32);

    // Simulate a burst of intersection events while the fetch is in flight
    app.maybe_load(&tx);
    app.maybe_load(&tx);
    app.maybe_load(&tx);
    assert!(app.cursor.is_loading());

    assert!(recv_and_apply(&mut app, &mut rx).await);
    assert_eq!(app.cards.len(), 3);
    assert!(!app.cursor.is_loading());

    // No second event may be pending
    assert!(rx.try_recv().is_err());
}

// ============================================================================
// Append Ordering Across Pages
// ============================================================================

#[tokio::test]
async fn test_pages_append_in_page_then_record_order() {
    let mock_server = MockServer::start().await;

    let first_ids: Vec<String> = (0..PAGE_SIZE).map(|i| format!("video-{:05}", i)).collect();
    let second_ids: Vec<String> = (PAGE_SIZE..PAGE_SIZE + 2)
        .map(|i| format!("video-{:05}", i))
        .collect();

    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, &first_ids)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(2, &second_ids)))
        .mount(&mock_server)
        .await;

    let mut app = test_app(&mock_server.uri());
    let (tx, mut rx) = mpsc::channel::<AppEvent>(32);

    app.initial_load(&tx);
    assert!(recv_and_apply(&mut app, &mut rx).await);
    assert_eq!(app.cards.len(), PAGE_SIZE);
    assert_eq!(app.cursor.next_page(), 2);

    // 30 cards at 3 columns is 10 rows; the sentinel is out of view until
    // the user scrolls down to it.
    assert!(!app.sentinel_visible());
    app.maybe_load(&tx);
    assert!(!app.cursor.is_loading(), "no load without a visible sentinel");

    app.scroll_to_bottom();
    app.maybe_load(&tx);
    assert!(recv_and_apply(&mut app, &mut rx).await);

    let expected: Vec<String> = first_ids.iter().chain(second_ids.iter()).cloned().collect();
    let actual: Vec<String> = app.cards.iter().map(|c| c.id.clone()).collect();
    assert_eq!(actual, expected, "page order then within-page order");
}

// ============================================================================
// End of Feed
// ============================================================================

#[tokio::test]
async fn test_empty_page_is_a_harmless_steady_state() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, &[])))
        .mount(&mock_server)
        .await;

    let mut app = test_app(&mock_server.uri());
    let (tx, mut rx) = mpsc::channel::<AppEvent>(32);

    app.initial_load(&tx);
    assert!(!recv_and_apply(&mut app, &mut rx).await);
    assert!(app.cards.is_empty());
    assert!(!app.cursor.is_loading());
    assert_eq!(app.cursor.next_page(), 1);
    assert!(app.load_error.is_none(), "end of feed is not an error");

    // The trigger keeps firing; every round trips the same empty page
    app.maybe_load(&tx);
    assert!(!recv_and_apply(&mut app, &mut rx).await);
    assert!(app.load_error.is_none());
}

// ============================================================================
// Transport Failure and Retry
// ============================================================================

#[tokio::test]
async fn test_failure_surfaces_indicator_then_retry_succeeds() {
    let mock_server = MockServer::start().await;

    // First request fails, every later one succeeds
    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    let ids: Vec<String> = vec!["video-00000".to_string()];
    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, &ids)))
        .mount(&mock_server)
        .await;

    let mut app = test_app(&mock_server.uri());
    let (tx, mut rx) = mpsc::channel::<AppEvent>(32);

    app.initial_load(&tx);
    assert!(!recv_and_apply(&mut app, &mut rx).await);
    assert_eq!(app.load_error.as_deref(), Some("Failed to load feed"));
    assert!(!app.cursor.is_loading(), "failure returns the loader to idle");
    assert_eq!(app.cursor.next_page(), 1, "failed page is retried, not skipped");

    // The next trigger retries the same page and clears the indicator
    app.maybe_load(&tx);
    assert!(app.load_error.is_none());
    assert!(recv_and_apply(&mut app, &mut rx).await);
    assert_eq!(app.cards.len(), 1);
    assert_eq!(app.cursor.next_page(), 2);
}

// ============================================================================
// Full Stack: Loader Against the Real Feed API
// ============================================================================

#[tokio::test]
async fn test_full_stack_thirty_one_record_walk() {
    let db = Database::open(":memory:").await.unwrap();
    for i in 0..31 {
        db.insert_video(&demo_video(i)).await.unwrap();
    }
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(db)).await.unwrap();
    });

    let mut app = test_app(&format!("http://{}", addr));
    let (tx, mut rx) = mpsc::channel::<AppEvent>(32);

    // First load: a full page
    app.initial_load(&tx);
    assert!(recv_and_apply(&mut app, &mut rx).await);
    assert_eq!(app.cards.len(), 30);

    // Second load: the single remaining record
    app.scroll_to_bottom();
    app.maybe_load(&tx);
    assert!(recv_and_apply(&mut app, &mut rx).await);
    assert_eq!(app.cards.len(), 31);

    // Third load: empty page, loader idles without error
    app.scroll_to_bottom();
    app.maybe_load(&tx);
    assert!(!recv_and_apply(&mut app, &mut rx).await);
    assert_eq!(app.cards.len(), 31);
    assert!(!app.cursor.is_loading());
    assert!(app.load_error.is_none());

    // Cards arrived in store order
    let ids: Vec<String> = app.cards.iter().map(|c| c.id.clone()).collect();
    let expected: Vec<String> = (0..31).map(|i| demo_video(i).id).collect();
    assert_eq!(ids, expected);
}
