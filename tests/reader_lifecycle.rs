//! End-to-end controller tests: boot, menu behavior, feed loading, failure
//! policy, and stale-response fencing — all headless, against a mock
//! conversion endpoint.
//!
//! These exercise the same surface the terminal UI renders from
//! (`TerminalSurface`), so what the assertions see is what a user would.

use headliner::catalog::{CatalogError, FeedCatalog};
use headliner::convert::Converter;
use headliner::loader::{FeedLoader, LoadOutcome};
use headliner::menu::{MenuController, MenuVisibility};
use headliner::ui::TerminalSurface;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED_A_URL: &str = "https://blog.udacity.com/feed";
const FEED_B_URL: &str = "https://feeds.feedburner.com/CssTricks";

struct Harness {
    catalog: Arc<FeedCatalog>,
    surface: Arc<TerminalSurface>,
    loader: Arc<FeedLoader>,
    menu: MenuController,
}

fn harness(server: &MockServer) -> Harness {
    let catalog = Arc::new(
        FeedCatalog::new([("Udacity Blog", FEED_A_URL), ("CSS Tricks", FEED_B_URL)]).unwrap(),
    );
    let surface = Arc::new(TerminalSurface::new());
    let converter = Converter::new(
        reqwest::Client::new(),
        format!("{}/parseFeed", server.uri()),
        None,
    )
    .unwrap();
    let loader = Arc::new(FeedLoader::new(
        Arc::clone(&catalog),
        converter,
        surface.clone(),
    ));
    let menu = MenuController::new(Arc::clone(&catalog), surface.clone());
    Harness {
        catalog,
        surface,
        loader,
        menu,
    }
}

fn feed_response(titles: &[&str]) -> String {
    let entries: Vec<String> = titles
        .iter()
        .map(|t| format!(r#"{{"title": "{}", "link": "https://example.com/{}"}}"#, t, t))
        .collect();
    format!(r#"{{"feed": {{"entries": [{}]}}}}"#, entries.join(","))
}

async fn mount_feed(server: &MockServer, source_url: &str, titles: &[&str]) {
    Mock::given(method("POST"))
        .and(path("/parseFeed"))
        .and(body_json(serde_json::json!({ "sourceUrl": source_url })))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed_response(titles)))
        .mount(server)
        .await;
}

// ============================================================================
// Catalog integrity
// ============================================================================

#[tokio::test]
async fn test_catalog_descriptors_are_complete() {
    let server = MockServer::start().await;
    let h = harness(&server);

    assert!(!h.catalog.is_empty());
    for (position, feed) in h.catalog.iter().enumerate() {
        assert!(!feed.name.is_empty());
        assert!(!feed.source_url.is_empty());
        assert_eq!(feed.catalog_index, position);
    }
}

// ============================================================================
// Menu behavior
// ============================================================================

#[tokio::test]
async fn test_menu_hidden_by_default() {
    let server = MockServer::start().await;
    let h = harness(&server);

    assert_eq!(h.menu.visibility(), MenuVisibility::Hidden);
    assert!(!h.surface.menu_visible());
}

#[tokio::test]
async fn test_menu_icon_toggles_visibility_twice() {
    let server = MockServer::start().await;
    let mut h = harness(&server);

    h.menu.toggle();
    assert!(h.surface.menu_visible());
    h.menu.toggle();
    assert!(!h.surface.menu_visible());
}

#[tokio::test]
async fn test_boot_builds_menu_in_catalog_order() {
    let server = MockServer::start().await;
    let h = harness(&server);

    h.menu.build();
    let items = h.surface.menu_items().clone();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "Udacity Blog");
    assert_eq!(items[0].index, 0);
    assert_eq!(items[1].name, "CSS Tricks");
    assert_eq!(items[1].index, 1);
}

#[tokio::test]
async fn test_selecting_item_hides_menu_and_loads_feed() {
    let server = MockServer::start().await;
    mount_feed(&server, FEED_B_URL, &["picked"]).await;
    let mut h = harness(&server);

    h.menu.toggle(); // user opened the menu
    let index = h.menu.select(1).unwrap();
    assert_eq!(h.menu.visibility(), MenuVisibility::Hidden);
    assert!(!h.surface.menu_visible());

    let outcome = h.loader.load_feed(index).await.unwrap();
    assert!(outcome.is_rendered());
    assert_eq!(h.surface.title(), "CSS Tricks");
}

// ============================================================================
// Initial entries
// ============================================================================

#[tokio::test]
async fn test_initial_load_renders_at_least_one_entry() {
    let server = MockServer::start().await;
    mount_feed(&server, FEED_A_URL, &["first", "second", "third"]).await;
    let h = harness(&server);

    // Boot sequence: menu, then feed 0 with no continuation
    h.menu.build();
    let outcome = h.loader.load_feed(0).await.unwrap();

    assert!(matches!(outcome, LoadOutcome::Rendered { entries: 3, .. }));
    assert!(h.surface.entry_count() > 0);
    assert_eq!(h.surface.title(), "Udacity Blog");
}

// ============================================================================
// New feed selection
// ============================================================================

#[tokio::test]
async fn test_new_feed_selection_changes_rendered_content() {
    let server = MockServer::start().await;
    mount_feed(&server, FEED_A_URL, &["alpha", "beta"]).await;
    mount_feed(&server, FEED_B_URL, &["gamma"]).await;
    let h = harness(&server);

    h.loader.load_feed(0).await.unwrap();
    let old_titles: Vec<String> = h.surface.entries().iter().map(|e| e.title.clone()).collect();

    h.loader.load_feed(1).await.unwrap();
    let new_titles: Vec<String> = h.surface.entries().iter().map(|e| e.title.clone()).collect();

    assert_eq!(old_titles, vec!["alpha", "beta"]);
    assert_eq!(new_titles, vec!["gamma"]);
    assert_ne!(old_titles, new_titles);
}

// ============================================================================
// Failure policy
// ============================================================================

#[tokio::test]
async fn test_failed_fetch_completes_once_and_preserves_view() {
    let server = MockServer::start().await;
    mount_feed(&server, FEED_A_URL, &["kept"]).await;
    Mock::given(method("POST"))
        .and(body_json(serde_json::json!({ "sourceUrl": FEED_B_URL })))
        .respond_with(ResponseTemplate::new(503))
        .expect(1) // exactly one request, no retry
        .mount(&server)
        .await;
    let h = harness(&server);

    h.loader.load_feed(0).await.unwrap();
    let outcome = h.loader.load_feed(1).await.unwrap();

    // The load resolved (completion contract) with a contained failure:
    // nothing rendered, the previous feed still on screen
    assert!(matches!(outcome, LoadOutcome::Failed { index: 1, .. }));
    assert_eq!(h.surface.title(), "Udacity Blog");
    let titles: Vec<String> = h.surface.entries().iter().map(|e| e.title.clone()).collect();
    assert_eq!(titles, vec!["kept"]);
}

#[tokio::test]
async fn test_response_without_entry_list_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"feed": {}}"#))
        .mount(&server)
        .await;
    let h = harness(&server);

    let outcome = h.loader.load_feed(0).await.unwrap();
    assert!(matches!(outcome, LoadOutcome::Failed { .. }));
    assert_eq!(h.surface.entry_count(), 0);
}

#[tokio::test]
async fn test_out_of_range_index_reports_feed_not_found() {
    let server = MockServer::start().await;
    let h = harness(&server);

    let result = h.loader.load_feed(5).await;
    assert!(matches!(
        result,
        Err(CatalogError::FeedNotFound { index: 5, len: 2 })
    ));
    // View untouched, no request issued
    assert_eq!(h.surface.title(), "");
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

// ============================================================================
// Overlapping loads
// ============================================================================

#[tokio::test]
async fn test_stale_response_cannot_overwrite_newer_selection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(serde_json::json!({ "sourceUrl": FEED_A_URL })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(feed_response(&["stale"]))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    mount_feed(&server, FEED_B_URL, &["current"]).await;
    let h = harness(&server);

    let slow = tokio::spawn({
        let loader = Arc::clone(&h.loader);
        async move { loader.load_feed(0).await }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    let fast = h.loader.load_feed(1).await.unwrap();
    let slow = slow.await.unwrap().unwrap();

    assert!(fast.is_rendered());
    assert!(matches!(slow, LoadOutcome::Superseded { index: 0 }));
    let titles: Vec<String> = h.surface.entries().iter().map(|e| e.title.clone()).collect();
    assert_eq!(titles, vec!["current"]);
    assert_eq!(h.surface.title(), "CSS Tricks");
}
