//! End-to-end checks across the core modules.
//!
//! These mirror what the shell does at runtime: turn a URL fragment into a
//! path, resolve it against the page table, and verify datastore connectivity
//! with the smoke round trip.

use archivist_core::config::{keys, ServiceConfig};
use archivist_core::datastore::{Datastore, FirestoreDatastore, InMemoryDatastore};
use archivist_core::routing::location::path_from_hash;
use archivist_core::routing::RouteTable;
use archivist_core::shell::{Scope, SHELL_SCOPES};
use archivist_core::smoke::{run_round_trip, Stage, DEFAULT_COLLECTION};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Page {
    Home,
    Archive,
}

fn page_routes() -> RouteTable<Page> {
    RouteTable::builder()
        .route("/", Page::Home)
        .route("/archive", Page::Archive)
        .fallback(Page::Home)
}

fn page_for_fragment(routes: &RouteTable<Page>, fragment: &str) -> Page {
    *routes.resolve(&path_from_hash(fragment)).view
}

#[test]
fn test_navigation_scenario() {
    let routes = page_routes();

    // Initial load without a fragment
    assert_eq!(page_for_fragment(&routes, ""), Page::Home);
    // Navigate to the archive
    assert_eq!(page_for_fragment(&routes, "#/archive"), Page::Archive);
    // Navigate somewhere unknown
    assert_eq!(page_for_fragment(&routes, "#/nonexistent"), Page::Home);
    // And back
    assert_eq!(page_for_fragment(&routes, "#/archive/"), Page::Archive);
}

#[test]
fn test_every_path_resolves_to_exactly_one_view() {
    let routes = page_routes();
    for path in ["/", "/archive", "/unknown", "/foo/bar", "", "///", "/archive/x"] {
        let matched = routes.resolve(path);
        assert!(matched.index < routes.len(), "path {path:?}");
        let expected = if path.trim_matches('/') == "archive" {
            Page::Archive
        } else {
            Page::Home
        };
        assert_eq!(*matched.view, expected, "path {path:?}");
    }
}

#[test]
fn test_shell_scope_order() {
    assert_eq!(
        SHELL_SCOPES,
        [Scope::Notifications, Scope::AppState, Scope::Router]
    );
    assert!(Scope::Notifications.encloses(Scope::AppState));
}

#[tokio::test]
async fn test_smoke_round_trip_against_memory_store() {
    let store = InMemoryDatastore::new();
    let report = run_round_trip(&store, DEFAULT_COLLECTION).await;
    assert!(report.passed());
    assert!(report.marker_read_back());
    assert_eq!(report.backend, "in-memory datastore");
}

#[tokio::test]
async fn test_smoke_round_trip_unconfigured_firestore() {
    let config = ServiceConfig::from_lookup(|key| match key {
        keys::DATASTORE_API_KEY => Some("only-a-key".to_string()),
        _ => None,
    });
    let store = FirestoreDatastore::new(config.datastore);
    assert!(store.probe().await.is_err());

    let report = run_round_trip(&store, DEFAULT_COLLECTION).await;
    assert!(!report.passed());
    assert_eq!(report.failure.map(|f| f.stage), Some(Stage::Write));
}
