//! UI components for the Archivist application.
//!
//! # Shell composition
//!
//! [`App`] nests three scopes, outermost first:
//!
//! 1. `NotificationProvider` - transient notices and the toast region
//! 2. `AppStateProvider` - configuration, datastore handle, connection status
//! 3. [`router::HashRouter`] - current path from the URL fragment
//!
//! Inside the router sits the layout: Header, the routed main area, Footer
//! and the status indicator.
//!
//! # Context Providers
//!
//! ```ignore
//! let notifier = use_notifier();
//! notifier.warning("Entries will not be saved");
//!
//! let state = use_app_state();
//! match state.status().read().clone() {
//!     ConnectionStatus::Connected => { /* ... */ }
//!     ConnectionStatus::Offline(err) => { /* ... */ }
//!     _ => {}
//! }
//!
//! use_navigator().navigate("/archive");
//! ```

mod app_shell;
mod pages;
mod providers;
pub mod router;

use archivist_core::routing::RouteTable;
use dioxus::logger::tracing::debug;
use dioxus::prelude::*;
use std::rc::Rc;

pub use app_shell::{Footer, Header, StatusIndicator};
pub use pages::{ArchivePage, HomePage};
pub use providers::{
    use_app_state, use_notifier, AppState, AppStateProvider, ConnectionStatus,
    NotificationProvider, Notifier, SharedDatastore,
};
pub use router::{use_navigator, HashRouter, InitialPath, Link, Navigator};

/// Views reachable through the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Archive,
}

/// Route table for the shell: `/` and `/archive`, everything else falls
/// back to the home view.
pub fn page_routes() -> RouteTable<Page> {
    RouteTable::builder()
        .route("/", Page::Home)
        .route("/archive", Page::Archive)
        .fallback(Page::Home)
}

/// Application root.
#[component]
pub fn App() -> Element {
    rsx! {
        NotificationProvider {
            AppStateProvider {
                HashRouter {
                    ShellLayout {}
                }
            }
        }
    }
}

/// Header, routed main area, footer and status indicator.
#[component]
fn ShellLayout() -> Element {
    rsx! {
        div { class: "ar-app",
            Header {}
            main { class: "ar-main",
                RoutedPage {}
            }
            Footer {}
            StatusIndicator {}
        }
    }
}

/// Renders the view the current path resolves to.
#[component]
fn RoutedPage() -> Element {
    let routes = use_hook(|| Rc::new(page_routes()));
    let path = use_navigator().path();
    let matched = routes.resolve(&path);

    if matched.is_fallback {
        debug!("No route for {}; showing fallback view", path);
    }

    match matched.view {
        Page::Home => rsx! { HomePage {} },
        Page::Archive => rsx! { ArchivePage {} },
    }
}
