use archivist_core::config::STATUS_POLL_INTERVAL_MS;
use archivist_core::datastore::{Datastore, DatastoreError, FirestoreDatastore};
use archivist_core::shell::Scope;
use dioxus::logger::tracing::{debug, info, warn};
use dioxus::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

use super::notifications::{use_notifier, Notifier};
use crate::platform::sleep_ms;

/// Datastore connectivity as shown by the status indicator.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    /// First probe still in flight
    Checking,
    Connected,
    /// No project id configured; the app runs without persistence
    Unconfigured,
    Offline(String),
}

/// Datastore to use instead of the configured Firestore backend. Provide it
/// above [`AppStateProvider`] (desktop embedding, tests).
#[derive(Clone)]
pub struct SharedDatastore(pub Rc<dyn Datastore>);

/// Shared application state. Cheap to clone; obtain it with [`use_app_state`].
#[derive(Clone)]
pub struct AppState {
    datastore: Rc<dyn Datastore>,
    status: Signal<ConnectionStatus>,
    notifier: Notifier,
    checking: Rc<Cell<bool>>,
}

impl AppState {
    pub fn datastore(&self) -> Rc<dyn Datastore> {
        Rc::clone(&self.datastore)
    }

    pub fn status(&self) -> Signal<ConnectionStatus> {
        self.status
    }

    /// Re-checks connectivity now instead of waiting for the next poll.
    pub fn refresh(&self) {
        let state = self.clone();
        spawn(async move {
            state.check_connection().await;
        });
    }

    /// Probes the datastore and records the result. Transitions into a
    /// failure, and recoveries from one, are also pushed as notices.
    ///
    /// At most one check runs at a time; overlapping calls return at once.
    async fn check_connection(&self) {
        let Some(_in_flight) = InFlight::begin(&self.checking) else {
            debug!("Connection check already running");
            return;
        };

        let mut status = self.status;
        let previous = status.peek().clone();

        if !self.datastore.is_configured() {
            if previous != ConnectionStatus::Unconfigured {
                warn!("Datastore not configured; running without persistence");
                self.notifier
                    .warning("Datastore credentials are not configured. Entries will not be saved.");
                status.set(ConnectionStatus::Unconfigured);
            }
            return;
        }

        match self.datastore.probe().await {
            Ok(()) => {
                if previous != ConnectionStatus::Connected {
                    info!("Connected to {}", self.datastore.describe());
                    if matches!(previous, ConnectionStatus::Offline(_)) {
                        self.notifier.success("Datastore connection restored");
                    }
                    status.set(ConnectionStatus::Connected);
                }
            }
            Err(err) => {
                warn!("Datastore probe failed: {}", err);
                if !matches!(previous, ConnectionStatus::Offline(_)) {
                    self.notifier.error(offline_notice(&err));
                }
                status.set(ConnectionStatus::Offline(err.to_string()));
            }
        }
    }
}

/// Marks a connection check as running until dropped.
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn begin(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

fn offline_notice(err: &DatastoreError) -> String {
    if err.is_permission_denied() {
        format!("Datastore rejected the request. Check credentials and security rules. ({})", err)
    } else {
        format!("Datastore unavailable: {}", err)
    }
}

/// Access the application state from context.
pub fn use_app_state() -> AppState {
    use_context::<AppState>()
}

/// Application-state scope. Must be mounted inside the notification scope:
/// initialization failures are reported through it.
#[component]
pub fn AppStateProvider(children: Element) -> Element {
    let notifier = use_notifier();
    let status = use_signal(|| ConnectionStatus::Checking);

    let state = use_context_provider(|| {
        let datastore = match try_consume_context::<SharedDatastore>() {
            Some(SharedDatastore(store)) => store,
            None => {
                let config = crate::config::load();
                info!(datastore = ?config.datastore, "Loaded service configuration");
                Rc::new(FirestoreDatastore::new(config.datastore)) as Rc<dyn Datastore>
            }
        };
        info!("Using {}", datastore.describe());
        AppState {
            datastore,
            status,
            notifier,
            checking: Rc::new(Cell::new(false)),
        }
    });

    // Initial probe, then poll. Stops polling when there is nothing to reach.
    use_effect(move || {
        let state = state.clone();
        spawn(async move {
            loop {
                state.check_connection().await;
                if !state.datastore.is_configured() {
                    break;
                }
                sleep_ms(STATUS_POLL_INTERVAL_MS).await;
            }
        });
    });

    rsx! {
        div { class: "ar-scope", "data-scope": Scope::AppState.marker(),
            {children}
        }
    }
}
