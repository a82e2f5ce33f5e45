use dioxus::prelude::*;

use crate::components::providers::{use_app_state, ConnectionStatus};

/// Floating pill reporting datastore connectivity. Click to re-check.
#[component]
pub fn StatusIndicator() -> Element {
    let state = use_app_state();
    let status = state.status().read().clone();
    let backend = state.datastore().describe();

    let (modifier, label) = match status {
        ConnectionStatus::Checking => ("warn", "Datastore: checking…".to_string()),
        ConnectionStatus::Connected => ("ok", "Datastore: connected".to_string()),
        ConnectionStatus::Unconfigured => ("muted", "Datastore: not configured".to_string()),
        ConnectionStatus::Offline(err) => ("error", format!("Datastore error: {err}")),
    };
    let pill_class = format!("ar-status-pill ar-status-pill--{modifier}");
    let dot_class = format!("ar-status-dot ar-status-dot--{modifier}");

    rsx! {
        div { class: "ar-status",
            button {
                class: "{pill_class}",
                title: "{backend} (click to check again)",
                "aria-label": "Check datastore connection",
                onclick: move |_| state.refresh(),
                span { class: "{dot_class}" }
                "{label}"
            }
        }
    }
}
