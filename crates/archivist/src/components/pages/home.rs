use dioxus::prelude::*;

use crate::components::router::Link;

/// Default view, also shown for unknown paths
#[component]
pub fn HomePage() -> Element {
    rsx! {
        section { class: "ar-page", "data-view": "home",
            h1 { class: "ar-page-title", "Welcome" }
            p { class: "ar-page-text",
                "Submit new entries here. Everything you save shows up in the archive."
            }
            Link { to: "/archive", class: "ar-btn", "Browse the archive" }
        }
    }
}
