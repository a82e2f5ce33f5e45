use dioxus::prelude::*;

use crate::components::router::Link;

/// Global header with wordmark and page navigation
#[component]
pub fn Header() -> Element {
    rsx! {
        header { class: "ar-header",
            div { class: "ar-header-left",
                Link { to: "/", class: "ar-logo",
                    span { class: "ar-logo-word", "Archi" }
                    span { class: "ar-logo-word ar-logo-word--accent", "vist" }
                }
            }
            nav { class: "ar-header-nav",
                Link { to: "/", class: "ar-nav-link", "Home" }
                Link { to: "/archive", class: "ar-nav-link", "Archive" }
            }
        }
    }
}
