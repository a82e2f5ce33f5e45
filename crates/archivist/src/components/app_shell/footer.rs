use dioxus::prelude::*;

/// Footer with build information
#[component]
pub fn Footer() -> Element {
    let version = env!("CARGO_PKG_VERSION");

    rsx! {
        footer { class: "ar-footer",
            span { class: "ar-footer-text",
                "Archivist v{version} • Entries are stored in your project's datastore."
            }
        }
    }
}
