use dioxus::prelude::*;

/// Archive of past entries
#[component]
pub fn ArchivePage() -> Element {
    rsx! {
        section { class: "ar-page", "data-view": "archive",
            h1 { class: "ar-page-title", "Archive" }
            p { class: "ar-page-text", "Past entries appear here." }
        }
    }
}
