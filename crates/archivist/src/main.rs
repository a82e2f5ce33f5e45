use archivist::components::App as ArchivistApp;
use dioxus::prelude::*;

const MAIN_CSS: Asset = asset!("/assets/archivist.css");

fn main() {
    // Initialize cross-platform logger (web console + desktop stdout)
    // Use DEBUG level for development builds, INFO for release builds
    #[cfg(debug_assertions)]
    dioxus::logger::init(dioxus::logger::tracing::Level::DEBUG).expect("logger failed to init");
    #[cfg(not(debug_assertions))]
    dioxus::logger::init(dioxus::logger::tracing::Level::INFO).expect("logger failed to init");

    #[cfg(feature = "desktop")]
    {
        use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

        let config = Config::default().with_window(
            WindowBuilder::new()
                .with_title("Archivist")
                .with_resizable(true)
                .with_inner_size(LogicalSize::new(1024.0, 768.0))
                .with_min_inner_size(LogicalSize::new(640.0, 480.0)),
        );

        dioxus::LaunchBuilder::desktop()
            .with_cfg(config)
            .launch(Root);
    }

    #[cfg(feature = "web")]
    {
        dioxus::launch(Root);
    }

    #[cfg(not(any(feature = "desktop", feature = "web")))]
    dioxus::logger::tracing::error!("No platform selected; build with --features web or desktop");
}

#[component]
fn Root() -> Element {
    rsx! {
        // asset! is unreliable on desktop; inline the stylesheet there
        if cfg!(target_arch = "wasm32") {
            document::Stylesheet { href: MAIN_CSS }
        } else {
            style { {include_str!("../assets/archivist.css")} }
        }

        ArchivistApp {}
    }
}
