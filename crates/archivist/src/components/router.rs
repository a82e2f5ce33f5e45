//! Hash-fragment router.
//!
//! [`HashRouter`] owns the current path and exposes it through a
//! [`Navigator`]. In the browser the path follows `window.location.hash`; on
//! native targets it starts from an [`InitialPath`] provided by an ancestor
//! (or `/`) and only changes through [`Navigator::navigate`].

use archivist_core::routing::location::{href_for, normalize_path};
use archivist_core::shell::Scope;
use dioxus::logger::tracing::debug;
use dioxus::prelude::*;

/// Starting path for routers that cannot read a URL (native shells, tests).
#[derive(Debug, Clone, PartialEq)]
pub struct InitialPath(pub String);

/// Navigation handle provided by [`HashRouter`].
#[derive(Clone, Copy)]
pub struct Navigator {
    path: Signal<String>,
}

impl Navigator {
    /// Current normalized path. Subscribes the calling component.
    pub fn path(&self) -> String {
        self.path.read().clone()
    }

    /// Whether `path` names the current location. Case-insensitive, like
    /// route matching.
    pub fn is_current(&self, path: &str) -> bool {
        self.path.read().eq_ignore_ascii_case(&normalize_path(path))
    }

    /// Navigates to `to`. In the browser this also updates the URL fragment
    /// so history and reloads keep working.
    pub fn navigate(&self, to: &str) {
        let next = normalize_path(to);
        debug!("navigate: {}", next);

        #[cfg(target_arch = "wasm32")]
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.location().set_hash(&href_for(&next)) {
                dioxus::logger::tracing::error!("Failed to update location hash: {:?}", err);
            }
        }

        let mut path = self.path;
        if *path.peek() != next {
            path.set(next);
        }
    }
}

/// Access the navigator from context.
pub fn use_navigator() -> Navigator {
    use_context::<Navigator>()
}

/// Innermost shell scope: tracks the current path and provides [`Navigator`].
#[component]
pub fn HashRouter(children: Element) -> Element {
    let path = use_signal(initial_path);
    use_context_provider(|| Navigator { path });

    #[cfg(target_arch = "wasm32")]
    use_hook(move || web::follow_hash_changes(path));

    rsx! {
        div { class: "ar-scope", "data-scope": Scope::Router.marker(),
            {children}
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn initial_path() -> String {
    web::current_hash_path()
}

#[cfg(not(target_arch = "wasm32"))]
fn initial_path() -> String {
    try_consume_context::<InitialPath>()
        .map(|initial| normalize_path(&initial.0))
        .unwrap_or_else(|| archivist_core::routing::location::ROOT_PATH.to_string())
}

/// Anchor that navigates through the [`Navigator`].
///
/// Renders a real `#/...` href so middle-click and copy-link behave, and
/// marks itself active when its target is the current path.
#[component]
pub fn Link(
    #[props(into)] to: String,
    #[props(into, default)] class: String,
    children: Element,
) -> Element {
    let navigator = use_navigator();
    let href = href_for(&to);
    let active = navigator.is_current(&to);

    let class = match (class.is_empty(), active) {
        (true, false) => String::new(),
        (true, true) => "active".to_string(),
        (false, false) => class,
        (false, true) => format!("{class} {class}--active"),
    };

    rsx! {
        a {
            href: "{href}",
            class: "{class}",
            "aria-current": if active { "page" } else { "false" },
            onclick: move |evt: MouseEvent| {
                evt.prevent_default();
                navigator.navigate(&to);
            },
            {children}
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use archivist_core::routing::location::{path_from_hash, ROOT_PATH};
    use dioxus::logger::tracing::error;
    use dioxus::prelude::*;
    use futures_channel::mpsc::{unbounded, UnboundedSender};
    use futures_util::StreamExt;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    pub(super) fn current_hash_path() -> String {
        web_sys::window()
            .and_then(|window| window.location().hash().ok())
            .map(|hash| path_from_hash(&hash))
            .unwrap_or_else(|| ROOT_PATH.to_string())
    }

    /// Keeps `path` in sync with `hashchange` events (back/forward buttons,
    /// manual edits, plain anchors).
    pub(super) fn follow_hash_changes(path: Signal<String>) {
        let (tx, mut rx) = unbounded::<String>();
        add_hashchange_listener(tx);

        spawn(async move {
            let mut path = path;
            while let Some(next) = rx.next().await {
                if *path.peek() != next {
                    path.set(next);
                }
            }
        });
    }

    fn add_hashchange_listener(tx: UnboundedSender<String>) {
        let Some(window) = web_sys::window() else {
            error!("No window; hash routing disabled");
            return;
        };

        let on_change = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            let _ = tx.unbounded_send(current_hash_path());
        }) as Box<dyn FnMut(_)>);

        if let Err(err) = window
            .add_event_listener_with_callback("hashchange", on_change.as_ref().unchecked_ref())
        {
            error!("Failed to listen for hashchange: {:?}", err);
            return;
        }

        // Lives as long as the page
        on_change.forget();
    }
}
