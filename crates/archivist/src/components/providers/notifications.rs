use archivist_core::notifications::{Level, Notice, NoticeId, NotificationQueue};
use archivist_core::shell::Scope;
use dioxus::logger::tracing::debug;
use dioxus::prelude::*;

use crate::platform::sleep_ms;

/// Handle for pushing transient notices. Copyable; obtain it with
/// [`use_notifier`].
#[derive(Clone, Copy)]
pub struct Notifier {
    queue: Signal<NotificationQueue>,
}

impl Notifier {
    pub fn notify(&self, level: Level, message: impl Into<String>) -> NoticeId {
        let mut queue = self.queue;
        let message = message.into();
        debug!("notice ({}): {}", level.as_str(), message);
        let id = queue.write().push(level, message);
        id
    }

    pub fn info(&self, message: impl Into<String>) -> NoticeId {
        self.notify(Level::Info, message)
    }

    pub fn success(&self, message: impl Into<String>) -> NoticeId {
        self.notify(Level::Success, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> NoticeId {
        self.notify(Level::Warning, message)
    }

    pub fn error(&self, message: impl Into<String>) -> NoticeId {
        self.notify(Level::Error, message)
    }

    pub fn dismiss(&self, id: NoticeId) {
        let mut queue = self.queue;
        queue.write().dismiss(id);
    }

    /// Live notices, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.queue.read().iter().cloned().collect()
    }
}

/// Access the notifier from context.
pub fn use_notifier() -> Notifier {
    use_context::<Notifier>()
}

/// Outermost shell scope: owns the notice queue and renders the toast region
/// after its children.
#[component]
pub fn NotificationProvider(children: Element) -> Element {
    let queue = use_signal(NotificationQueue::default);
    use_context_provider(|| Notifier { queue });

    rsx! {
        div { class: "ar-scope", "data-scope": Scope::Notifications.marker(),
            {children}
            ToastRegion {}
        }
    }
}

#[component]
fn ToastRegion() -> Element {
    let notices = use_notifier().notices();

    rsx! {
        section { class: "ar-toasts", "aria-live": "polite",
            for notice in notices {
                Toast { key: "{notice.id}", notice: notice.clone() }
            }
        }
    }
}

/// A single notice. Dismisses itself after its level's display time.
#[component]
fn Toast(notice: Notice) -> Element {
    let notifier = use_notifier();
    let id = notice.id;
    let delay = notice.level.display_ms();

    use_future(move || async move {
        sleep_ms(delay).await;
        notifier.dismiss(id);
    });

    let class = format!("ar-toast ar-toast--{}", notice.level.as_str());

    rsx! {
        div { class: "{class}", role: "status",
            span { class: "ar-toast-message", "{notice.message}" }
            button {
                class: "ar-toast-close",
                "aria-label": "Dismiss notification",
                onclick: move |_| notifier.dismiss(id),
                "×"
            }
        }
    }
}
