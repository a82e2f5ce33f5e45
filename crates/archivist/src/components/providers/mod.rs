//! Context providers mounted by the shell.
//!
//! Nesting order is fixed (see `archivist_core::shell::SHELL_SCOPES`):
//! [`NotificationProvider`] wraps [`AppStateProvider`]. Each provider renders
//! a wrapper tagged with its scope marker.

mod app_state;
mod notifications;

pub use app_state::{
    use_app_state, AppState, AppStateProvider, ConnectionStatus, SharedDatastore,
};
pub use notifications::{use_notifier, NotificationProvider, Notifier};
