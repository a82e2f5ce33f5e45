//! Context scopes of the application shell.
//!
//! The shell mounts its providers in a fixed order. Notifications sit outside
//! application state so that a failing state initialization can still surface
//! a notice; the router sits innermost so every view can reach both.
//!
//! Each provider renders a wrapper element tagged with its [`Scope::marker`],
//! which makes the nesting observable in rendered markup.

use std::fmt;

/// Name of the DOM attribute carrying a scope marker.
pub const SCOPE_ATTRIBUTE: &str = "data-scope";

/// Name of the DOM attribute carrying a page marker.
pub const VIEW_ATTRIBUTE: &str = "data-view";

/// A context scope mounted by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Notifications,
    AppState,
    Router,
}

/// Shell scopes, outermost first.
pub const SHELL_SCOPES: [Scope; 3] = [Scope::Notifications, Scope::AppState, Scope::Router];

impl Scope {
    /// Nesting depth, 0 being the outermost scope.
    pub fn depth(self) -> usize {
        SHELL_SCOPES
            .iter()
            .position(|scope| *scope == self)
            .unwrap_or(SHELL_SCOPES.len())
    }

    /// Whether `self` is a strict ancestor of `inner`.
    pub fn encloses(self, inner: Scope) -> bool {
        self.depth() < inner.depth()
    }

    /// Value of the `data-scope` attribute rendered by this scope's provider.
    pub fn marker(self) -> &'static str {
        match self {
            Scope::Notifications => "notifications",
            Scope::AppState => "app-state",
            Scope::Router => "router",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifications_enclose_app_state() {
        assert!(Scope::Notifications.encloses(Scope::AppState));
        assert!(!Scope::AppState.encloses(Scope::Notifications));
    }

    #[test]
    fn test_enclosure_is_strict() {
        for scope in SHELL_SCOPES {
            assert!(!scope.encloses(scope));
        }
    }

    #[test]
    fn test_depths_follow_declaration_order() {
        let depths: Vec<usize> = SHELL_SCOPES.iter().map(|s| s.depth()).collect();
        assert_eq!(depths, vec![0, 1, 2]);
        assert!(Scope::Notifications.encloses(Scope::Router));
    }

    #[test]
    fn test_markers_are_distinct() {
        let mut markers: Vec<&str> = SHELL_SCOPES.iter().map(|s| s.marker()).collect();
        markers.sort_unstable();
        markers.dedup();
        assert_eq!(markers.len(), SHELL_SCOPES.len());
    }
}
