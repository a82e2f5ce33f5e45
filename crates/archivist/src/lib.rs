//! Archivist - single-page application shell.
//!
//! The shell composes two context providers (notifications, application
//! state), a hash-fragment router and the persistent layout (header, routed
//! content, footer, datastore status indicator). Page contents are leaf
//! components the shell mounts but does not own.
//!
//! Platform-independent pieces (route table, configuration, datastore
//! clients) live in `archivist-core`.

// Enforce memory safety: forbid all unsafe code
#![forbid(unsafe_code)]

pub mod components;
pub mod config;
pub mod platform;
