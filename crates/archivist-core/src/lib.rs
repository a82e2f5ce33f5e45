//! # Archivist Core
//!
//! Platform-independent building blocks for the Archivist application shell.
//!
//! Nothing in this crate depends on a UI toolkit, so the same types are shared
//! by the Dioxus frontend and the command-line tooling.
//!
//! ## Modules
//!
//! - [`routing`] - Ordered route table with an explicit fallback entry, plus hash-location parsing
//! - [`shell`] - Fixed outer-to-inner order of the shell's context scopes
//! - [`notifications`] - Bounded queue of transient user-facing notices
//! - [`config`] - Flat key/value service configuration
//! - [`datastore`] - Document datastore trait with in-memory and Firestore REST backends
//! - [`smoke`] - Write-then-read round trip used to verify datastore connectivity
//! - [`error`] - Error types shared across the crate

#![forbid(unsafe_code)]

pub mod config;
pub mod datastore;
pub mod error;
pub mod notifications;
pub mod routing;
pub mod shell;
pub mod smoke;
