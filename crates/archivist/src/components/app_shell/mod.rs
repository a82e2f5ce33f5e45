//! App shell components: Header, Footer, StatusIndicator
//!
//! These components form the persistent UI framework around the routed content area.

mod footer;
mod header;
mod status_indicator;

pub use footer::Footer;
pub use header::Header;
pub use status_indicator::StatusIndicator;
