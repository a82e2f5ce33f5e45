//! Routed pages. Their contents are placeholders owned by the page modules;
//! the shell only mounts them.

mod archive;
mod home;

pub use archive::ArchivePage;
pub use home::HomePage;
