//! Hash-fragment locations.
//!
//! The shell routes on the URL fragment (`https://host/#/archive`) so it can be
//! served from static hosting without server-side rewrites. These helpers turn
//! a raw fragment into the normalized path the route table matches against.

/// Root path, used whenever a fragment carries no path.
pub const ROOT_PATH: &str = "/";

/// Extracts a normalized route path from a URL fragment.
///
/// Accepts the fragment with or without its leading `#`. Query strings and
/// nested fragments are dropped, repeated slashes collapse, and a trailing
/// slash is removed unless the path is the root.
///
/// # Examples
///
/// ```
/// use archivist_core::routing::location::path_from_hash;
///
/// assert_eq!(path_from_hash(""), "/");
/// assert_eq!(path_from_hash("#/archive?page=2"), "/archive");
/// assert_eq!(path_from_hash("#archive/"), "/archive");
/// ```
pub fn path_from_hash(hash: &str) -> String {
    normalize_path(hash.strip_prefix('#').unwrap_or(hash))
}

/// Normalizes a path: leading slash, no empty segments, no trailing slash.
/// Anything from the first `?` or `#` on is dropped.
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = split_segments(path).collect();
    if segments.is_empty() {
        return ROOT_PATH.to_string();
    }
    format!("/{}", segments.join("/"))
}

/// Builds the fragment href that navigates to `path`.
pub fn href_for(path: &str) -> String {
    format!("#{}", normalize_path(path))
}

/// Non-empty `/`-separated segments of a path.
pub(crate) fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}
