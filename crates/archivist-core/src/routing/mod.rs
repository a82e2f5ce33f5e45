//! Client-side route table.
//!
//! A [`RouteTable`] is an ordered list of (matcher, view) entries that always
//! ends in an explicit wildcard fallback. Resolution walks the entries in
//! order and returns the first match, so overlapping patterns are decided by
//! declaration order and every path resolves to exactly one view.
//!
//! ```
//! use archivist_core::routing::RouteTable;
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Page { Home, Archive }
//!
//! let routes = RouteTable::builder()
//!     .route("/", Page::Home)
//!     .route("/archive", Page::Archive)
//!     .fallback(Page::Home);
//!
//! assert_eq!(*routes.resolve("/archive").view, Page::Archive);
//! assert_eq!(*routes.resolve("/nowhere").view, Page::Home);
//! assert!(routes.resolve("/nowhere").is_fallback);
//! ```

pub mod location;

use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

use location::{normalize_path, split_segments};

/// Capture key used for the remainder matched by a trailing `*`.
pub const SPLAT_KEY: &str = "*";

/// One segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal segment, compared ASCII case-insensitively
    Static(String),
    /// `:name` - matches exactly one segment and captures it
    Param(String),
    /// Trailing `*` - matches the remaining zero or more segments
    Splat,
}

/// A parsed path pattern such as `/archive`, `/entries/:id` or `/docs/*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parses a pattern. Parsing never fails: a missing leading slash is
    /// implied and empty segments are dropped. A `*` anywhere but the last
    /// segment is kept as a literal.
    pub fn parse(source: &str) -> Self {
        let normalized = normalize_path(source);
        let raw: Vec<&str> = split_segments(&normalized).collect();
        let last = raw.len().saturating_sub(1);
        let segments = raw
            .iter()
            .enumerate()
            .map(|(i, segment)| match *segment {
                "*" if i == last => Segment::Splat,
                "*" => {
                    warn!(pattern = source, "'*' is only special as the last segment");
                    Segment::Static("*".to_string())
                }
                s => match s.strip_prefix(':') {
                    Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
                    _ => Segment::Static(s.to_string()),
                },
            })
            .collect();

        Self {
            source: normalized,
            segments,
        }
    }

    /// Normalized source text of the pattern.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Matches a path, returning the captured params on success.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let parts: Vec<&str> = split_segments(path).collect();
        let mut params = BTreeMap::new();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Splat => {
                    params.insert(SPLAT_KEY.to_string(), parts[i.min(parts.len())..].join("/"));
                    return Some(params);
                }
                Segment::Static(expected) => {
                    let actual = parts.get(i)?;
                    if !actual.eq_ignore_ascii_case(expected) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let actual = parts.get(i)?;
                    params.insert(name.clone(), (*actual).to_string());
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(params)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// How a route entry decides whether it applies to a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    Path(Pattern),
    /// Terminal catch-all; only ever the last entry of a table
    Wildcard,
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Path(pattern) => pattern.fmt(f),
            Matcher::Wildcard => f.write_str("*"),
        }
    }
}

/// A single (matcher, view) entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Route<V> {
    pub matcher: Matcher,
    pub view: V,
}

/// Result of resolving a path against a [`RouteTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<'a, V> {
    /// View of the matching entry
    pub view: &'a V,
    /// Captured `:param` values and the `*` remainder
    pub params: BTreeMap<String, String>,
    /// Position of the matching entry in declaration order
    pub index: usize,
    /// True when no declared pattern matched and the fallback was used
    pub is_fallback: bool,
}

/// Ordered route entries, terminated by a wildcard fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTable<V> {
    routes: Vec<Route<V>>,
}

impl<V> RouteTable<V> {
    pub fn builder() -> RouteTableBuilder<V> {
        RouteTableBuilder { routes: Vec::new() }
    }

    /// Resolves `path` to the first matching entry.
    ///
    /// The path is normalized first, so `/archive/`, `//archive` and
    /// `archive` resolve the same way.
    pub fn resolve(&self, path: &str) -> RouteMatch<'_, V> {
        let path = normalize_path(path);
        let fallback_index = self.routes.len() - 1;

        for (index, route) in self.routes.iter().enumerate() {
            let params = match &route.matcher {
                Matcher::Path(pattern) => pattern.matches(&path),
                Matcher::Wildcard => Some(BTreeMap::new()),
            };
            if let Some(params) = params {
                return RouteMatch {
                    view: &route.view,
                    params,
                    index,
                    is_fallback: index == fallback_index,
                };
            }
        }

        // The builder guarantees a terminal wildcard, which always matches.
        RouteMatch {
            view: &self.routes[fallback_index].view,
            params: BTreeMap::new(),
            index: fallback_index,
            is_fallback: true,
        }
    }

    /// Entries in declaration order, fallback last.
    pub fn routes(&self) -> &[Route<V>] {
        &self.routes
    }

    /// The terminal fallback view.
    pub fn fallback(&self) -> &V {
        &self.routes[self.routes.len() - 1].view
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Always false: a table holds at least its fallback.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Builder for [`RouteTable`]. The table only exists once
/// [`fallback`](RouteTableBuilder::fallback) has been called.
#[derive(Debug)]
pub struct RouteTableBuilder<V> {
    routes: Vec<Route<V>>,
}

impl<V> RouteTableBuilder<V> {
    /// Appends a pattern entry. Later entries lose to earlier ones on overlap.
    pub fn route(mut self, pattern: &str, view: V) -> Self {
        let pattern = Pattern::parse(pattern);
        if let Some(shadow) = self.routes.iter().find(|r| match &r.matcher {
            Matcher::Path(p) => p.segments() == [Segment::Splat],
            Matcher::Wildcard => false,
        }) {
            warn!(
                pattern = %pattern,
                shadowed_by = %shadow.matcher,
                "route is unreachable behind a catch-all pattern"
            );
        }
        self.routes.push(Route {
            matcher: Matcher::Path(pattern),
            view,
        });
        self
    }

    /// Installs the terminal wildcard entry and finishes the table.
    pub fn fallback(mut self, view: V) -> RouteTable<V> {
        self.routes.push(Route {
            matcher: Matcher::Wildcard,
            view,
        });
        RouteTable {
            routes: self.routes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Page {
        Home,
        Archive,
        Entry,
        Docs,
    }

    fn shell_routes() -> RouteTable<Page> {
        RouteTable::builder()
            .route("/", Page::Home)
            .route("/archive", Page::Archive)
            .fallback(Page::Home)
    }

    #[test]
    fn test_root_resolves_to_home() {
        let routes = shell_routes();
        let matched = routes.resolve("/");
        assert_eq!(*matched.view, Page::Home);
        assert_eq!(matched.index, 0);
        assert!(!matched.is_fallback);
    }

    #[test]
    fn test_archive_resolves_to_archive() {
        let routes = shell_routes();
        assert_eq!(*routes.resolve("/archive").view, Page::Archive);
        assert_eq!(*routes.resolve("/archive/").view, Page::Archive);
        assert_eq!(*routes.resolve("/ARCHIVE").view, Page::Archive);
    }

    #[test]
    fn test_unknown_paths_fall_back_to_home() {
        let routes = shell_routes();
        for path in ["/unknown", "/foo/bar", "/archive/2024", "/nonexistent"] {
            let matched = routes.resolve(path);
            assert_eq!(*matched.view, Page::Home, "path {path}");
            assert!(matched.is_fallback, "path {path}");
            assert_eq!(matched.index, 2);
        }
    }

    #[test]
    fn test_first_match_wins() {
        let routes = RouteTable::builder()
            .route("/entries/:id", Page::Entry)
            .route("/entries/latest", Page::Archive)
            .fallback(Page::Home);
        let matched = routes.resolve("/entries/latest");
        assert_eq!(*matched.view, Page::Entry);
        assert_eq!(matched.params.get("id").map(String::as_str), Some("latest"));
    }

    #[test]
    fn test_splat_captures_remainder() {
        let routes = RouteTable::builder()
            .route("/docs/*", Page::Docs)
            .fallback(Page::Home);

        let matched = routes.resolve("/docs/guide/intro");
        assert_eq!(*matched.view, Page::Docs);
        assert_eq!(
            matched.params.get(SPLAT_KEY).map(String::as_str),
            Some("guide/intro")
        );

        let bare = routes.resolve("/docs");
        assert_eq!(*bare.view, Page::Docs);
        assert_eq!(bare.params.get(SPLAT_KEY).map(String::as_str), Some(""));
    }

    #[test]
    fn test_param_requires_segment() {
        let routes = RouteTable::builder()
            .route("/entries/:id", Page::Entry)
            .fallback(Page::Home);
        assert!(routes.resolve("/entries").is_fallback);
        assert!(routes.resolve("/entries/1/extra").is_fallback);
    }

    #[test]
    fn test_pattern_parsing_is_lenient() {
        let pattern = Pattern::parse("archive//items/");
        assert_eq!(pattern.as_str(), "/archive/items");
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Static("archive".into()),
                Segment::Static("items".into())
            ]
        );

        let inner_star = Pattern::parse("/a/*/b");
        assert_eq!(inner_star.segments()[1], Segment::Static("*".into()));

        let bare_colon = Pattern::parse("/:");
        assert_eq!(bare_colon.segments(), &[Segment::Static(":".into())]);
    }

    #[test]
    fn test_table_ends_with_wildcard() {
        let routes = shell_routes();
        assert_eq!(routes.len(), 3);
        assert_eq!(routes.routes().last().map(|r| &r.matcher), Some(&Matcher::Wildcard));
        assert_eq!(*routes.fallback(), Page::Home);
        let rendered: Vec<String> = routes.routes().iter().map(|r| r.matcher.to_string()).collect();
        assert_eq!(rendered, vec!["/", "/archive", "*"]);
    }
}
