//! Path segmentation shared by route registration and resolution.
//!
//! Both sides of the router must agree on how a path is cut into segments,
//! otherwise a registered pattern could never be reached. Everything here is
//! pure and allocation-light: segments borrow from the input string.

use once_cell::sync::Lazy;
use regex::Regex;

/// Shape of a parameter segment: `{name}` where `name` starts with an ASCII
/// letter and continues with ASCII letters, digits or underscores.
static PARAM_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^\{([A-Za-z][A-Za-z0-9_]*)\}$").expect("parameter segment regex is valid")
});

/// Normalize a URL path into its ordered list of segments.
///
/// Exactly one leading and one trailing `/` are stripped before splitting on
/// `/`, so `/a/b/`, `a/b` and `/a/b` all yield `["a", "b"]`. The empty path
/// (and `/`) yields a single empty segment, which addresses the root route.
///
/// ```
/// use tinyroute::router::segment;
///
/// assert_eq!(segment("/a/b/"), vec!["a", "b"]);
/// assert_eq!(segment("/"), vec![""]);
/// ```
#[must_use]
pub fn segment(path: &str) -> Vec<&str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    path.split('/').collect()
}

/// A single route pattern segment, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Matched by exact string equality.
    Literal(&'a str),
    /// Matches any one segment and binds it under this name.
    Param(&'a str),
}

impl<'a> Segment<'a> {
    /// Classify a pattern segment.
    ///
    /// Anything that does not have the exact `{identifier}` shape is a
    /// literal, including `{}`, `{1st}` and `{a-b}`.
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        match PARAM_SEGMENT.captures(raw).and_then(|c| c.get(1)) {
            Some(name) => Segment::Param(name.as_str()),
            None => Segment::Literal(raw),
        }
    }

    /// Returns the parameter name if this is a parameter segment.
    #[must_use]
    pub fn param_name(&self) -> Option<&'a str> {
        match self {
            Segment::Param(name) => Some(name),
            Segment::Literal(_) => None,
        }
    }
}
