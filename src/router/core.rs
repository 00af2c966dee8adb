//! Router core module - per-method route tables and the resolution hot path.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use http::Method;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

use super::radix::{InsertError, RouteNode};
use super::segment::segment;
use crate::dispatcher::Handler;

/// Maximum number of path parameters before heap allocation.
/// Most REST paths have ≤4 params (e.g. `/users/{id}/posts/{post_id}`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter bindings produced by a resolution.
///
/// Param names are `Arc<str>` shared with the route tree, so binding a name is
/// an atomic increment. Values are owned: they are per-request data.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// HTTP methods that own a route tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RouteMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl RouteMethod {
    /// Every routable method, in listing order.
    pub const ALL: [RouteMethod; 4] = [
        RouteMethod::Get,
        RouteMethod::Post,
        RouteMethod::Put,
        RouteMethod::Delete,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RouteMethod::Get => "GET",
            RouteMethod::Post => "POST",
            RouteMethod::Put => "PUT",
            RouteMethod::Delete => "DELETE",
        }
    }

    #[must_use]
    pub fn as_method(self) -> Method {
        match self {
            RouteMethod::Get => Method::GET,
            RouteMethod::Post => Method::POST,
            RouteMethod::Put => Method::PUT,
            RouteMethod::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a method has no route tree (PATCH, HEAD, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedMethod(pub String);

impl fmt::Display for UnsupportedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported HTTP method '{}'", self.0)
    }
}

impl std::error::Error for UnsupportedMethod {}

impl TryFrom<&Method> for RouteMethod {
    type Error = UnsupportedMethod;

    fn try_from(method: &Method) -> Result<Self, Self::Error> {
        match *method {
            Method::GET => Ok(RouteMethod::Get),
            Method::POST => Ok(RouteMethod::Post),
            Method::PUT => Ok(RouteMethod::Put),
            Method::DELETE => Ok(RouteMethod::Delete),
            _ => Err(UnsupportedMethod(method.to_string())),
        }
    }
}

impl FromStr for RouteMethod {
    type Err = UnsupportedMethod;

    /// Method names are case-sensitive, as on the wire.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(RouteMethod::Get),
            "POST" => Ok(RouteMethod::Post),
            "PUT" => Ok(RouteMethod::Put),
            "DELETE" => Ok(RouteMethod::Delete),
            other => Err(UnsupportedMethod(other.to_owned())),
        }
    }
}

/// Registration failure.
///
/// Both variants are setup-time errors: the route table is left unchanged and
/// the caller is expected to abort startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The pattern already terminates in a handler for this method.
    DuplicateRoute { method: RouteMethod, pattern: String },
    /// The pattern puts a parameter at a level that already has a
    /// differently-named parameter.
    ConflictingParameter {
        method: RouteMethod,
        pattern: String,
        /// Name of the parameter already registered at that level
        existing: String,
        /// Name the rejected pattern asked for
        requested: String,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::DuplicateRoute { method, pattern } => {
                write!(f, "duplicate route: {method} {pattern} is already registered")
            }
            RouteError::ConflictingParameter {
                method,
                pattern,
                existing,
                requested,
            } => write!(
                f,
                "conflicting parameter pattern in {method} {pattern}: \
                 '{{{requested}}}' cannot share a level with existing '{{{existing}}}'"
            ),
        }
    }
}

impl std::error::Error for RouteError {}

/// Result of successfully resolving a request path.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    /// Handler registered for the matched pattern
    pub handler: &'a H,
    /// The matched pattern, normalized to `/seg/{param}` form
    pub pattern: &'a str,
    /// Bindings for every parameter segment on the matched path, in order
    pub path_params: ParamVec,
}

impl<H> RouteMatch<'_, H> {
    /// Get a path parameter by name
    ///
    /// Uses "last write wins" semantics: if a pattern repeats a parameter name
    /// at different depths, the deepest binding is returned.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert path_params to a HashMap
    /// Note: This allocates - use get_path_param() in hot paths
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Per-method segment-trie router.
///
/// Each of GET, POST, PUT and DELETE owns an independent tree, so the same
/// pattern may be registered under several methods with different handlers
/// and even different parameter names.
///
/// Registration takes `&mut self`: build the table on one owner, then share
/// it (the server wraps it in `Arc<RwLock<_>>`).
///
/// # Example
///
/// ```
/// use http::Method;
/// use tinyroute::router::{RouteMethod, Router};
///
/// let mut router: Router<&str> = Router::new();
/// router
///     .register(RouteMethod::Get, "/users/me", "me")?
///     .register(RouteMethod::Get, "/users/{id}", "by_id")?;
///
/// let m = router.resolve(&Method::GET, "/users/42").unwrap();
/// assert_eq!(*m.handler, "by_id");
/// assert_eq!(m.get_path_param("id"), Some("42"));
/// # Ok::<(), tinyroute::router::RouteError>(())
/// ```
pub struct Router<H = Handler> {
    get: RouteNode<H>,
    post: RouteNode<H>,
    put: RouteNode<H>,
    delete: RouteNode<H>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes())
            .finish()
    }
}

impl<H> Router<H> {
    /// Create a router with four empty method trees.
    #[must_use]
    pub fn new() -> Self {
        Self {
            get: RouteNode::new(),
            post: RouteNode::new(),
            put: RouteNode::new(),
            delete: RouteNode::new(),
        }
    }

    fn tree(&self, method: RouteMethod) -> &RouteNode<H> {
        match method {
            RouteMethod::Get => &self.get,
            RouteMethod::Post => &self.post,
            RouteMethod::Put => &self.put,
            RouteMethod::Delete => &self.delete,
        }
    }

    fn tree_mut(&mut self, method: RouteMethod) -> &mut RouteNode<H> {
        match method {
            RouteMethod::Get => &mut self.get,
            RouteMethod::Post => &mut self.post,
            RouteMethod::Put => &mut self.put,
            RouteMethod::Delete => &mut self.delete,
        }
    }

    /// Register `handler` for `method` and `pattern`.
    ///
    /// # Errors
    ///
    /// - [`RouteError::DuplicateRoute`] if the pattern already has a handler
    /// - [`RouteError::ConflictingParameter`] if a parameter segment collides
    ///   with a differently-named parameter at the same level
    ///
    /// On error nothing is added to the table.
    pub fn register(
        &mut self,
        method: RouteMethod,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, RouteError> {
        let segments = segment(pattern);
        self.tree_mut(method)
            .insert(&segments, handler)
            .map_err(|e| match e {
                InsertError::Duplicate => RouteError::DuplicateRoute {
                    method,
                    pattern: pattern.to_owned(),
                },
                InsertError::Conflict {
                    existing,
                    requested,
                } => RouteError::ConflictingParameter {
                    method,
                    pattern: pattern.to_owned(),
                    existing,
                    requested,
                },
            })?;
        debug!(method = %method, pattern = %pattern, "Route registered");
        Ok(self)
    }

    /// Resolve a request against the tree for `method`.
    ///
    /// Returns `None` when the method has no tree, when the walk falls off the
    /// tree, or when it ends on a node without a handler.
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, H>> {
        let method = RouteMethod::try_from(method).ok()?;
        self.resolve_in(method, path)
    }

    /// Resolve against an already-classified method.
    #[must_use]
    pub fn resolve_in(&self, method: RouteMethod, path: &str) -> Option<RouteMatch<'_, H>> {
        let segments = segment(path);
        let mut path_params = ParamVec::new();
        let leaf = self.tree(method).search(&segments, &mut path_params)?;
        Some(RouteMatch {
            handler: &leaf.handler,
            pattern: &leaf.pattern,
            path_params,
        })
    }

    /// Every registered `(method, pattern)`, methods in [`RouteMethod::ALL`]
    /// order and patterns sorted with literals before parameters.
    #[must_use]
    pub fn routes(&self) -> Vec<(RouteMethod, String)> {
        let mut out = Vec::new();
        for method in RouteMethod::ALL {
            let mut patterns = Vec::new();
            self.tree(method)
                .collect_patterns(&mut Vec::new(), &mut patterns);
            out.extend(patterns.into_iter().map(|p| (method, p)));
        }
        out
    }

    /// Total number of registered routes across all methods.
    #[must_use]
    pub fn len(&self) -> usize {
        RouteMethod::ALL
            .iter()
            .map(|m| self.tree(*m).route_count())
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Log the routing table at `info` level.
    pub fn log_routes(&self) {
        let routes: Vec<String> = self
            .routes()
            .iter()
            .map(|(m, p)| format!("{m} {p}"))
            .collect();
        info!(
            routes_count = routes.len(),
            routes = ?routes,
            routing_algorithm = "segment_trie",
            "Routing table loaded"
        );
    }
}

impl Router<Handler> {
    /// Register a closure for GET.
    ///
    /// # Errors
    ///
    /// See [`Router::register`].
    pub fn get<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(&crate::server::Request, &mut crate::server::Response) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.register(RouteMethod::Get, pattern, Arc::new(handler))
    }

    /// Register a closure for POST.
    ///
    /// # Errors
    ///
    /// See [`Router::register`].
    pub fn post<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(&crate::server::Request, &mut crate::server::Response) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.register(RouteMethod::Post, pattern, Arc::new(handler))
    }

    /// Register a closure for PUT.
    ///
    /// # Errors
    ///
    /// See [`Router::register`].
    pub fn put<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(&crate::server::Request, &mut crate::server::Response) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.register(RouteMethod::Put, pattern, Arc::new(handler))
    }

    /// Register a closure for DELETE.
    ///
    /// # Errors
    ///
    /// See [`Router::register`].
    pub fn delete<F>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(&crate::server::Request, &mut crate::server::Response) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.register(RouteMethod::Delete, pattern, Arc::new(handler))
    }
}
