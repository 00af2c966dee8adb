//! # Router Module
//!
//! The router module provides route registration and path resolution for tinyroute.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Normalizing paths into segments ([`segment`])
//! - Building one segment trie per HTTP method (GET, POST, PUT, DELETE)
//! - Rejecting duplicate routes and conflicting parameter names at registration
//! - Matching incoming request paths and extracting path parameters
//!
//! ## Route Patterns
//!
//! Patterns are `/`-separated segments. A segment of the exact shape `{name}`
//! (a letter followed by letters, digits or underscores) is a parameter; every
//! other segment is a literal.
//!
//! ```text
//! /users            literal, literal
//! /users/{id}       literal, parameter "id"
//! /users/{id}/posts literal, parameter "id", literal
//! ```
//!
//! A trie level holds any number of literal children but at most one
//! parameter child, so `/a/{x}` and `/a/{y}` cannot both be registered.
//!
//! ## Matching
//!
//! Resolution walks the tree one segment at a time. A literal child always
//! wins over the parameter child, and there is no backtracking: with
//! `/users/me` and `/users/{id}` registered, `/users/me` never binds `id`.
//!
//! ```rust
//! use http::Method;
//! use tinyroute::router::{RouteMethod, Router};
//!
//! let mut router: Router<&str> = Router::new();
//! router.register(RouteMethod::Get, "/users/me", "me")?;
//! router.register(RouteMethod::Get, "/users/{id}", "by_id")?;
//!
//! assert_eq!(*router.resolve(&Method::GET, "/users/me").unwrap().handler, "me");
//! assert!(router.resolve(&Method::POST, "/users/me").is_none());
//! # Ok::<(), tinyroute::router::RouteError>(())
//! ```
//!
//! ## Performance
//!
//! Matching is O(k) in the number of path segments and allocates only the
//! captured parameter values (names are shared `Arc<str>` from the tree).

mod core;
mod radix;
mod segment;
#[cfg(test)]
mod tests;

pub use core::{
    ParamVec, RouteError, RouteMatch, RouteMethod, Router, UnsupportedMethod, MAX_INLINE_PARAMS,
};
pub use segment::{segment, Segment};
