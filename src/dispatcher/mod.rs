//! # Dispatcher Module
//!
//! The dispatcher turns a parsed [`Request`](crate::server::Request) into a
//! committed response.
//!
//! ## Request Flow
//!
//! 1. Look up the method's route tree and resolve the request path
//! 2. On a miss, answer `404` with the body `404: Page '<path>' not found!`
//! 3. On a hit, bind the captured path parameters onto the request
//! 4. Invoke the handler with the request and a single-shot
//!    [`Response`](crate::server::Response)
//! 5. Return whatever the handler committed
//!
//! ## Error Handling
//!
//! The dispatcher never fails:
//! - Handler `Err` results are logged and answered with a 500 JSON error
//! - Handler panics are caught and answered with a 500 JSON error
//! - A handler that returns without sending anything gets a 500 as well
//!
//! If the handler had already committed a response before failing, that
//! response is kept.
//!
//! ## Registration
//!
//! ```rust
//! use http::{Method, StatusCode};
//! use tinyroute::dispatcher::Dispatcher;
//! use tinyroute::router::Router;
//! use tinyroute::server::Request;
//!
//! let mut router: Router = Router::new();
//! router.get("/pets/{id}", |req, res| {
//!     res.send_text(format!("pet {}", req.param("id").unwrap_or_default()))?;
//!     Ok(())
//! })?;
//!
//! let dispatcher = Dispatcher::new(router);
//! let sent = dispatcher.dispatch(Request::new(Method::GET, "/pets/7"));
//! assert_eq!(sent.status, StatusCode::OK);
//! assert_eq!(sent.body, b"pet 7");
//! # Ok::<(), tinyroute::router::RouteError>(())
//! ```

mod core;

pub use core::{not_found, not_found_body, Dispatcher, Handler, HandlerResult, SharedRouter};
