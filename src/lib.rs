//! # tinyroute
//!
//! **tinyroute** is a small HTTP request router for Rust: a per-method segment trie with literal
//! segments and `{name}` parameters, plus a thin coroutine-powered server shell built on
//! `may_minihttp`.
//!
//! ## Overview
//!
//! Handlers are registered against a method and a pattern such as `/users/{id}/posts`. At request
//! time the path is split into segments and walked down the method's trie, preferring literal
//! children over the parameter child at every level, without backtracking. A match hands the
//! handler the request (with its captured parameters) and a single-shot response writer; a miss
//! produces a fixed `404: Page '<path>' not found!` page.
//!
//! ## Architecture
//!
//! - **[`router`]** - Path segmentation, the per-method segment trie and registration conflicts
//! - **[`dispatcher`]** - Resolve, bind parameters, invoke the handler, recover from failures
//! - **[`server`]** - HTTP server on `may_minihttp` with the request/response types
//! - **[`static_files`]** - Traversal-safe file serving below a base directory
//! - **[`config`]** - Server configuration from files and `TINYROUTE_*` variables
//! - **[`logging`]** - `tracing` subscriber setup for the binary
//! - **[`cli`]** - The `tinyroute` command line (demo server, route listing, resolution)
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Server as HttpServer<br/>(may_minihttp)
//!     participant Dispatcher
//!     participant Router as Router<br/>(segment trie)
//!     participant Handler
//!
//!     Client->>Server: GET /users/42
//!     Server->>Dispatcher: dispatch(Request)
//!     Dispatcher->>Router: resolve(GET, "/users/42")
//!     Router->>Router: segment → ["users", "42"]
//!     Router->>Router: literal "users", then {id} = "42"
//!
//!     alt No Route Match
//!         Router-->>Dispatcher: None
//!         Dispatcher-->>Client: 404: Page '/users/42' not found!
//!     end
//!
//!     Router-->>Dispatcher: RouteMatch(handler, {id: "42"})
//!     Dispatcher->>Handler: handler(&Request, &mut Response)
//!
//!     alt Handler Fails or Panics
//!         Dispatcher-->>Client: 500 {"error": ...}
//!     end
//!
//!     Handler-->>Dispatcher: response sent
//!     Dispatcher-->>Server: SentResponse
//!     Server-->>Client: HTTP Response
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use tinyroute::{AppService, HttpServer, Router};
//!
//! let mut router: Router = Router::new();
//! router
//!     .get("/", |_req, res| Ok(res.send_text("home")?))?
//!     .get("/users/{id}", |req, res| {
//!         let id = req.param("id").unwrap_or_default();
//!         Ok(res.send_json(&serde_json::json!({ "id": id }))?)
//!     })?;
//!
//! let handle = HttpServer(AppService::new(router)).start("127.0.0.1:8080")?;
//! handle.join().ok();
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Runtime Considerations
//!
//! The server uses the `may` coroutine runtime, not tokio or async-std:
//!
//! - Each connection is served on a coroutine and handlers run inside it
//! - Stack size is configurable via `TINYROUTE_STACK_SIZE`
//! - Blocking operations should use `may`'s blocking facilities

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod ids;
pub mod logging;
pub mod router;
pub mod server;
pub mod static_files;

pub use dispatcher::{Dispatcher, Handler, HandlerResult};
pub use router::{segment, RouteError, RouteMatch, RouteMethod, Router};
pub use server::{AppService, HttpServer, Request, Response, ResponseError};
