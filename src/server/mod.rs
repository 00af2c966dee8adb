//! # Server Module
//!
//! The thin shell around the router: a coroutine-per-connection HTTP listener
//! built on `may_minihttp`, the [`Request`] handed to handlers and the
//! single-shot [`Response`] they write to.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{HeaderVec, Request, MAX_INLINE_HEADERS};
pub use response::{ContentType, Response, ResponseError, SentResponse};
pub use service::AppService;
