//! Dispatcher core module - resolve, bind, invoke.

use crate::router::Router;
use crate::server::{ContentType, Request, Response, SentResponse};
use http::StatusCode;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tracing::{debug, error, info, info_span, warn};

/// What a handler returns. `Err` turns into a 500 unless the handler already
/// committed a response.
pub type HandlerResult = anyhow::Result<()>;

/// A registered route handler.
///
/// Handlers are plain closures taking the request and the single-shot
/// response writer. They run on the connection's coroutine.
pub type Handler = Arc<dyn Fn(&Request, &mut Response) -> HandlerResult + Send + Sync>;

/// Router shared between the dispatcher and anyone registering late routes.
///
/// Requests take the read lock only for the duration of the lookup; the lock
/// is released before the handler runs.
pub type SharedRouter = Arc<RwLock<Router>>;

/// Body of the fixed not-found response.
#[must_use]
pub fn not_found_body(path: &str) -> String {
    format!("404: Page '{path}' not found!")
}

/// The response emitted when no route matches.
#[must_use]
pub fn not_found(path: &str) -> SentResponse {
    SentResponse {
        status: StatusCode::NOT_FOUND,
        content_type: Some(ContentType::PlainText),
        body: not_found_body(path).into_bytes(),
    }
}

fn internal_error(message: &str) -> SentResponse {
    SentResponse {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        content_type: Some(ContentType::Json),
        body: serde_json::json!({ "error": message })
            .to_string()
            .into_bytes(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

/// Routes requests to their handlers.
///
/// Cheap to clone: every clone shares the same router.
#[derive(Clone)]
pub struct Dispatcher {
    router: SharedRouter,
}

impl Dispatcher {
    /// Publish a fully built router for request handling.
    #[must_use]
    pub fn new(router: Router) -> Self {
        router.log_routes();
        Self {
            router: Arc::new(RwLock::new(router)),
        }
    }

    /// Dispatch against a router that is shared with other owners.
    #[must_use]
    pub fn from_shared(router: SharedRouter) -> Self {
        Self { router }
    }

    /// Handle on the shared router, e.g. for registering routes after the
    /// server started. Writers block readers only while they hold the lock.
    #[must_use]
    pub fn router(&self) -> SharedRouter {
        Arc::clone(&self.router)
    }

    /// Resolve `req`, run its handler and return the committed response.
    ///
    /// Never fails: a missing route becomes the 404 text response, handler
    /// errors and panics become a 500 JSON error.
    pub fn dispatch(&self, mut req: Request) -> SentResponse {
        let span = info_span!(
            "request",
            request_id = %req.request_id(),
            method = %req.method(),
            path = %req.path(),
        );
        let _enter = span.enter();
        let start = Instant::now();

        let router = match self.router.read() {
            Ok(router) => router,
            Err(_) => {
                error!("Router lock poisoned");
                return internal_error("Router unavailable");
            }
        };
        let resolved = router
            .resolve(req.method(), req.path())
            .map(|m| (Arc::clone(m.handler), m.pattern.to_owned(), m.path_params));
        // handlers may take the write lock to register routes
        drop(router);

        let Some((handler, pattern, params)) = resolved else {
            info!(
                status = StatusCode::NOT_FOUND.as_u16(),
                duration_us = start.elapsed().as_micros(),
                "No route matched"
            );
            return not_found(req.path());
        };

        debug!(pattern = %pattern, path_params = ?params, "Route matched");
        req.set_params(params);

        let mut res = Response::new();
        let outcome = catch_unwind(AssertUnwindSafe(|| handler(&req, &mut res)));
        let sent = match (outcome, res.into_sent()) {
            (Ok(Ok(())), Some(sent)) => sent,
            (Ok(Ok(())), None) => {
                warn!("Handler returned without sending a response");
                internal_error("Handler sent no response")
            }
            (Ok(Err(e)), sent) => {
                error!(error = %e, "Handler failed");
                sent.unwrap_or_else(|| internal_error("Handler failed"))
            }
            (Err(panic), sent) => {
                error!(panic = %panic_message(panic.as_ref()), "Handler panicked");
                sent.unwrap_or_else(|| internal_error("Handler panicked"))
            }
        };

        info!(
            pattern = %pattern,
            status = sent.status.as_u16(),
            duration_us = start.elapsed().as_micros(),
            "Request completed"
        );
        sent
    }
}
