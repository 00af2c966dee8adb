use super::request::Request;
use super::response::write_response;
use crate::dispatcher::{Dispatcher, SharedRouter};
use crate::router::Router;
use http::Method;
use may_minihttp::{HttpService, Request as RawRequest, Response as RawResponse};
use std::io::{self, Read};
use tracing::warn;

/// The `may_minihttp` service: parses the raw request, hands it to the
/// [`Dispatcher`] and writes the committed response back.
#[derive(Clone)]
pub struct AppService {
    pub dispatcher: Dispatcher,
}

impl AppService {
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self {
            dispatcher: Dispatcher::new(router),
        }
    }

    #[must_use]
    pub fn from_dispatcher(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Handle on the shared router for late registration.
    #[must_use]
    pub fn router(&self) -> SharedRouter {
        self.dispatcher.router()
    }
}

/// Convert the raw request into an owned [`Request`].
fn parse_request(raw: RawRequest, method: Method) -> io::Result<Request> {
    let mut req = Request::new(method, raw.path());
    for header in raw.headers() {
        req = req.with_header(header.name, String::from_utf8_lossy(header.value));
    }
    let mut body = Vec::new();
    raw.body().read_to_end(&mut body)?;
    Ok(req.with_body(body))
}

impl HttpService for AppService {
    fn call(&mut self, req: RawRequest, res: &mut RawResponse) -> io::Result<()> {
        let Ok(method) = Method::from_bytes(req.method().as_bytes()) else {
            warn!(method = %req.method(), "Invalid HTTP method token");
            res.status_code(400, "Bad Request");
            return Ok(());
        };
        let req = parse_request(req, method)?;
        let sent = self.dispatcher.dispatch(req);
        write_response(res, sent);
        Ok(())
    }
}
