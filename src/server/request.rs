use crate::ids::{RequestId, REQUEST_ID_HEADER};
use crate::router::ParamVec;
use http::Method;
use serde::de::DeserializeOwned;
use smallvec::SmallVec;
use std::io::Cursor;
use std::sync::Arc;

/// Maximum inline headers before heap allocation.
/// Most requests carry ≤16 headers.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage. Names are kept as received; lookups are
/// case-insensitive.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Request handed to a route handler.
///
/// Built by [`AppService`](super::AppService) from the raw connection data, or
/// directly with [`Request::new`] and the `with_*` builders in tests. Path
/// parameters are filled in by the dispatcher after the route is resolved.
#[derive(Debug, Clone)]
pub struct Request {
    request_id: RequestId,
    method: Method,
    path: String,
    query: Option<String>,
    headers: HeaderVec,
    body: Vec<u8>,
    params: ParamVec,
}

impl Request {
    /// Create a request from a method and a raw request target.
    ///
    /// Anything after the first `?` is kept verbatim as the query and never
    /// takes part in routing.
    #[must_use]
    pub fn new(method: Method, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path.to_owned(), Some(query.to_owned())),
            None => (target.to_owned(), None),
        };
        Self {
            request_id: RequestId::new(),
            method,
            path,
            query,
            headers: HeaderVec::new(),
            body: Vec::new(),
            params: ParamVec::new(),
        }
    }

    /// Append a header. An `x-request-id` header carrying a valid ULID becomes
    /// the request id.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if name.eq_ignore_ascii_case(REQUEST_ID_HEADER) {
            self.request_id = RequestId::from_header_or_new(Some(&value));
        }
        self.headers.push((Arc::from(name), value));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub(crate) fn set_params(&mut self, params: ParamVec) {
        self.params = params;
    }

    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path without the query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw query string, if the target had one. It is not parsed.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Get a header by name (case-insensitive per RFC 7230).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderVec {
        &self.headers
    }

    /// Reader over the request body.
    #[must_use]
    pub fn body(&self) -> Cursor<&[u8]> {
        Cursor::new(self.body.as_slice())
    }

    #[must_use]
    pub fn body_bytes(&self) -> &[u8] {
        &self.body
    }

    /// Deserialize the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    /// Get a path parameter by name.
    ///
    /// Uses "last write wins" semantics when a pattern repeats a name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// All path parameters bound by the matched route, in path order.
    #[must_use]
    pub fn params(&self) -> &ParamVec {
        &self.params
    }
}
