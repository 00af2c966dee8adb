use http::StatusCode;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Content types the response writer knows how to label.
///
/// File responses pick one from the file extension; anything unrecognized is
/// served as `text/plain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    PlainText,
    Html,
    Css,
    JavaScript,
    Json,
    Apng,
    Bmp,
    Gif,
    Icon,
    Jpeg,
    Png,
    Svg,
    Tiff,
    Webp,
}

impl ContentType {
    /// Look up a file extension (without the dot). Case-sensitive, as the
    /// table is keyed by lowercase extensions.
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "json" => ContentType::Json,
            "html" => ContentType::Html,
            "css" => ContentType::Css,
            "js" => ContentType::JavaScript,
            "apng" => ContentType::Apng,
            "bmp" => ContentType::Bmp,
            "gif" => ContentType::Gif,
            "ico" | "cur" => ContentType::Icon,
            "jpeg" | "jpg" | "jfif" | "pjpeg" | "pjp" => ContentType::Jpeg,
            "png" => ContentType::Png,
            "svg" => ContentType::Svg,
            "tiff" | "tif" => ContentType::Tiff,
            "webp" => ContentType::Webp,
            _ => ContentType::PlainText,
        }
    }

    /// Content type for a file path, from the text after its last `.`.
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map_or(ContentType::PlainText, ContentType::from_extension)
    }

    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            ContentType::PlainText => "text/plain",
            ContentType::Html => "text/html",
            ContentType::Css => "text/css",
            ContentType::JavaScript => "text/javascript",
            ContentType::Json => "application/json",
            ContentType::Apng => "image/apng",
            ContentType::Bmp => "image/bmp",
            ContentType::Gif => "image/gif",
            ContentType::Icon => "image/x-ico",
            ContentType::Jpeg => "image/jpeg",
            ContentType::Png => "image/png",
            ContentType::Svg => "image/svg+xml",
            ContentType::Tiff => "image/tiff",
            ContentType::Webp => "image/webp",
        }
    }

    /// Full header line, as `may_minihttp` takes `&'static str` headers.
    #[must_use]
    pub fn header_line(self) -> &'static str {
        match self {
            ContentType::PlainText => "Content-Type: text/plain",
            ContentType::Html => "Content-Type: text/html",
            ContentType::Css => "Content-Type: text/css",
            ContentType::JavaScript => "Content-Type: text/javascript",
            ContentType::Json => "Content-Type: application/json",
            ContentType::Apng => "Content-Type: image/apng",
            ContentType::Bmp => "Content-Type: image/bmp",
            ContentType::Gif => "Content-Type: image/gif",
            ContentType::Icon => "Content-Type: image/x-ico",
            ContentType::Jpeg => "Content-Type: image/jpeg",
            ContentType::Png => "Content-Type: image/png",
            ContentType::Svg => "Content-Type: image/svg+xml",
            ContentType::Tiff => "Content-Type: image/tiff",
            ContentType::Webp => "Content-Type: image/webp",
        }
    }
}

/// Failure while producing a response.
#[derive(Debug)]
pub enum ResponseError {
    /// A response was already sent for this request
    AlreadySent,
    /// `send_file` was given something that is not a regular file
    NotAFile { path: PathBuf },
    /// Reading the file failed
    Io(io::Error),
    /// Serializing a JSON body failed
    Json(serde_json::Error),
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseError::AlreadySent => write!(f, "response already sent"),
            ResponseError::NotAFile { path } => {
                write!(f, "'{}' is not a regular file", path.display())
            }
            ResponseError::Io(e) => write!(f, "failed to read response file: {e}"),
            ResponseError::Json(e) => write!(f, "failed to serialize JSON body: {e}"),
        }
    }
}

impl std::error::Error for ResponseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResponseError::Io(e) => Some(e),
            ResponseError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ResponseError {
    fn from(e: io::Error) -> Self {
        ResponseError::Io(e)
    }
}

impl From<serde_json::Error> for ResponseError {
    fn from(e: serde_json::Error) -> Self {
        ResponseError::Json(e)
    }
}

/// Single-shot response writer handed to a route handler.
///
/// Exactly one of the `send*` methods may succeed per request; later calls
/// fail with [`ResponseError::AlreadySent`] and leave the first response in
/// place. Nothing is written to the socket until the handler returns.
#[derive(Debug, Default)]
pub struct Response {
    sent: Option<SentResponse>,
}

/// A response that has been committed by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentResponse {
    pub status: StatusCode,
    /// `None` for bodiless responses from [`Response::send_empty`]
    pub content_type: Option<ContentType>,
    pub body: Vec<u8>,
}

impl Response {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a response has been committed.
    #[must_use]
    pub fn is_sent(&self) -> bool {
        self.sent.is_some()
    }

    /// The committed response, if any.
    #[must_use]
    pub fn sent(&self) -> Option<&SentResponse> {
        self.sent.as_ref()
    }

    #[must_use]
    pub fn into_sent(self) -> Option<SentResponse> {
        self.sent
    }

    /// Commit a response with an explicit status, content type and body.
    ///
    /// # Errors
    ///
    /// [`ResponseError::AlreadySent`] if a response was already committed.
    pub fn send(
        &mut self,
        status: StatusCode,
        content_type: ContentType,
        body: impl Into<Vec<u8>>,
    ) -> Result<(), ResponseError> {
        self.commit(SentResponse {
            status,
            content_type: Some(content_type),
            body: body.into(),
        })
    }

    /// Status-only response without a body.
    ///
    /// # Errors
    ///
    /// [`ResponseError::AlreadySent`] if a response was already committed.
    pub fn send_empty(&mut self, status: StatusCode) -> Result<(), ResponseError> {
        self.commit(SentResponse {
            status,
            content_type: None,
            body: Vec::new(),
        })
    }

    /// `200 OK` with a `text/plain` body.
    ///
    /// # Errors
    ///
    /// [`ResponseError::AlreadySent`] if a response was already committed.
    pub fn send_text(&mut self, text: impl Into<String>) -> Result<(), ResponseError> {
        self.send(StatusCode::OK, ContentType::PlainText, text.into())
    }

    /// `200 OK` with `value` serialized as JSON.
    ///
    /// # Errors
    ///
    /// [`ResponseError::Json`] if serialization fails,
    /// [`ResponseError::AlreadySent`] if a response was already committed.
    pub fn send_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ResponseError> {
        self.ensure_unsent()?;
        let body = serde_json::to_vec(value)?;
        self.send(StatusCode::OK, ContentType::Json, body)
    }

    /// `200 OK` with the contents of the file at `path`, labelled by its
    /// extension.
    ///
    /// # Errors
    ///
    /// [`ResponseError::NotAFile`] if `path` is missing or not a regular file,
    /// [`ResponseError::Io`] if reading fails,
    /// [`ResponseError::AlreadySent`] if a response was already committed.
    pub fn send_file(&mut self, path: impl AsRef<Path>) -> Result<(), ResponseError> {
        self.ensure_unsent()?;
        let path = path.as_ref();
        let is_file = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
        if !is_file {
            return Err(ResponseError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        let body = fs::read(path)?;
        self.send(StatusCode::OK, ContentType::for_path(path), body)
    }

    fn ensure_unsent(&self) -> Result<(), ResponseError> {
        if self.is_sent() {
            return Err(ResponseError::AlreadySent);
        }
        Ok(())
    }

    fn commit(&mut self, response: SentResponse) -> Result<(), ResponseError> {
        self.ensure_unsent()?;
        self.sent = Some(response);
        Ok(())
    }
}

/// Reason phrase for the status line; `may_minihttp` needs a `&'static str`.
pub(crate) fn status_reason(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown")
}

/// Copy a committed response onto the wire-level `may_minihttp` response.
pub(crate) fn write_response(res: &mut may_minihttp::Response, sent: SentResponse) {
    res.status_code(usize::from(sent.status.as_u16()), status_reason(sent.status));
    if let Some(content_type) = sent.content_type {
        res.header(content_type.header_line());
    }
    res.body_vec(sent.body);
}
