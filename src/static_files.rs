//! Static file serving rooted at a base directory.

use crate::dispatcher::not_found_body;
use crate::server::{ContentType, Response, ResponseError};
use http::StatusCode;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Maps URL paths onto files below a base directory.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    base_dir: PathBuf,
}

impl StaticFiles {
    pub fn new<P: Into<PathBuf>>(base: P) -> Self {
        Self {
            base_dir: base.into(),
        }
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Translate `url_path` into a filesystem path under the base directory.
    ///
    /// Returns `None` for anything that could escape the base: `..`,
    /// absolute components or drive prefixes.
    #[must_use]
    pub fn map_path(&self, url_path: &str) -> Option<PathBuf> {
        let mut pb = self.base_dir.clone();
        for comp in Path::new(url_path.trim_start_matches('/')).components() {
            match comp {
                Component::Normal(s) => pb.push(s),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(pb)
    }

    /// Send the file behind `url_path`, or the 404 page for `request_path` if
    /// there is none.
    ///
    /// # Errors
    ///
    /// Returns the [`ResponseError`] from writing the response, e.g.
    /// [`ResponseError::Io`] if the file vanished while being read.
    pub fn serve(
        &self,
        url_path: &str,
        request_path: &str,
        res: &mut Response,
    ) -> Result<(), ResponseError> {
        let outcome = match self.map_path(url_path) {
            Some(path) => res.send_file(path),
            None => Err(ResponseError::NotAFile {
                path: PathBuf::from(url_path),
            }),
        };
        match outcome {
            Err(ResponseError::NotAFile { path }) => {
                debug!(path = %path.display(), "Static file not found");
                res.send(
                    StatusCode::NOT_FOUND,
                    ContentType::PlainText,
                    not_found_body(request_path),
                )
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_map_path_prevents_traversal() {
        let sf = StaticFiles::new("tests/staticdata");
        assert!(sf.map_path("../Cargo.toml").is_none());
        assert!(sf.map_path("a/../../Cargo.toml").is_none());
        assert_eq!(
            sf.map_path("/./css/site.css"),
            Some(PathBuf::from("tests/staticdata/css/site.css"))
        );
    }

    #[test]
    fn test_serve_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hello.txt"), "Hello\n").unwrap();
        let sf = StaticFiles::new(dir.path());

        let mut res = Response::new();
        sf.serve("hello.txt", "/files/hello.txt", &mut res).unwrap();
        let sent = res.into_sent().unwrap();
        assert_eq!(sent.status, StatusCode::OK);
        assert_eq!(sent.content_type, Some(ContentType::PlainText));
        assert_eq!(sent.body, b"Hello\n");
    }

    #[test]
    fn test_serve_missing_or_escaping_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let sf = StaticFiles::new(dir.path());

        for url in ["missing.png", "sub", "../etc/passwd"] {
            let request_path = format!("/files/{url}");
            let mut res = Response::new();
            sf.serve(url, &request_path, &mut res).unwrap();
            let sent = res.into_sent().unwrap();
            assert_eq!(sent.status, StatusCode::NOT_FOUND);
            assert_eq!(sent.body, not_found_body(&request_path).into_bytes());
        }
    }
}
