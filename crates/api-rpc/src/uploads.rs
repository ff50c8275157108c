//! Upload Serving Middleware
//!
//! Serves stored background images as `GET <prefix>/<file>` from the same
//! listener as the RPC endpoint. Every other request passes through.

use http::header::{CACHE_CONTROL, CONTENT_TYPE};
use http::{HeaderValue, Method, StatusCode};
use jsonrpsee::core::BoxError;
use jsonrpsee::server::{HttpBody, HttpRequest, HttpResponse};
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{debug, warn};

/// Layer that applies [`ServeUploads`]
#[derive(Debug, Clone)]
pub struct ServeUploadsLayer {
    prefix: Arc<str>,
    dir: Arc<Path>,
}

impl ServeUploadsLayer {
    pub fn new(prefix: &str, dir: impl Into<PathBuf>) -> Self {
        let prefix = format!("/{}", prefix.trim_matches('/'));
        Self {
            prefix: Arc::from(prefix),
            dir: Arc::from(dir.into()),
        }
    }
}

impl<S> Layer<S> for ServeUploadsLayer {
    type Service = ServeUploads<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ServeUploads {
            inner,
            prefix: self.prefix.clone(),
            dir: self.dir.clone(),
        }
    }
}

/// Answer `GET` requests under the upload prefix from the upload directory
#[derive(Debug, Clone)]
pub struct ServeUploads<S> {
    inner: S,
    prefix: Arc<str>,
    dir: Arc<Path>,
}

impl<S, B> Service<HttpRequest<B>> for ServeUploads<S>
where
    S: Service<HttpRequest<B>, Response = HttpResponse>,
    S::Error: Into<BoxError> + 'static,
    S::Future: Send + 'static,
{
    type Response = HttpResponse;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, req: HttpRequest<B>) -> Self::Future {
        if req.method() == Method::GET {
            if let Some(rest) = strip_upload_prefix(&self.prefix, req.uri().path()) {
                let target = safe_file_name(rest).map(|name| self.dir.join(name));
                return Box::pin(async move { Ok(serve_file(target).await) });
            }
        }

        let fut = self.inner.call(req);
        Box::pin(async move { fut.await.map_err(Into::into) })
    }
}

/// Remainder of `path` after `prefix/`, if the request targets uploads
fn strip_upload_prefix<'a>(prefix: &str, path: &'a str) -> Option<&'a str> {
    path.strip_prefix(prefix)?.strip_prefix('/')
}

/// A single plain file name; rejects traversal, nesting and hidden files
fn safe_file_name(name: &str) -> Option<&str> {
    let plain = !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && !name.contains("%2");
    plain.then_some(name)
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

async fn serve_file(target: Option<PathBuf>) -> HttpResponse {
    let Some(path) = target else {
        return status_only(StatusCode::NOT_FOUND);
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            debug!(path = %path.display(), bytes = bytes.len(), "Serving upload");
            let mut res = HttpResponse::new(HttpBody::from(bytes));
            let headers = res.headers_mut();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type_for(&path)));
            headers.insert(CACHE_CONTROL, HeaderValue::from_static("public, max-age=3600"));
            res
        }
        Err(e) if e.kind() == ErrorKind::NotFound => status_only(StatusCode::NOT_FOUND),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read upload");
            status_only(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn status_only(status: StatusCode) -> HttpResponse {
    let mut res = HttpResponse::new(HttpBody::empty());
    *res.status_mut() = status;
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matching() {
        assert_eq!(strip_upload_prefix("/uploads", "/uploads/bg-1.png"), Some("bg-1.png"));
        assert_eq!(strip_upload_prefix("/uploads", "/uploadsx/bg-1.png"), None);
        assert_eq!(strip_upload_prefix("/uploads", "/"), None);
        assert_eq!(ServeUploadsLayer::new("uploads/", "/tmp").prefix.as_ref(), "/uploads");
    }

    #[test]
    fn test_only_plain_names_are_served() {
        assert_eq!(safe_file_name("bg-1-abc.png"), Some("bg-1-abc.png"));
        assert_eq!(safe_file_name(""), None);
        assert_eq!(safe_file_name(".bg-1.png.part"), None);
        assert_eq!(safe_file_name("../secret"), None);
        assert_eq!(safe_file_name("a/b.png"), None);
        assert_eq!(safe_file_name("..%2fsecret"), None);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = std::env::temp_dir().join(format!("slotboard-uploads-{}", std::process::id()));
        let res = serve_file(Some(dir.join("bg-missing.png"))).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(serve_file(None).await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_existing_file_carries_image_type() {
        let dir = std::env::temp_dir().join(format!("slotboard-serve-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("bg-1-abc.jpg");
        tokio::fs::write(&path, [0xFF, 0xD8, 0xFF, 0x00]).await.unwrap();

        let res = serve_file(Some(path)).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[CONTENT_TYPE], "image/jpeg");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
