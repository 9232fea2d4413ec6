//! HTTP response building module
//!
//! Builders for the response shapes the dispatcher produces. Construction
//! failures never panic; they degrade to a logged minimal 500.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Build a 200 HTML response.
pub fn html_response(content: impl Into<Bytes>) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Full::new(content.into()))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            minimal_500()
        })
}

/// Build a JSON response from any serializable payload.
pub fn json_response<T: Serialize>(status: StatusCode, payload: &T) -> Response<Full<Bytes>> {
    let body = match serde_json::to_vec(payload) {
        Ok(body) => body,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response payload: {e}"));
            return minimal_500();
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            minimal_500()
        })
}

/// Build a plain-text response for status and error bodies.
pub fn plain_response(status: StatusCode, content: impl Into<Bytes>) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(content.into()))
        .unwrap_or_else(|e| {
            log_build_error("plain", &e);
            minimal_500()
        })
}

/// Build a 200 asset response with cache validators attached.
pub fn asset_response(
    content: Vec<u8>,
    content_type: &'static str,
    etag: &str,
) -> Response<Full<Bytes>> {
    let content_length = content.len();

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600")
        .body(Full::new(Bytes::from(content)))
        .unwrap_or_else(|e| {
            log_build_error("asset", &e);
            minimal_500()
        })
}

/// Build a 304 Not Modified revalidation hit.
pub fn not_modified_response(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            minimal_500()
        })
}

/// Last-resort response when a builder itself fails.
fn minimal_500() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(b"500 Internal Server Error")));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

/// Log response build error
fn log_build_error(kind: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {kind} response: {error}"));
}
