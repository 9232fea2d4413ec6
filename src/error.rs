//! Request-level error taxonomy.
//!
//! Everything here is recovered at the dispatcher boundary and turned into
//! the matching status code; none of these conditions reaches the
//! connection task or the process.

use crate::http::response::plain_response;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use thiserror::Error;

/// A request that cannot be answered successfully.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Body present but undecodable under its declared content type.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Body larger than the configured limit.
    #[error("payload of {size} bytes exceeds limit of {limit}")]
    PayloadTooLarge { size: u64, limit: u64 },

    /// Nothing matched the route table or the asset root.
    #[error("no route for {method} {path}")]
    NotFound { method: String, path: String },

    /// Unexpected failure inside a handler.
    #[error("internal failure: {0}")]
    Internal(String),
}

impl RequestError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The plain-text response the dispatcher sends for this failure.
    #[must_use]
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let status = self.status();
        let body = match status.canonical_reason() {
            Some(reason) => format!("{} {reason}", status.as_u16()),
            None => status.as_u16().to_string(),
        };
        plain_response(status, body)
    }
}
