//! Untyped failure of an HTTP exchange.

use crate::http_client::RawResponse;
use std::fmt;

const BODY_PREVIEW_SIZE: usize = 200;

/// A non-200 response, kept whole so callers can inspect it.
///
/// This is the failure the fault classifier starts from. When no semantic
/// fault code can be extracted it is surfaced as-is through
/// [`Error::HttpStatus`](super::Error::HttpStatus).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpStatusError {
    response: RawResponse,
}

impl HttpStatusError {
    /// Wraps a failed response.
    pub fn new(response: RawResponse) -> Self {
        Self { response }
    }

    /// HTTP status code of the failed exchange.
    pub fn status(&self) -> u16 {
        self.response.status()
    }

    /// The full response.
    pub fn response(&self) -> &RawResponse {
        &self.response
    }

    /// Response body as received.
    pub fn body(&self) -> &[u8] {
        self.response.body()
    }

    /// Consumes the error, returning the response.
    pub fn into_response(self) -> RawResponse {
        self.response
    }
}

impl fmt::Display for HttpStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = String::from_utf8_lossy(self.body());
        let preview: String = body.chars().take(BODY_PREVIEW_SIZE).collect();
        if preview.trim().is_empty() {
            write!(f, "expected status 200, got {}", self.status())
        } else {
            write!(f, "expected status 200, got {}: {}", self.status(), preview.trim())
        }
    }
}

impl std::error::Error for HttpStatusError {}
