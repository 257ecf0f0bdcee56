use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

const CONTENT_MD5: &str = "content-md5";

/// A complete HTTP response: status, headers and the body bytes exactly as
/// received.
///
/// ```rust
/// use mws_core::http_client::RawResponse;
/// use reqwest::header::{CONTENT_TYPE, HeaderValue};
///
/// let response = RawResponse::new(200, Default::default(), "a\tb\n")
///     .with_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
/// assert_eq!(response.content_type(), Some("text/plain"));
/// assert_eq!(response.body(), b"a\tb\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: u16,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response from its parts.
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Adds a header, replacing any previous value.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is exactly 200.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// All response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Looks up a header value by name (case-insensitive).
    ///
    /// Values that are not visible ASCII are treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The `Content-Type` header.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// The `Content-MD5` header.
    pub fn content_md5(&self) -> Option<&str> {
        self.header(CONTENT_MD5)
    }

    /// Body bytes as received.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consumes the response, returning the body.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}
