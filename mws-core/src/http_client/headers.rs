use super::raw::RawResponse;
use crate::charset::charset_from_content_type;

impl RawResponse {
    /// Charset named in the `Content-Type` header.
    pub fn content_charset(&self) -> Option<&str> {
        self.content_type().and_then(charset_from_content_type)
    }

    /// The `x-mws-request-id` header, quoted in support requests.
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-mws-request-id")
    }

    /// The `x-mws-timestamp` header.
    pub fn timestamp(&self) -> Option<&str> {
        self.header("x-mws-timestamp")
    }

    /// The `x-mws-response-context` header.
    pub fn response_context(&self) -> Option<&str> {
        self.header("x-mws-response-context")
    }

    /// Requests allowed in the current quota window.
    pub fn quota_max(&self) -> Option<u32> {
        self.header("x-mws-quota-max").and_then(parse_quota)
    }

    /// Requests left in the current quota window.
    pub fn quota_remaining(&self) -> Option<u32> {
        self.header("x-mws-quota-remaining").and_then(parse_quota)
    }

    /// When the quota window resets, as sent by the service.
    pub fn quota_resets_on(&self) -> Option<&str> {
        self.header("x-mws-quota-resetson")
    }
}

// Quotas are sent as decimals, e.g. "200.0".
fn parse_quota(value: &str) -> Option<u32> {
    let whole = value.trim().split('.').next()?;
    whole.parse().ok()
}
