use crate::error::{Error, NetworkError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;
use tracing::{debug, error, instrument};
use url::Url;

use super::builder::HttpClient;
use super::raw::RawResponse;

impl HttpClient {
    /// Sends one POST request and returns the response whatever its status.
    ///
    /// # Arguments
    ///
    /// * `url` - Target URL without query string
    /// * `query` - Query parameters, sent in the given order
    /// * `headers` - Request headers
    /// * `body` - Optional raw request body
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL or a header is malformed
    /// - The body exceeds `max_request_size`
    /// - Network communication fails or the response exceeds
    ///   `max_response_size`
    #[instrument(
        name = "http_post",
        skip(self, query, headers, body),
        fields(url = %url, has_body = body.is_some(), timeout_ms = %self.config().timeout.as_millis())
    )]
    pub async fn post(
        &self,
        url: &str,
        query: &[(String, String)],
        headers: &BTreeMap<String, String>,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse> {
        let mut target = Url::parse(url)
            .map_err(|e| Error::invalid_request(format!("Invalid URL '{url}': {e}")))?;
        if !query.is_empty() {
            target.query_pairs_mut().extend_pairs(query);
        }

        let mut request = self
            .client()
            .post(target)
            .headers(to_header_map(headers)?);

        if let Some(body) = body {
            if body.len() > self.config().max_request_size {
                return Err(Error::invalid_request(format!(
                    "Request body {} bytes exceeds limit {} bytes",
                    body.len(),
                    self.config().max_request_size
                )));
            }

            if self.config().verbose {
                debug!(
                    body_length = body.len(),
                    body_preview = %String::from_utf8_lossy(&body[..body.len().min(200)]),
                    "HTTP request with body"
                );
            }
            request = request.body(body);
        } else if self.config().verbose {
            debug!("HTTP request without body");
        }

        let response = request.send().await.map_err(|e| {
            error!(
                error = %e,
                "HTTP request send failed"
            );
            Error::from(NetworkError::from(e))
        })?;

        self.read_response(response, url).await
    }
}

fn to_header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::invalid_request(format!("Invalid header name '{name}': {e}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| Error::invalid_request(format!("Invalid value for header '{name}': {e}")))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}
