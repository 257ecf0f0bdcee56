use crate::error::{NetworkError, Result};
use reqwest::Response;
use tracing::{debug, error, instrument, warn};

use super::builder::HttpClient;
use super::raw::RawResponse;

const BODY_PREVIEW_SIZE: usize = 200;

impl HttpClient {
    #[instrument(name = "http_read_response", skip(self, response), fields(status, url = %url))]
    pub(crate) async fn read_response(&self, response: Response, url: &str) -> Result<RawResponse> {
        let status = response.status();
        let headers = response.headers().clone();
        let max_size = self.config().max_response_size;

        tracing::Span::current().record("status", status.as_u16());

        if let Some(content_length) = response.content_length()
            && content_length > max_size as u64
        {
            warn!(
                url = %url,
                content_length = content_length,
                max_size = max_size,
                "Response exceeds size limit (Content-Length check)"
            );
            return Err(NetworkError::ResponseTooLarge {
                size: content_length,
                limit: max_size,
            }
            .into());
        }

        let body = stream_with_limit(response, url, max_size).await?;

        if self.config().verbose {
            let preview = String::from_utf8_lossy(&body[..body.len().min(BODY_PREVIEW_SIZE)]);
            debug!(
                status = %status,
                body_length = body.len(),
                body_preview = %preview,
                "HTTP response received"
            );
        } else {
            debug!(status = %status, body_length = body.len(), "HTTP response received");
        }

        Ok(RawResponse::new(status.as_u16(), headers, body))
    }
}

async fn stream_with_limit(response: Response, url: &str, max_size: usize) -> Result<Vec<u8>> {
    use futures_util::StreamExt;

    #[allow(clippy::cast_possible_truncation)]
    let initial_capacity = response
        .content_length()
        .map_or(64 * 1024, |len| std::cmp::min(len as usize, max_size));

    let mut stream = response.bytes_stream();
    let mut body = Vec::with_capacity(initial_capacity);

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| {
            error!(
                error = %e,
                "Failed to read response chunk"
            );
            NetworkError::from(e)
        })?;

        let accumulated = body.len().saturating_add(chunk.len());
        if accumulated > max_size {
            warn!(
                url = %url,
                accumulated_size = accumulated,
                max_size = max_size,
                "Response exceeds size limit during streaming"
            );
            return Err(NetworkError::ResponseTooLarge {
                size: accumulated as u64,
                limit: max_size,
            }
            .into());
        }

        body.extend_from_slice(&chunk);
    }

    if body.capacity() > body.len() + body.len() / 4 {
        body.shrink_to_fit();
    }

    Ok(body)
}
