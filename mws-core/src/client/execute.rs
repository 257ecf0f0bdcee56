use crate::error::{Error, HttpStatusError, Result, classify};
use crate::http_client::RawResponse;
use crate::parser::{Parsed, ResponseParser};
use tracing::{info, instrument, warn};

use super::Client;

impl Client {
    /// Sends the pending operation and parses the response by content type.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRequest`] if no operation is set (nothing is sent)
    /// - [`Error::Service`] if the service reported a classified fault
    /// - [`Error::HttpStatus`] for any other non-200 response
    /// - [`Error::Network`] on transport failure
    pub async fn execute(&mut self) -> Result<Parsed> {
        self.execute_as::<Parsed>().await
    }

    /// Sends the pending operation and parses the response with `P`.
    pub async fn execute_as<P: ResponseParser>(&mut self) -> Result<P> {
        let response = self.send().await?;
        P::parse(response, self.encoding())
    }

    /// Sends the pending operation and hands the raw response to `f`,
    /// bypassing the default parser.
    pub async fn execute_with<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(RawResponse) -> Result<T>,
    {
        let response = self.send().await?;
        f(response)
    }

    // The operation is consumed whatever the outcome.
    async fn send(&mut self) -> Result<RawResponse> {
        let url = self.endpoint()?;
        let operation = self
            .operation
            .take()
            .ok_or_else(|| Error::invalid_request("No operation set"))?;
        let query = self.query(&operation);
        self.dispatch(operation.action(), &url, &query).await
    }

    #[instrument(name = "mws_execute", skip(self, query), fields(action = %action, url = %url))]
    async fn dispatch(
        &mut self,
        action: &str,
        url: &str,
        query: &[(String, String)],
    ) -> Result<RawResponse> {
        info!(has_body = self.body.is_some(), "Dispatching request");
        let response = self
            .http
            .post(url, query, &self.headers, self.body.clone())
            .await?;

        if response.is_ok() {
            self.clear_body();
            return Ok(response);
        }

        let failure = HttpStatusError::new(response);
        if let Some(fault) = classify(&failure) {
            warn!(status = failure.status(), code = %fault.code(), "Service fault");
            return Err(fault.into());
        }
        warn!(status = failure.status(), "Request failed");
        Err(failure.into())
    }
}
