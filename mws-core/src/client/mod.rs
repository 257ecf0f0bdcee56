//! Request builder and response dispatcher.
//!
//! A [`Client`] carries the per-call state of one API section: credentials,
//! marketplace, the pending [`Operation`] and an optional request body.
//! [`Client::execute`] sends it, then either parses the response or turns
//! the failure into an [`Error`](crate::error::Error).
//!
//! # Example
//!
//! ```rust,no_run
//! use mws_core::client::Client;
//! use mws_core::config::{ClientConfig, SectionConfig};
//!
//! # async fn run() -> mws_core::Result<()> {
//! let config = ClientConfig::builder()
//!     .merchant_id("A2MERCHANT")
//!     .marketplace("US")
//!     .build();
//! let mut client = Client::new(config, SectionConfig::new("/", "2009-01-01"))?;
//!
//! client.set_operation("GetReportCount", [("Acknowledged", "false")]);
//! let parsed = client.execute().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Every `execute*` call takes `&mut self`: a client is used by one caller
//! at a time. Concurrent callers use separate clients.

mod execute;
mod request;

#[cfg(test)]
mod tests;

use crate::config::{ClientConfig, SectionConfig};
use crate::credentials::SecretString;
use crate::error::Result;
use crate::http_client::HttpClient;
use crate::marketplace::{Marketplace, MarketplaceRef};
use crate::operation::Operation;
use std::collections::BTreeMap;

const DEFAULT_ENCODING: &str = "UTF-8";

/// Client for one API section.
#[derive(Debug)]
pub struct Client {
    http: HttpClient,
    section: SectionConfig,
    merchant_id: Option<String>,
    auth_token: Option<SecretString>,
    aws_access_key_id: Option<String>,
    marketplace: Option<Marketplace>,
    endpoint_override: Option<String>,
    body: Option<Vec<u8>>,
    headers: BTreeMap<String, String>,
    operation: Option<Operation>,
}

impl Client {
    /// Creates a client for `section`.
    ///
    /// # Errors
    ///
    /// Returns an error if the marketplace code is unknown or the transport
    /// cannot be built.
    pub fn new(config: ClientConfig, section: SectionConfig) -> Result<Self> {
        let marketplace = config.marketplace.map(MarketplaceRef::resolve).transpose()?;
        let http = HttpClient::new(config.http)?;

        Ok(Self {
            http,
            section,
            merchant_id: config.merchant_id,
            auth_token: config.auth_token,
            aws_access_key_id: config.aws_access_key_id,
            marketplace,
            endpoint_override: config.endpoint_override,
            body: None,
            headers: BTreeMap::new(),
            operation: None,
        })
    }

    /// Creates a client from environment variables, see
    /// [`ClientConfig::from_env`].
    pub fn from_env(section: SectionConfig) -> Result<Self> {
        Self::new(ClientConfig::from_env(), section)
    }

    /// The section this client talks to.
    pub fn section(&self) -> &SectionConfig {
        &self.section
    }

    /// The seller's merchant id.
    pub fn merchant_id(&self) -> Option<&str> {
        self.merchant_id.as_deref()
    }

    /// Sets the seller's merchant id. Applies to the next request sent.
    pub fn set_merchant_id(&mut self, merchant_id: impl Into<String>) {
        self.merchant_id = Some(merchant_id.into());
    }

    /// The MWS auth token.
    pub fn auth_token(&self) -> Option<&SecretString> {
        self.auth_token.as_ref()
    }

    /// Sets the MWS auth token. Applies to the next request sent.
    pub fn set_auth_token(&mut self, token: impl Into<SecretString>) {
        self.auth_token = Some(token.into());
    }

    /// Removes the MWS auth token, for calls on the developer's own account.
    pub fn clear_auth_token(&mut self) {
        self.auth_token = None;
    }

    /// The developer's AWS access key id.
    pub fn aws_access_key_id(&self) -> Option<&str> {
        self.aws_access_key_id.as_deref()
    }

    /// Sets the developer's AWS access key id.
    pub fn set_aws_access_key_id(&mut self, key: impl Into<String>) {
        self.aws_access_key_id = Some(key.into());
    }

    /// The marketplace requests go to.
    pub fn marketplace(&self) -> Option<&Marketplace> {
        self.marketplace.as_ref()
    }

    /// Sets the marketplace from a code or a resolved [`Marketplace`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`](crate::error::Error::Configuration)
    /// for an unknown code; the current marketplace is kept.
    pub fn set_marketplace(&mut self, marketplace: impl Into<MarketplaceRef>) -> Result<()> {
        self.marketplace = Some(marketplace.into().resolve()?);
        Ok(())
    }

    /// Charset for tab-separated bodies: the marketplace's, else UTF-8.
    pub fn encoding(&self) -> &str {
        self.marketplace
            .as_ref()
            .map_or(DEFAULT_ENCODING, Marketplace::encoding)
    }

    /// The pending request body.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Request headers. `Content-Type` is present exactly when a body is.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// The pending operation.
    pub fn operation(&self) -> Option<&Operation> {
        self.operation.as_ref()
    }

    /// Sets the operation to invoke on the next `execute*` call.
    pub fn set_operation<K, V>(&mut self, action: impl Into<String>, params: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.operation = Some(Operation::with_params(action, params));
    }

    /// Sets a prebuilt operation to invoke on the next `execute*` call.
    pub fn set_operation_value(&mut self, operation: Operation) {
        self.operation = Some(operation);
    }
}
