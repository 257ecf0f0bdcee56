use crate::error::{Error, Result};
use reqwest::Client;
use tracing::warn;

use super::config::HttpConfig;

/// HTTP client performing single, non-retried exchanges
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpConfig,
}

impl HttpClient {
    /// Creates a new HTTP client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration fails validation
    /// - The proxy URL is invalid
    /// - The HTTP client cannot be built
    pub fn new(config: HttpConfig) -> Result<Self> {
        let validation = config
            .validate()
            .map_err(|e| Error::configuration(e.to_string()))?;
        for warning in &validation.warnings {
            warn!(warning = %warning, "HTTP configuration warning");
        }

        let mut builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout)
            .user_agent(&config.user_agent);

        if let Some(proxy_config) = &config.proxy {
            let mut proxy = reqwest::Proxy::all(&proxy_config.url)
                .map_err(|e| Error::configuration(format!("Invalid proxy URL: {e}")))?;

            if let (Some(username), Some(password)) =
                (&proxy_config.username, &proxy_config.password)
            {
                proxy = proxy.basic_auth(username, password.expose_secret());
            }
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Returns a reference to current HTTP configuration.
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }
}
