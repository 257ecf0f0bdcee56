//! Client configuration types.

use crate::credentials::SecretString;
use crate::http_client::HttpConfig;
use crate::marketplace::MarketplaceRef;

/// Environment variable holding the seller's merchant id.
pub const ENV_MERCHANT_ID: &str = "MWS_MERCHANT_ID";
/// Environment variable holding the MWS auth token.
pub const ENV_AUTH_TOKEN: &str = "MWS_AUTH_TOKEN";
/// Environment variable holding the developer's AWS access key id.
pub const ENV_AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// Environment variable holding a marketplace country code or id.
pub const ENV_MARKETPLACE: &str = "MWS_MARKETPLACE";
/// Environment variable overriding the endpoint base URL.
pub const ENV_ENDPOINT: &str = "MWS_ENDPOINT";

/// Proxy configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Proxy URL (e.g., "http://127.0.0.1:8080").
    pub url: String,
    /// Optional username for authentication.
    pub username: Option<String>,
    /// Optional password for authentication.
    pub password: Option<SecretString>,
}

impl ProxyConfig {
    /// Create a new proxy configuration with just a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
        }
    }

    /// Set credentials for the proxy.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<SecretString>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}

/// Where an API section lives and how it names its standing parameters.
///
/// ```rust
/// use mws_core::config::SectionConfig;
///
/// const FEEDS: SectionConfig = SectionConfig::new("/", "2009-01-01").merchant_param("Merchant");
/// assert_eq!(FEEDS.merchant_param, "Merchant");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionConfig {
    /// Path appended to the marketplace host, e.g. `/Orders/2013-09-01`.
    pub path: &'static str,
    /// Value of the `Version` parameter. Empty to omit it.
    pub version: &'static str,
    /// Name of the parameter carrying the merchant id.
    pub merchant_param: &'static str,
}

impl SectionConfig {
    /// Creates a section using `SellerId` for the merchant id.
    pub const fn new(path: &'static str, version: &'static str) -> Self {
        Self {
            path,
            version,
            merchant_param: "SellerId",
        }
    }

    /// Overrides the merchant id parameter name.
    #[must_use]
    pub const fn merchant_param(mut self, name: &'static str) -> Self {
        self.merchant_param = name;
        self
    }
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self::new("/", "")
    }
}

/// Credentials, marketplace and transport settings for a client.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// The seller's merchant id.
    pub merchant_id: Option<String>,
    /// Token the seller granted to the developer.
    pub auth_token: Option<SecretString>,
    /// Developer's AWS access key id.
    pub aws_access_key_id: Option<String>,
    /// Marketplace to talk to.
    pub marketplace: Option<MarketplaceRef>,
    /// Base URL used instead of `https://{marketplace host}`, e.g. a mock server.
    pub endpoint_override: Option<String>,
    /// Transport settings.
    pub http: HttpConfig,
}

impl ClientConfig {
    /// Starts building a configuration.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Reads settings from the `MWS_*` and `AWS_ACCESS_KEY_ID` environment
    /// variables. Unset or empty variables leave the field unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            merchant_id: get(ENV_MERCHANT_ID),
            auth_token: get(ENV_AUTH_TOKEN).map(SecretString::new),
            aws_access_key_id: get(ENV_AWS_ACCESS_KEY_ID),
            marketplace: get(ENV_MARKETPLACE).map(MarketplaceRef::Code),
            endpoint_override: get(ENV_ENDPOINT),
            http: HttpConfig::default(),
        }
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the merchant id
    pub fn merchant_id(mut self, merchant_id: impl Into<String>) -> Self {
        self.config.merchant_id = Some(merchant_id.into());
        self
    }

    /// Set the MWS auth token
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.config.auth_token = Some(SecretString::new(token));
        self
    }

    /// Set the AWS access key id
    pub fn aws_access_key_id(mut self, key: impl Into<String>) -> Self {
        self.config.aws_access_key_id = Some(key.into());
        self
    }

    /// Set the marketplace, by code or resolved
    pub fn marketplace(mut self, marketplace: impl Into<MarketplaceRef>) -> Self {
        self.config.marketplace = Some(marketplace.into());
        self
    }

    /// Send requests to this base URL instead of the marketplace host
    pub fn endpoint_override(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint_override = Some(url.into());
        self
    }

    /// Set the transport configuration
    pub fn http(mut self, http: HttpConfig) -> Self {
        self.config.http = http;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder()
            .merchant_id("A2MERCHANT")
            .auth_token("amzn.mws.token")
            .aws_access_key_id("AKIA")
            .marketplace("US")
            .endpoint_override("http://127.0.0.1:8080")
            .build();

        assert_eq!(config.merchant_id.as_deref(), Some("A2MERCHANT"));
        assert_eq!(
            config.auth_token.as_ref().map(SecretString::expose_secret),
            Some("amzn.mws.token")
        );
        assert_eq!(config.marketplace, Some(MarketplaceRef::Code("US".to_string())));
        assert!(!format!("{config:?}").contains("amzn.mws.token"));
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = [
            (ENV_MERCHANT_ID, "A2MERCHANT"),
            (ENV_AUTH_TOKEN, "token"),
            (ENV_MARKETPLACE, "DE"),
            (ENV_ENDPOINT, "  "),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|key| env.get(key).map(|v| (*v).to_string()));
        assert_eq!(config.merchant_id.as_deref(), Some("A2MERCHANT"));
        assert_eq!(config.marketplace, Some(MarketplaceRef::Code("DE".to_string())));
        assert!(config.aws_access_key_id.is_none());
        assert!(config.endpoint_override.is_none());
    }

    #[test]
    fn test_section_config() {
        let section = SectionConfig::new("/Orders/2013-09-01", "2013-09-01");
        assert_eq!(section.merchant_param, "SellerId");
        assert_eq!(section.merchant_param("Merchant").merchant_param, "Merchant");
        assert_eq!(SectionConfig::default().version, "");
    }

    #[test]
    fn test_proxy_config_redacts_password() {
        let proxy = ProxyConfig::new("http://proxy:3128").with_credentials("user", "hunter2");
        assert!(!format!("{proxy:?}").contains("hunter2"));
    }
}
