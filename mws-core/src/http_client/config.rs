use crate::config::ProxyConfig;
use crate::error::{ConfigValidationError, ValidationResult};
use std::time::Duration;

/// HTTP transport configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Total request timeout
    pub timeout: Duration,
    /// TCP connection timeout (default: 10 seconds)
    pub connect_timeout: Duration,
    /// Whether to log request bodies and response previews at debug level
    pub verbose: bool,
    /// User-Agent header value
    pub user_agent: String,
    /// Optional proxy configuration
    pub proxy: Option<ProxyConfig>,
    /// Maximum response body size in bytes (default: 64MB)
    ///
    /// Report downloads can be large, so the default is generous. Responses
    /// over the limit fail with [`NetworkError::ResponseTooLarge`](crate::error::NetworkError::ResponseTooLarge).
    pub max_response_size: usize,
    /// Maximum request body size in bytes (default: 10MB)
    pub max_request_size: usize,
    /// Maximum number of idle connections per host in the connection pool.
    ///
    /// Default: 10
    pub pool_max_idle_per_host: usize,
    /// Timeout for idle connections in the pool.
    ///
    /// Default: 90 seconds
    pub pool_idle_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            verbose: false,
            user_agent: format!("mws-rust/{} (Language=Rust)", env!("CARGO_PKG_VERSION")),
            proxy: None,
            max_response_size: 64 * 1024 * 1024,
            max_request_size: 10 * 1024 * 1024,
            pool_max_idle_per_host: 10,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl HttpConfig {
    /// Validates the transport configuration.
    ///
    /// # Validation Rules
    ///
    /// - `timeout` over 5 minutes is an error
    /// - `timeout` under 1 second produces a warning
    /// - `max_request_size` and `max_response_size` must be non-zero
    /// - `max_request_size` over 100MB is an error
    ///
    /// # Example
    ///
    /// ```rust
    /// use mws_core::http_client::HttpConfig;
    /// use std::time::Duration;
    ///
    /// assert!(HttpConfig::default().validate().is_ok());
    ///
    /// let invalid = HttpConfig {
    ///     timeout: Duration::from_secs(600),
    ///     ..Default::default()
    /// };
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> std::result::Result<ValidationResult, ConfigValidationError> {
        const MAX_REASONABLE_REQUEST_SIZE: usize = 100 * 1024 * 1024;

        let mut warnings = Vec::new();
        if self.timeout > Duration::from_secs(300) {
            return Err(ConfigValidationError::too_high(
                "timeout",
                format!("{:?}", self.timeout),
                "5 minutes",
            ));
        }

        if self.timeout < Duration::from_secs(1) {
            warnings.push(format!(
                "timeout {:?} is very short, may cause frequent timeouts",
                self.timeout
            ));
        }

        if self.connect_timeout > self.timeout {
            warnings.push(format!(
                "connect_timeout {:?} exceeds timeout {:?}",
                self.connect_timeout, self.timeout
            ));
        }

        if self.max_request_size == 0 {
            return Err(ConfigValidationError::invalid(
                "max_request_size",
                "max_request_size cannot be zero",
            ));
        }

        if self.max_request_size > MAX_REASONABLE_REQUEST_SIZE {
            return Err(ConfigValidationError::too_high(
                "max_request_size",
                self.max_request_size,
                "100MB (104857600 bytes)",
            ));
        }

        if self.max_response_size == 0 {
            return Err(ConfigValidationError::invalid(
                "max_response_size",
                "max_response_size cannot be zero",
            ));
        }

        Ok(ValidationResult::with_warnings(warnings))
    }
}
