//! Shared test configuration.
//!
//! Live tests talk to the real service and only run when credentials are
//! configured, either in the environment or in a `.env` file:
//!
//! ```text
//! MWS_LIVE_TESTS=true
//! MWS_MERCHANT_ID=...
//! MWS_AUTH_TOKEN=...
//! AWS_ACCESS_KEY_ID=...
//! MWS_MARKETPLACE=US
//! ```

#![allow(dead_code)]

use mws_rust::ClientConfig;
use std::env;

/// Test configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Enable tests against the live service.
    pub enable_live_tests: bool,
    /// Client settings for live tests.
    pub client: ClientConfig,
}

impl TestConfig {
    /// Loads configuration, reading `.env` first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let enable_live_tests = env::var("MWS_LIVE_TESTS")
            .map(|value| value.eq_ignore_ascii_case("true") || value == "1")
            .unwrap_or(false);
        Self {
            enable_live_tests,
            client: ClientConfig::from_env(),
        }
    }

    /// Whether live tests should be skipped.
    pub fn should_skip_live_tests(&self) -> bool {
        !self.enable_live_tests || !self.has_credentials()
    }

    /// Whether a merchant id and marketplace are configured.
    pub fn has_credentials(&self) -> bool {
        self.client.merchant_id.is_some() && self.client.marketplace.is_some()
    }
}
