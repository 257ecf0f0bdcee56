//! MWS Core Library
//!
//! Request/response plumbing shared by every API section of the marketplace
//! web service client.
//!
//! # Features
//!
//! - **Request building**: one [`Client`] per API section carries credentials,
//!   marketplace, the pending operation and an optional body
//! - **Content negotiation**: XML bodies go out verbatim, tab-separated bodies
//!   are re-encoded in the marketplace charset
//! - **Fault classification**: service faults with a semantic code become a
//!   typed [`ServiceError`](error::ServiceError)
//! - **Flat files**: tab-separated reports are decoded with charset repair,
//!   summary handling and a `Content-MD5` check
//!
//! # Example
//!
//! ```rust,no_run
//! use mws_core::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let config = ClientConfig::builder()
//!     .merchant_id("A2MERCHANT")
//!     .auth_token("amzn.mws.token")
//!     .marketplace("JP")
//!     .build();
//! let mut client = Client::new(config, SectionConfig::new("/", "2009-01-01"))?;
//!
//! client.set_operation("GetReport", [("ReportId", "123")]);
//! let report: FlatFile = client.execute_as().await?;
//! for row in report.rows()? {
//!     println!("{row:?}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// =============================================================================
// Global Clippy Lint Suppressions
// =============================================================================
// - module_name_repetitions: Common pattern in Rust libraries (e.g., FaultKind in fault module)
// - missing_errors_doc: Too verbose to document every Result-returning function
// - missing_panics_doc: Too verbose to document every potential panic
// - must_use_candidate: Not all return values need #[must_use]
// - doc_markdown: Technical terms in docs don't need backticks (e.g., MWS, TSV)
// - return_self_not_must_use: Builder pattern methods return Self without must_use
// =============================================================================
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]

// Core modules
pub mod charset;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http_client;
pub mod logging;
pub mod marketplace;
pub mod operation;
pub mod parser;

// Re-exports of core types for convenience
pub use client::Client;
pub use config::{ClientConfig, ClientConfigBuilder, ProxyConfig, SectionConfig};
pub use credentials::SecretString;
pub use error::{
    ContextExt, Error, FaultKind, HttpStatusError, NetworkError, ParseError, Result,
    ServiceError,
};
pub use http_client::{HttpClient, HttpConfig, RawResponse};
pub use marketplace::{Marketplace, MarketplaceRef};
pub use operation::Operation;
pub use parser::{FlatFile, Parsed, ResponseParser, XmlResponse};

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```rust
/// use mws_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::Client;
    pub use crate::config::{ClientConfig, ProxyConfig, SectionConfig};
    pub use crate::credentials::SecretString;
    pub use crate::error::{ContextExt, Error, FaultKind, Result, ServiceError};
    pub use crate::http_client::{HttpConfig, RawResponse};
    pub use crate::logging::{LogConfig, LogFormat, LogLevel, init_logging, try_init_logging};
    pub use crate::marketplace::{Marketplace, MarketplaceRef};
    pub use crate::operation::Operation;
    pub use crate::parser::{FlatFile, Parsed, ResponseParser, XmlResponse};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "mws-core");
    }
}
