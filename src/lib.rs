//! # MWS Rust
//!
//! Client plumbing for the marketplace web service.
//!
//! ## Features
//!
//! - **Request building**: per-section clients with standing credentials
//!   and marketplace-aware body encoding
//! - **Typed faults**: service fault codes become [`FaultKind`] values that
//!   callers can match on
//! - **Flat files**: tab-separated reports decoded from the marketplace
//!   charset, with summary blocks and `Content-MD5` checks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mws_rust::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     init_logging(&LogConfig::development());
//!
//!     let mut feeds = Feeds::from_env()?;
//!     match feeds.get_feed_submission_result("2291326430").await {
//!         Ok(Parsed::FlatFile(report)) => println!("{:?}", report.summary_counts()),
//!         Ok(Parsed::Xml(xml)) => println!("{}", xml.document()),
//!         Err(err) if err.fault_kind() == Some(&FaultKind::FeedProcessingResultNotReady) => {
//!             println!("not ready yet");
//!         }
//!         Err(err) => return Err(err),
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// Re-export core types
pub use mws_core::{
    Client, ClientConfig, SectionConfig,
    error::{Error, FaultKind, Result, ServiceError},
    parser::{FlatFile, Parsed, XmlResponse},
};

// Re-export API sections
pub use mws_apis::{Feeds, Reports};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use mws_apis::prelude::*;
}
