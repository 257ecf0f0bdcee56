//! MWS API Sections
//!
//! Concrete API sections built on top of mws-core. Each section owns a
//! [`Client`](mws_core::Client) configured with the section's path, version
//! and merchant parameter name.
//!
//! # Supported Sections
//!
//! - Feeds
//! - Reports
//!
//! # Example
//!
//! ```rust,no_run
//! use mws_apis::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let config = ClientConfig::builder()
//!     .merchant_id("A2MERCHANT")
//!     .marketplace("GB")
//!     .build();
//! let mut reports = Reports::new(config)?;
//!
//! let report = reports.get_report("123").await?;
//! println!("{} rows", report.rows()?.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow common patterns that are acceptable in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::needless_pass_by_value)]

pub mod feeds;
pub mod reports;

pub use feeds::{FEEDS, FeedSubmissionListParams, Feeds, SubmitFeedParams};
pub use reports::{
    REPORTS, ReportListParams, ReportRequestListParams, Reports, RequestReportParams,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::feeds::{FeedSubmissionListParams, Feeds, SubmitFeedParams};
    pub use crate::reports::{
        ReportListParams, ReportRequestListParams, Reports, RequestReportParams,
    };
    pub use mws_core::prelude::*;
}
