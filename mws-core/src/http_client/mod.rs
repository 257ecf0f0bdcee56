//! HTTP transport layer
//!
//! Thin wrapper around `reqwest` that performs exactly one exchange per call
//! and hands the whole response back as a [`RawResponse`], whatever its
//! status. Deciding what a non-200 status means is left to the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use mws_core::http_client::{HttpClient, HttpConfig};
//! use std::collections::BTreeMap;
//!
//! # async fn run() -> mws_core::Result<()> {
//! let client = HttpClient::new(HttpConfig::default())?;
//! let query = vec![("Action".to_string(), "GetServiceStatus".to_string())];
//! let response = client
//!     .post("https://mws.amazonservices.com/", &query, &BTreeMap::new(), None)
//!     .await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Size Limits**: request bodies are checked before sending, response
//!   bodies while streaming
//! - **Raw bodies**: no transparent decompression, so the bytes match what
//!   the server hashed for `Content-MD5`

mod builder;
mod config;
mod headers;
mod raw;
mod request;
mod response;

#[cfg(test)]
mod tests;

pub use builder::HttpClient;
pub use config::HttpConfig;
pub use raw::RawResponse;
