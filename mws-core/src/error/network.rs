//! Network-related error types.

use std::error::Error as StdError;
use thiserror::Error;

/// Encapsulated network errors hiding implementation details.
///
/// `reqwest::Error` never appears in the public API; it is converted into one
/// of these variants (see `convert.rs`).
///
/// # Example
///
/// ```rust
/// use mws_core::error::NetworkError;
///
/// fn describe(err: &NetworkError) -> &'static str {
///     match err {
///         NetworkError::Timeout => "timed out",
///         NetworkError::ConnectionFailed(_) => "connection failed",
///         _ => "other",
///     }
/// }
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NetworkError {
    /// Request timed out.
    #[error("Request timeout")]
    Timeout,

    /// Connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The response exceeded the configured size limit.
    #[error("Response size {size} bytes exceeds limit {limit} bytes")]
    ResponseTooLarge {
        /// Observed (or announced) size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: usize,
    },

    /// Transport layer error preserving the underlying cause.
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync + 'static>),
}
