//! # Error Handling
//!
//! Every fallible operation in `mws-core` returns [`Result<T>`], whose error
//! side is the [`Error`] enum below.
//!
//! ## Error Hierarchy
//!
//! ```text
//! Error (main error type)
//! ├── HttpStatus     - Non-200 response without a classifiable fault body
//! ├── Service        - Non-200 response carrying a semantic fault code
//! ├── Network        - Network/transport layer errors (via NetworkError)
//! ├── Parse          - XML / tab-separated payload parsing (via ParseError)
//! ├── Encoding       - Request body not representable in the marketplace charset
//! ├── Configuration  - Unknown or missing marketplace, invalid settings
//! ├── InvalidRequest - Invalid request state or parameters
//! └── Context        - Error with additional context
//! ```
//!
//! A failed exchange always starts out as an [`HttpStatusError`]. The fault
//! classifier in [`fault`] inspects its body and, when the service supplied a
//! semantic fault code, upgrades it to a [`ServiceError`] whose
//! [`FaultKind`] callers can branch on. The original failure stays reachable
//! through [`std::error::Error::source`].
//!
//! ## Branching on service faults
//!
//! ```rust
//! use mws_core::error::{Error, FaultKind};
//!
//! fn should_poll_again(err: &Error) -> bool {
//!     matches!(err.fault_kind(), Some(FaultKind::FeedProcessingResultNotReady))
//! }
//! ```
//!
//! ## Adding Context to Errors
//!
//! ```rust
//! use mws_core::error::{ContextExt, Error, Result};
//!
//! fn submit(feed_id: &str) -> Result<()> {
//!     send(feed_id).with_context(|| format!("Failed to submit feed {feed_id}"))?;
//!     Ok(())
//! }
//! # fn send(_: &str) -> Result<()> { Ok(()) }
//! ```

mod config;
mod context;
mod convert;
pub mod fault;
mod http_status;
mod network;
mod parse;

use std::borrow::Cow;
use std::error::Error as StdError;
use thiserror::Error;

pub use config::{ConfigValidationError, ValidationResult};
pub use context::ContextExt;
pub use fault::{FaultDescription, FaultKind, ServiceError, classify};
pub use http_status::HttpStatusError;
pub use network::NetworkError;
pub use parse::ParseError;

/// Result type alias for all client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The primary error type for the client.
///
/// Large variants are boxed to keep the enum small.
///
/// # Example
///
/// ```rust
/// use mws_core::error::Error;
///
/// let err = Error::configuration("Unknown marketplace: XX");
/// assert!(err.to_string().contains("XX"));
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The service answered with a non-200 status and no classifiable fault.
    #[error("HTTP error: {0}")]
    HttpStatus(Box<HttpStatusError>),

    /// The service reported a fault with a semantic code.
    #[error("Service error: {0}")]
    Service(#[source] Box<ServiceError>),

    /// Network-related errors encapsulating transport layer issues.
    #[error("Network error: {0}")]
    Network(Box<NetworkError>),

    /// Errors while parsing a response payload.
    #[error("Parse error: {0}")]
    Parse(Box<ParseError>),

    /// A request body could not be represented in the target charset.
    #[error("Encoding error: {0}")]
    Encoding(Cow<'static, str>),

    /// Client configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(Cow<'static, str>),

    /// Invalid request state or parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(Cow<'static, str>),

    /// Error with additional context, preserving the error chain.
    #[error("{context}")]
    Context {
        /// Context message describing what operation failed
        context: String,
        /// The underlying error
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Creates a network error from a message.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(Box::new(NetworkError::ConnectionFailed(msg.into())))
    }

    /// Creates an encoding error.
    pub fn encoding(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Creates a configuration error.
    pub fn configuration(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates an invalid request error.
    pub fn invalid_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Attaches context to an existing error.
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    fn iter_chain(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |err| match err {
            Error::Context { source, .. } => Some(source.as_ref()),
            _ => None,
        })
    }

    /// Returns the root cause of the error, skipping Context layers.
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        self.iter_chain().last().unwrap_or(self)
    }

    /// Generates a detailed error report with the full chain.
    ///
    /// ```rust
    /// use mws_core::error::Error;
    ///
    /// let err = Error::network("Connection refused").context("Failed to submit feed");
    /// assert!(err.report().contains("Caused by"));
    /// ```
    #[must_use]
    pub fn report(&self) -> String {
        use std::fmt::Write;
        let mut report = String::new();
        report.push_str(&self.to_string());

        let mut current: Option<&(dyn StdError + 'static)> = self.source();
        while let Some(err) = current {
            let _ = write!(report, "\nCaused by: {err}");
            current = err.source();
        }
        report
    }

    /// Returns the classified service fault, if any (penetrates Context layers).
    #[must_use]
    pub fn as_service(&self) -> Option<&ServiceError> {
        match self.root_cause() {
            Error::Service(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the kind of the classified service fault, if any.
    #[must_use]
    pub fn fault_kind(&self) -> Option<&FaultKind> {
        self.as_service().map(ServiceError::kind)
    }

    /// Returns the untyped HTTP failure, if any.
    ///
    /// For a classified fault this is its cause, so callers can always reach
    /// the raw response of a failed exchange.
    #[must_use]
    pub fn as_http_status(&self) -> Option<&HttpStatusError> {
        match self.root_cause() {
            Error::HttpStatus(err) => Some(err),
            Error::Service(err) => Some(err.http_failure()),
            _ => None,
        }
    }

    /// Checks whether the failure looks transient.
    ///
    /// The client never retries on its own; this is a hint for callers that
    /// implement their own policy.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self.root_cause() {
            Error::Network(ne) => matches!(
                ne.as_ref(),
                NetworkError::Timeout | NetworkError::ConnectionFailed(_)
            ),
            Error::Service(err) => err.kind().is_transient(),
            Error::HttpStatus(err) => err.status() >= 500,
            _ => false,
        }
    }
}
