//! Parsing-related error types.

use std::borrow::Cow;
use thiserror::Error;

/// Errors raised while reading a response payload.
///
/// ```rust
/// use mws_core::error::ParseError;
///
/// let err = ParseError::missing_element("NextToken");
/// assert!(err.to_string().contains("NextToken"));
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseError {
    /// Malformed or unexpected XML.
    #[error("Failed to read XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML did not match the expected document shape.
    #[error("Failed to deserialize XML: {0}")]
    XmlDocument(#[from] quick_xml::DeError),

    /// Malformed tab-separated data.
    #[error("Failed to read tab-separated data: {0}")]
    Tsv(#[from] csv::Error),

    /// A required element is absent from the document.
    #[error("Missing element: {0}")]
    MissingElement(Cow<'static, str>),

    /// A header value could not be interpreted.
    #[error("Invalid header '{name}': {message}")]
    InvalidHeader {
        /// Header name
        name: Cow<'static, str>,
        /// Error message
        message: Cow<'static, str>,
    },
}

impl ParseError {
    /// Creates a `MissingElement` error.
    pub fn missing_element(name: impl Into<Cow<'static, str>>) -> Self {
        Self::MissingElement(name.into())
    }

    /// Creates an `InvalidHeader` error.
    pub fn invalid_header(
        name: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            message: message.into(),
        }
    }
}
