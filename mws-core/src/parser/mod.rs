//! Response parsers.
//!
//! A successful exchange is turned into something useful by a
//! [`ResponseParser`]. The default, [`Parsed`], looks at the response
//! `Content-Type`: XML documents become an [`XmlResponse`], anything else is
//! treated as a tab-separated [`FlatFile`].

pub mod flat_file;
pub mod xml;

use crate::error::Result;
use crate::http_client::RawResponse;

pub use flat_file::FlatFile;
pub use xml::XmlResponse;

/// Turns a successful response into a typed value.
///
/// `encoding` is the charset of the marketplace the request went to; flat
/// files that do not name a charset are read in it.
pub trait ResponseParser: Sized {
    /// Parses the response.
    fn parse(response: RawResponse, encoding: &str) -> Result<Self>;
}

/// Result of the default content-type dispatching parser.
#[derive(Debug, Clone)]
pub enum Parsed {
    /// An XML document.
    Xml(XmlResponse),
    /// A tab-separated flat file.
    FlatFile(FlatFile),
}

impl Parsed {
    /// The XML document, if the response was one.
    pub fn as_xml(&self) -> Option<&XmlResponse> {
        match self {
            Parsed::Xml(xml) => Some(xml),
            Parsed::FlatFile(_) => None,
        }
    }

    /// The flat file, if the response was one.
    pub fn as_flat_file(&self) -> Option<&FlatFile> {
        match self {
            Parsed::FlatFile(file) => Some(file),
            Parsed::Xml(_) => None,
        }
    }

    /// The underlying response.
    pub fn response(&self) -> &RawResponse {
        match self {
            Parsed::Xml(xml) => xml.response(),
            Parsed::FlatFile(file) => file.response(),
        }
    }
}

/// Whether a response should be read as XML.
///
/// Matches `text/xml`, `application/xml` and `+xml` media types. A response
/// without `Content-Type` is sniffed for an XML declaration.
pub fn is_xml(response: &RawResponse) -> bool {
    match response.content_type() {
        Some(content_type) => {
            let media_type = content_type
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase();
            media_type.ends_with("/xml") || media_type.ends_with("+xml")
        }
        None => response.body().trim_ascii_start().starts_with(b"<?xml"),
    }
}

impl ResponseParser for Parsed {
    fn parse(response: RawResponse, encoding: &str) -> Result<Self> {
        if is_xml(&response) {
            XmlResponse::parse(response, encoding).map(Parsed::Xml)
        } else {
            FlatFile::parse(response, encoding).map(Parsed::FlatFile)
        }
    }
}

impl ResponseParser for RawResponse {
    fn parse(response: RawResponse, _encoding: &str) -> Result<Self> {
        Ok(response)
    }
}
