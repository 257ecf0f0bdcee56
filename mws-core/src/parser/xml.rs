//! XML response documents.

use crate::charset;
use crate::error::Result;
use crate::http_client::RawResponse;
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::ResponseParser;

/// An XML response document.
///
/// Offers element lookup by local name for quick access and full serde
/// deserialization for typed access.
///
/// ```rust
/// use mws_core::http_client::RawResponse;
/// use mws_core::parser::XmlResponse;
///
/// let xml = XmlResponse::new(RawResponse::new(
///     200,
///     Default::default(),
///     "<GetReportListResponse><GetReportListResult><NextToken>abc</NextToken>\
///      <HasNext>true</HasNext></GetReportListResult>\
///      <ResponseMetadata><RequestId>r-1</RequestId></ResponseMetadata>\
///      </GetReportListResponse>",
/// ));
/// assert_eq!(xml.next_token().as_deref(), Some("abc"));
/// assert_eq!(xml.request_id().as_deref(), Some("r-1"));
/// ```
#[derive(Debug, Clone)]
pub struct XmlResponse {
    response: RawResponse,
    document: String,
}

impl XmlResponse {
    /// Wraps a response, decoding its body with the charset it declares
    /// (UTF-8 if none).
    pub fn new(response: RawResponse) -> Self {
        let label = response.content_charset().unwrap_or("UTF-8");
        let (document, _) = charset::decode_lossy(response.body(), label);
        let document = document.into_owned();
        Self { response, document }
    }

    /// The document text.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// The underlying response.
    pub fn response(&self) -> &RawResponse {
        &self.response
    }

    /// Text content of the first element with the given local name.
    pub fn text(&self, tag: &str) -> Option<String> {
        element_texts(&self.document, tag, Some(1)).into_iter().next()
    }

    /// Text content of every element with the given local name.
    pub fn texts(&self, tag: &str) -> Vec<String> {
        element_texts(&self.document, tag, None)
    }

    /// The pagination token, if more results are available.
    pub fn next_token(&self) -> Option<String> {
        self.text("NextToken").filter(|token| !token.is_empty())
    }

    /// Whether the service reports more pages.
    ///
    /// Some operations send `HasNext`; others only send a `NextToken`.
    pub fn has_next(&self) -> bool {
        match self.text("HasNext") {
            Some(flag) => flag.eq_ignore_ascii_case("true"),
            None => self.next_token().is_some(),
        }
    }

    /// The request id from the response metadata, falling back to the
    /// `x-mws-request-id` header.
    pub fn request_id(&self) -> Option<String> {
        self.text("RequestId")
            .or_else(|| self.response.request_id().map(str::to_string))
    }

    /// Deserializes the whole document.
    ///
    /// The root element name is not checked; field names match child
    /// element names.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(quick_xml::de::from_str(&self.document)?)
    }
}

impl ResponseParser for XmlResponse {
    fn parse(response: RawResponse, _encoding: &str) -> Result<Self> {
        Ok(Self::new(response))
    }
}

/// Local name of the document's root element.
pub(crate) fn root_element_name(document: &str) -> Option<String> {
    let mut reader = Reader::from_str(document);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                return Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => {}
        }
    }
}

fn element_texts(document: &str, tag: &str, limit: Option<usize>) -> Vec<String> {
    let mut reader = Reader::from_str(document);
    reader.config_mut().trim_text(true);

    let mut found = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                debug!(error = %e, tag = %tag, "Stopped reading malformed XML");
                break;
            }
        };

        match event {
            Event::Start(e) => {
                if depth > 0 {
                    depth += 1;
                } else if e.local_name().as_ref() == tag.as_bytes() {
                    depth = 1;
                    current.clear();
                }
            }
            Event::End(_) if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    found.push(std::mem::take(&mut current));
                }
            }
            Event::Empty(e) if depth == 0 && e.local_name().as_ref() == tag.as_bytes() => {
                found.push(String::new());
            }
            Event::Text(t) if depth > 0 => match t.unescape() {
                Ok(text) => current.push_str(&text),
                Err(e) => debug!(error = %e, "Skipping undecodable text"),
            },
            Event::CData(c) if depth > 0 => current.push_str(&String::from_utf8_lossy(&c)),
            Event::Eof => break,
            _ => {}
        }

        if limit.is_some_and(|limit| found.len() >= limit) {
            break;
        }
    }

    found
}
