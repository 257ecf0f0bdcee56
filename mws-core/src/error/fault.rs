//! Classification of failed exchanges into typed service faults.
//!
//! The service reports domain faults (a feed result that is not ready yet,
//! throttling, bad parameters) inside an XML document rather than through
//! HTTP status semantics alone:
//!
//! ```text
//! <ErrorResponse><Error><Code>...</Code><Message>...</Message></Error></ErrorResponse>
//! ```
//!
//! [`classify`] reads that document and maps the code onto a [`FaultKind`].
//! Codes outside the registry become [`FaultKind::Other`], so the same code
//! always yields the same kind. Purely numeric codes are the service's
//! fallback when it has no semantic code; they are not classified and the
//! original [`HttpStatusError`] stands.

use crate::error::HttpStatusError;
use crate::parser::xml::root_element_name;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;
use tracing::debug;

lazy_static! {
    /// Status-like codes such as `500` that carry no fault semantics.
    static ref NUMERIC_CODE: Regex =
        Regex::new(r"^\d+$").expect("Invalid numeric fault code pattern");
}

const FAULT_ROOT: &str = "ErrorResponse";

macro_rules! fault_kinds {
    ($( $(#[$doc:meta])* $variant:ident => $code:literal ),+ $(,)?) => {
        /// Kind of a classified service fault, keyed by the fault code.
        ///
        /// ```rust
        /// use mws_core::error::FaultKind;
        ///
        /// let kind = FaultKind::from_code("RequestThrottled");
        /// assert_eq!(kind, FaultKind::RequestThrottled);
        /// assert_eq!(FaultKind::from_code("SomethingNew").code(), "SomethingNew");
        /// ```
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum FaultKind {
            $( $(#[$doc])* $variant, )+
            /// A semantic code not in the registry.
            Other(String),
        }

        impl FaultKind {
            /// Maps a fault code onto its kind.
            pub fn from_code(code: &str) -> Self {
                match code {
                    $( $code => Self::$variant, )+
                    other => Self::Other(other.to_string()),
                }
            }

            /// The fault code this kind was derived from.
            pub fn code(&self) -> &str {
                match self {
                    $( Self::$variant => $code, )+
                    Self::Other(code) => code,
                }
            }
        }
    };
}

fault_kinds! {
    /// The caller is not authorized for the operation.
    AccessDenied => "AccessDenied",
    /// The feed processing result belongs to another seller.
    AccessToFeedProcessingResultDenied => "AccessToFeedProcessingResultDenied",
    /// Uploaded body did not match its `Content-MD5`.
    ContentMd5DoesNotMatch => "ContentMD5DoesNotMatch",
    /// `Content-MD5` was required but not sent.
    ContentMd5Missing => "ContentMD5Missing",
    /// The feed was cancelled before processing.
    FeedCanceled => "FeedCanceled",
    /// The processing report has expired.
    FeedProcessingResultNoLongerAvailable => "FeedProcessingResultNoLongerAvailable",
    /// The processing report is not ready yet.
    FeedProcessingResultNotReady => "FeedProcessingResultNotReady",
    /// The uploaded data is malformed.
    InputDataError => "InputDataError",
    /// Unspecified server-side failure.
    InternalError => "InternalError",
    /// Unknown access key.
    InvalidAccessKeyId => "InvalidAccessKeyId",
    /// Request was sent to an invalid endpoint.
    InvalidAddress => "InvalidAddress",
    /// Unknown feed submission id.
    InvalidFeedSubmissionId => "InvalidFeedSubmissionId",
    /// Unknown feed type.
    InvalidFeedType => "InvalidFeedType",
    /// A parameter value is out of range or malformed.
    InvalidParameterValue => "InvalidParameterValue",
    /// A query parameter is not recognized.
    InvalidQueryParameter => "InvalidQueryParameter",
    /// Unknown report id.
    InvalidReportId => "InvalidReportId",
    /// Unknown report type.
    InvalidReportType => "InvalidReportType",
    /// The request is malformed.
    InvalidRequest => "InvalidRequest",
    /// A required parameter is missing.
    MissingParameter => "MissingParameter",
    /// The hourly request quota is used up.
    QuotaExceeded => "QuotaExceeded",
    /// The request rate is too high.
    RequestThrottled => "RequestThrottled",
    /// The request signature was rejected.
    SignatureDoesNotMatch => "SignatureDoesNotMatch",
}

impl FaultKind {
    /// Whether waiting and calling again may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FaultKind::FeedProcessingResultNotReady
                | FaultKind::InternalError
                | FaultKind::QuotaExceeded
                | FaultKind::RequestThrottled
        )
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Code and message extracted from a fault document.
///
/// When the document lists several `<Error>` elements the first one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultDescription {
    /// Fault code, semantic or numeric.
    pub code: String,
    /// Human readable message, when the service sent one.
    pub message: Option<String>,
}

impl FaultDescription {
    /// Reads a fault document. Returns `None` when the body is not one.
    pub fn parse(body: &[u8]) -> Option<Self> {
        let text = String::from_utf8_lossy(body);
        if root_element_name(&text).as_deref() != Some(FAULT_ROOT) {
            return None;
        }

        let doc: ErrorResponseDoc = match quick_xml::de::from_str(&text) {
            Ok(doc) => doc,
            Err(e) => {
                debug!(error = %e, "Fault document does not match schema");
                return None;
            }
        };

        let error = doc.errors.into_iter().next()?;
        let code = error.code.trim().to_string();
        if code.is_empty() {
            return None;
        }
        let message = error
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        Some(Self { code, message })
    }

    /// Whether the code is a bare status-like number.
    pub fn is_numeric(&self) -> bool {
        NUMERIC_CODE.is_match(&self.code)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDoc {
    #[serde(rename = "Error", default)]
    errors: Vec<ErrorDoc>,
}

#[derive(Debug, Deserialize)]
struct ErrorDoc {
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Message", default)]
    message: Option<String>,
}

/// A service fault classified by its code.
///
/// The original HTTP failure is kept as the error source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ServiceError {
    kind: FaultKind,
    message: String,
    #[source]
    cause: HttpStatusError,
}

impl ServiceError {
    /// Kind derived from the fault code.
    pub fn kind(&self) -> &FaultKind {
        &self.kind
    }

    /// Fault code as sent by the service.
    pub fn code(&self) -> &str {
        self.kind.code()
    }

    /// Message extracted from the fault document, empty if none was sent.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The untyped failure this error was classified from.
    pub fn http_failure(&self) -> &HttpStatusError {
        &self.cause
    }
}

/// Classifies a failed exchange.
///
/// Returns `None` when the body is not a fault document or its code is
/// purely numeric; the caller should then surface `failure` itself.
///
/// ```rust
/// use mws_core::error::{FaultKind, HttpStatusError, classify};
/// use mws_core::http_client::RawResponse;
///
/// let body = "<ErrorResponse><Error><Code>RequestThrottled</Code>\
///             <Message>Slow down</Message></Error></ErrorResponse>";
/// let failure = HttpStatusError::new(RawResponse::new(503, Default::default(), body));
///
/// let err = classify(&failure).expect("classified");
/// assert_eq!(err.kind(), &FaultKind::RequestThrottled);
/// assert_eq!(err.message(), "Slow down");
/// ```
pub fn classify(failure: &HttpStatusError) -> Option<ServiceError> {
    let fault = FaultDescription::parse(failure.body())?;
    if fault.is_numeric() {
        debug!(code = %fault.code, status = failure.status(), "Numeric fault code left unclassified");
        return None;
    }

    debug!(code = %fault.code, status = failure.status(), "Classified service fault");
    Some(ServiceError {
        kind: FaultKind::from_code(&fault.code),
        message: fault.message.unwrap_or_default(),
        cause: failure.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::RawResponse;

    fn failure(status: u16, body: &str) -> HttpStatusError {
        HttpStatusError::new(RawResponse::new(status, Default::default(), body))
    }

    #[test]
    fn test_classify_semantic_code() {
        let cause = failure(
            404,
            r"
            <ErrorResponse>
              <Error>
                <Code>FeedProcessingResultNotReady</Code>
                <Message>Feed Submission Result is not ready for Feed 123</Message>
              </Error>
            </ErrorResponse>",
        );

        let err = classify(&cause).unwrap();
        assert!(err.kind().code().contains("FeedProcessingResultNotReady"));
        assert_eq!(err.kind(), &FaultKind::FeedProcessingResultNotReady);
        assert_eq!(err.message(), "Feed Submission Result is not ready for Feed 123");
        assert_eq!(err.http_failure(), &cause);
    }

    #[test]
    fn test_classify_numeric_code_is_absent() {
        let cause = failure(
            500,
            "<ErrorResponse><Error><Code>500</Code></Error></ErrorResponse>",
        );
        assert!(classify(&cause).is_none());
    }

    #[test]
    fn test_classify_non_xml_body_is_absent() {
        assert!(classify(&failure(502, "Bad Gateway")).is_none());
        assert!(classify(&failure(502, "")).is_none());
    }

    #[test]
    fn test_classify_other_schema_is_absent() {
        let cause = failure(
            400,
            "<Response><Error><Code>Foo</Code></Error></Response>",
        );
        assert!(classify(&cause).is_none());
    }

    #[test]
    fn test_classify_unknown_code_uses_other() {
        let cause = failure(
            400,
            r#"<?xml version="1.0"?>
            <ErrorResponse xmlns="https://mws.amazonservices.com/">
              <Error><Type>Sender</Type><Code>BrandNewFault</Code><Message>new</Message></Error>
              <RequestID>abc-123</RequestID>
            </ErrorResponse>"#,
        );

        let err = classify(&cause).unwrap();
        assert_eq!(err.kind(), &FaultKind::Other("BrandNewFault".to_string()));
        assert_eq!(err.code(), "BrandNewFault");
    }

    #[test]
    fn test_classify_uses_first_of_several_errors() {
        let cause = failure(
            400,
            "<ErrorResponse>\
               <Error><Code>InvalidParameterValue</Code><Message>first</Message></Error>\
               <Error><Code>MissingParameter</Code><Message>second</Message></Error>\
             </ErrorResponse>",
        );

        let err = classify(&cause).unwrap();
        assert_eq!(err.kind(), &FaultKind::InvalidParameterValue);
        assert_eq!(err.message(), "first");
    }

    #[test]
    fn test_classify_without_error_element_is_absent() {
        let cause = failure(400, "<ErrorResponse><RequestID>abc</RequestID></ErrorResponse>");
        assert!(classify(&cause).is_none());
    }

    #[test]
    fn test_classify_missing_message() {
        let cause = failure(
            401,
            "<ErrorResponse><Error><Code>AccessDenied</Code></Error></ErrorResponse>",
        );
        let err = classify(&cause).unwrap();
        assert_eq!(err.kind(), &FaultKind::AccessDenied);
        assert_eq!(err.message(), "");
    }

    #[test]
    fn test_service_error_source_is_cause() {
        use std::error::Error as _;

        let cause = failure(
            503,
            "<ErrorResponse><Error><Code>RequestThrottled</Code><Message>x</Message></Error></ErrorResponse>",
        );
        let err = classify(&cause).unwrap();
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), cause.to_string());
    }

    #[test]
    fn test_fault_kind_round_trips_known_codes() {
        for code in ["ContentMD5Missing", "QuotaExceeded", "InvalidReportId"] {
            assert_eq!(FaultKind::from_code(code).code(), code);
        }
        assert!(FaultKind::RequestThrottled.is_transient());
        assert!(!FaultKind::AccessDenied.is_transient());
    }
}
