//! Tab-separated flat files.
//!
//! Reports and feed processing results come back as tab-separated text in
//! the marketplace's charset. Decoding:
//!
//! 1. The charset named by `Content-Type` wins, else the marketplace's.
//! 2. The body is transcoded to UTF-8. Bytes that are invalid in the
//!    charset become U+FFFD instead of failing the whole file.
//! 3. Feed processing reports start with a summary block whose count lines
//!    end in `label\t\tcount`, followed by a blank line. It is split off
//!    from the tabular content.
//!
//! ```text
//! Feed Processing Summary:
//! \tNumber of records processed\t\t2
//! \tNumber of records successful\t\t1
//!
//! original-record-number\tsku\terror-code\t...
//! ```
//!
//! The raw body is kept, so [`FlatFile::is_valid`] checks `Content-MD5`
//! against exactly the bytes the service hashed.

use crate::charset;
use crate::error::{Error, Result};
use crate::http_client::RawResponse;
use base64::{Engine as _, engine::general_purpose};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use lazy_static::lazy_static;
use md5::{Digest, Md5};
use regex::Regex;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::ResponseParser;

lazy_static! {
    /// A count line (`...\t\t...`) directly followed by a blank line.
    static ref SUMMARY_BOUNDARY: Regex =
        Regex::new(r"\t\t[^\n]*\n\n").expect("Invalid summary boundary pattern");
}

/// A decoded tab-separated response.
#[derive(Debug, Clone)]
pub struct FlatFile {
    response: RawResponse,
    charset: &'static str,
    summary: Option<String>,
    content: String,
}

impl FlatFile {
    /// Decodes a response body.
    ///
    /// `declared_encoding` is used when the response does not name a
    /// charset. Decoding never fails; undecodable bytes are replaced.
    pub fn decode(response: RawResponse, declared_encoding: &str) -> Self {
        let label = response
            .content_charset()
            .unwrap_or(declared_encoding)
            .to_string();
        let (charset_name, summary, content) = {
            let (text, used) = charset::decode_lossy(response.body(), &label);
            if text.contains(char::REPLACEMENT_CHARACTER) {
                debug!(charset = %used.name(), "Replaced undecodable bytes in flat file");
            }
            let (summary, content) = split_summary(&text);
            (used.name(), summary, content)
        };

        debug!(
            charset = %charset_name,
            has_summary = summary.is_some(),
            content_length = content.len(),
            "Decoded flat file"
        );

        Self {
            response,
            charset: charset_name,
            summary,
            content,
        }
    }

    /// Decodes a body given its headers separately.
    ///
    /// Header values that are not valid HTTP header text are ignored.
    pub fn from_parts(
        body: impl Into<Vec<u8>>,
        content_type: Option<&str>,
        content_md5: Option<&str>,
        declared_encoding: &str,
    ) -> Self {
        let mut headers = HeaderMap::new();
        for (name, value) in [
            (CONTENT_TYPE, content_type),
            (HeaderName::from_static("content-md5"), content_md5),
        ] {
            let Some(value) = value else { continue };
            match HeaderValue::from_str(value) {
                Ok(value) => {
                    headers.insert(name, value);
                }
                Err(e) => warn!(header = %name, error = %e, "Ignoring invalid header value"),
            }
        }
        Self::decode(RawResponse::new(200, headers, body), declared_encoding)
    }

    /// The tabular part of the file, UTF-8.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The summary block, if the file has one.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Name of the charset the body was decoded from.
    pub fn charset(&self) -> &str {
        self.charset
    }

    /// The response as received.
    pub fn response(&self) -> &RawResponse {
        &self.response
    }

    /// Column names from the header row. Empty for an empty file.
    pub fn headers(&self) -> Result<Vec<String>> {
        let mut reader = self.reader();
        let headers = reader.headers()?;
        Ok(headers.iter().map(str::to_string).collect())
    }

    /// Data rows after the header row.
    ///
    /// Each call starts a fresh pass over the content. Rows may be shorter
    /// or longer than the header row. Quote characters have no meaning.
    pub fn records(&self) -> Records<'_> {
        Records {
            inner: self.reader().into_records(),
        }
    }

    /// Data rows keyed by column name.
    ///
    /// Missing trailing cells are absent from the map; cells beyond the
    /// header row are dropped.
    pub fn rows(&self) -> Result<Vec<BTreeMap<String, String>>> {
        let headers = self.headers()?;
        self.records()
            .map(|record| {
                let record = record?;
                Ok(headers
                    .iter()
                    .cloned()
                    .zip(record)
                    .collect())
            })
            .collect()
    }

    /// Counts from the summary block, keyed by label.
    ///
    /// Reads the first two count lines after the summary title. Lines whose
    /// count is not a number are skipped. `None` without a summary.
    pub fn summary_counts(&self) -> Option<BTreeMap<String, u64>> {
        let summary = self.summary.as_deref()?;
        let counts = summary
            .lines()
            .skip(1)
            .filter(|line| !line.trim().is_empty())
            .take(2)
            .filter_map(|line| {
                let (label, count) = line.trim_start_matches('\t').split_once("\t\t")?;
                match count.trim().parse::<u64>() {
                    Ok(count) => Some((label.trim().to_string(), count)),
                    Err(_) => {
                        debug!(line = %line, "Skipping summary line without a count");
                        None
                    }
                }
            })
            .collect();
        Some(counts)
    }

    /// Whether the raw body matches its `Content-MD5` header.
    ///
    /// False when the header is missing.
    pub fn is_valid(&self) -> bool {
        let Some(expected) = self.response.content_md5() else {
            return false;
        };
        let digest = Md5::digest(self.response.body());
        general_purpose::STANDARD.encode(digest) == expected
    }

    fn reader(&self) -> csv::Reader<&[u8]> {
        ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .has_headers(true)
            .from_reader(self.content.as_bytes())
    }
}

impl ResponseParser for FlatFile {
    fn parse(response: RawResponse, encoding: &str) -> Result<Self> {
        Ok(Self::decode(response, encoding))
    }
}

/// Iterator over the data rows of a [`FlatFile`].
pub struct Records<'a> {
    inner: StringRecordsIntoIter<&'a [u8]>,
}

impl Iterator for Records<'_> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|record| {
            record
                .map(|r: StringRecord| r.iter().map(str::to_string).collect())
                .map_err(Error::from)
        })
    }
}

fn split_summary(text: &str) -> (Option<String>, String) {
    match SUMMARY_BOUNDARY.find(text) {
        Some(boundary) => {
            let split_at = boundary.end() - 2;
            (
                Some(text[..split_at].to_string()),
                text[boundary.end()..].to_string(),
            )
        }
        None => (None, text.to_string()),
    }
}
