//! Character set handling for tab-separated bodies.
//!
//! Marketplaces name their charsets the way the service does (`CP1252`,
//! `Windows-31J`, `UTF-16`); `encoding_rs` resolves those labels.
//! `encoding_rs` only decodes UTF-16, so encoding to it is done here,
//! big-endian with a byte order mark.

use crate::error::{Error, Result};
use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE, WINDOWS_1252};
use std::borrow::Cow;
use tracing::warn;

/// Resolves a charset label, or `None` if it is unknown.
pub fn lookup(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Whether the label names UTF-8.
pub fn is_utf8(label: &str) -> bool {
    lookup(label) == Some(UTF_8)
}

/// Extracts the `charset` parameter from a `Content-Type` value.
///
/// ```rust
/// use mws_core::charset::charset_from_content_type;
///
/// assert_eq!(
///     charset_from_content_type("text/plain; charset=\"Shift_JIS\""),
///     Some("Shift_JIS")
/// );
/// assert_eq!(charset_from_content_type("text/xml"), None);
/// ```
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            let value = value.trim().trim_matches('"');
            (!value.is_empty()).then_some(value)
        } else {
            None
        }
    })
}

/// Encodes text into the named charset.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if the label is unknown or the text contains
/// characters the charset cannot represent.
pub fn encode_text(text: &str, label: &str) -> Result<Vec<u8>> {
    let encoding =
        lookup(label).ok_or_else(|| Error::encoding(format!("Unknown charset: {label}")))?;

    if encoding == UTF_16LE || encoding == UTF_16BE {
        return Ok(encode_utf16(text, label));
    }

    let (bytes, _, had_errors) = encoding.encode(text);
    if had_errors {
        let offending = text
            .chars()
            .find(|c| encoding.encode(c.encode_utf8(&mut [0; 4])).2)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        return Err(Error::encoding(format!(
            "{offending:?} (U+{:04X}) cannot be encoded as {label}",
            u32::from(offending)
        )));
    }
    Ok(bytes.into_owned())
}

// Bare "UTF-16" is written big-endian behind a BOM.
fn encode_utf16(text: &str, label: &str) -> Vec<u8> {
    let normalized = label.trim().to_ascii_uppercase();
    let little_endian = normalized == "UTF-16LE";
    let with_bom = normalized != "UTF-16LE" && normalized != "UTF-16BE";

    let mut bytes = Vec::with_capacity(text.len() * 2 + 2);
    if with_bom {
        bytes.extend_from_slice(&[0xFE, 0xFF]);
    }
    for unit in text.encode_utf16() {
        if little_endian {
            bytes.extend_from_slice(&unit.to_le_bytes());
        } else {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
    }
    bytes
}

/// Decodes bytes in the named charset into UTF-8, replacing invalid or
/// unmappable sequences with U+FFFD.
///
/// A byte order mark overrides the label. Unknown labels fall back to
/// windows-1252.
pub fn decode_lossy<'a>(bytes: &'a [u8], label: &str) -> (Cow<'a, str>, &'static Encoding) {
    let encoding = lookup(label).unwrap_or_else(|| {
        warn!(charset = %label, "Unknown charset, falling back to windows-1252");
        WINDOWS_1252
    });

    if encoding == UTF_8 {
        return (String::from_utf8_lossy(bytes), UTF_8);
    }

    let (text, used, _) = encoding.decode(bytes);
    (text, used)
}
