use crate::charset;
use crate::error::{Error, Result};
use crate::operation::Operation;
use base64::{Engine as _, engine::general_purpose};
use md5::{Digest, Md5};
use tracing::debug;

use super::Client;

const CONTENT_TYPE: &str = "Content-Type";
const XML_DECLARATION: &str = "<?xml";
const XML_CONTENT_TYPE: &str = "text/xml";

impl Client {
    /// Sets or clears the request body.
    ///
    /// - `None` clears the body and its `Content-Type`.
    /// - Text starting with `<?xml` is sent verbatim as `text/xml`.
    /// - Anything else is tab-separated data: it is encoded in the
    ///   marketplace's charset and sent as
    ///   `text/tab-separated-values; charset={encoding}`.
    ///
    /// # Errors
    ///
    /// For tab-separated data, returns [`Error::Configuration`] when no
    /// marketplace is set and [`Error::Encoding`] when the text cannot be
    /// represented in its charset. The previous body is kept on error.
    pub fn set_body(&mut self, body: Option<&str>) -> Result<()> {
        let Some(text) = body else {
            self.clear_body();
            return Ok(());
        };

        if text.starts_with(XML_DECLARATION) {
            self.body = Some(text.as_bytes().to_vec());
            self.headers
                .insert(CONTENT_TYPE.to_string(), XML_CONTENT_TYPE.to_string());
            return Ok(());
        }

        let encoding = self
            .marketplace
            .as_ref()
            .map(|m| m.encoding().to_string())
            .ok_or_else(|| {
                Error::configuration("A marketplace is required to encode a tab-separated body")
            })?;
        let bytes = charset::encode_text(text, &encoding)?;
        debug!(charset = %encoding, body_length = bytes.len(), "Encoded tab-separated body");

        self.body = Some(bytes);
        self.headers.insert(
            CONTENT_TYPE.to_string(),
            format!("text/tab-separated-values; charset={encoding}"),
        );
        Ok(())
    }

    pub(crate) fn clear_body(&mut self) {
        self.headers.remove(CONTENT_TYPE);
        self.body = None;
    }

    /// URL requests are posted to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when neither a marketplace nor an
    /// endpoint override is set.
    pub fn endpoint(&self) -> Result<String> {
        let path = self.section.path;
        if let Some(base) = &self.endpoint_override {
            return Ok(format!("{}{path}", base.trim_end_matches('/')));
        }
        self.marketplace
            .as_ref()
            .map(|m| format!("https://{}{path}", m.host()))
            .ok_or_else(|| Error::configuration("No marketplace set"))
    }

    /// Query parameters for `operation`: `Action`, the operation's own
    /// parameters, then the standing parameters the client currently holds.
    pub(crate) fn query(&self, operation: &Operation) -> Vec<(String, String)> {
        let mut query = Vec::with_capacity(operation.params().len() + 6);
        query.push(("Action".to_string(), operation.action().to_string()));
        query.extend(
            operation
                .params()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        let standing = [
            (self.section.merchant_param, self.merchant_id.clone()),
            (
                "MWSAuthToken",
                self.auth_token.as_ref().map(|t| t.expose_secret().to_string()),
            ),
            ("Version", Some(self.section.version.to_string())),
            ("AWSAccessKeyId", self.aws_access_key_id.clone()),
            ("ContentMD5Value", self.body.as_deref().map(md5_base64)),
        ];
        query.extend(standing.into_iter().filter_map(|(key, value)| {
            value
                .filter(|v| !v.is_empty())
                .map(|v| (key.to_string(), v))
        }));
        query
    }
}

fn md5_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(Md5::digest(bytes))
}
