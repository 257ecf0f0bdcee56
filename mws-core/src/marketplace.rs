//! Marketplace registry.
//!
//! Maps a two-letter country code (or a marketplace id) to the marketplace's
//! id, API host and the text encoding its flat files use.

use crate::error::{Error, Result};
use std::fmt;

const CP1252: &str = "CP1252";

/// `(country code, marketplace id, host, encoding)`
const MARKETPLACES: &[(&str, &str, &str, &str)] = &[
    ("US", "ATVPDKIKX0DER", "mws.amazonservices.com", CP1252),
    ("CA", "A2EUQ1WTGCTBG2", "mws.amazonservices.ca", CP1252),
    ("MX", "A1AM78C64UM0Y8", "mws.amazonservices.com.mx", CP1252),
    ("BR", "A2Q3Y263D00KWC", "mws.amazonservices.com", CP1252),
    ("GB", "A1F83G8C2ARO7P", "mws-eu.amazonservices.com", CP1252),
    ("DE", "A1PA6795UKMFR9", "mws-eu.amazonservices.com", CP1252),
    ("FR", "A13V1IB3VIYZZH", "mws-eu.amazonservices.com", CP1252),
    ("IT", "APJ6JRA9NG5V4", "mws-eu.amazonservices.com", CP1252),
    ("ES", "A1RKKUPIHCS9HS", "mws-eu.amazonservices.com", CP1252),
    ("IN", "A21TJRUUN4KGV", "mws.amazonservices.in", CP1252),
    ("JP", "A1VC38T7YXB528", "mws.amazonservices.jp", "Windows-31J"),
    ("CN", "AAHKV2X7AFYLW", "mws.amazonservices.com.cn", "UTF-16"),
    ("AU", "A39IBJ37TRP1C6", "mws.amazonservices.com.au", CP1252),
];

/// A marketplace the service operates in.
///
/// ```rust
/// use mws_core::marketplace::Marketplace;
///
/// let jp = Marketplace::find("JP").unwrap();
/// assert_eq!(jp.id(), "A1VC38T7YXB528");
/// assert_eq!(jp.encoding(), "Windows-31J");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marketplace {
    id: String,
    country_code: String,
    host: String,
    encoding: String,
}

impl Marketplace {
    /// Creates a marketplace outside the registry.
    pub fn new(
        id: impl Into<String>,
        country_code: impl Into<String>,
        host: impl Into<String>,
        encoding: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            country_code: country_code.into(),
            host: host.into(),
            encoding: encoding.into(),
        }
    }

    /// Looks up a marketplace by country code or marketplace id.
    ///
    /// Country codes are case-insensitive and `UK` is accepted for `GB`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an unknown code.
    pub fn find(code: &str) -> Result<Self> {
        let wanted = code.trim().to_ascii_uppercase();
        let wanted = if wanted == "UK" { "GB".to_string() } else { wanted };

        MARKETPLACES
            .iter()
            .find(|(country, id, _, _)| *country == wanted || *id == code.trim())
            .map(|&(country, id, host, encoding)| Self::new(id, country, host, encoding))
            .ok_or_else(|| Error::configuration(format!("Marketplace not found: {code}")))
    }

    /// All registered marketplaces.
    pub fn all() -> impl Iterator<Item = Marketplace> {
        MARKETPLACES
            .iter()
            .map(|&(country, id, host, encoding)| Self::new(id, country, host, encoding))
    }

    /// Marketplace id, e.g. `ATVPDKIKX0DER`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Two-letter country code.
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// API host name.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Charset label used for tab-separated bodies in this marketplace.
    pub fn encoding(&self) -> &str {
        &self.encoding
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.country_code, self.id)
    }
}

/// Either a marketplace code still to be looked up, or a resolved
/// [`Marketplace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketplaceRef {
    /// Country code or marketplace id.
    Code(String),
    /// Already resolved marketplace, used as-is.
    Resolved(Marketplace),
}

impl MarketplaceRef {
    /// Resolves the reference against the registry.
    pub fn resolve(self) -> Result<Marketplace> {
        match self {
            MarketplaceRef::Code(code) => Marketplace::find(&code),
            MarketplaceRef::Resolved(marketplace) => Ok(marketplace),
        }
    }
}

impl From<&str> for MarketplaceRef {
    fn from(code: &str) -> Self {
        MarketplaceRef::Code(code.to_string())
    }
}

impl From<String> for MarketplaceRef {
    fn from(code: String) -> Self {
        MarketplaceRef::Code(code)
    }
}

impl From<Marketplace> for MarketplaceRef {
    fn from(marketplace: Marketplace) -> Self {
        MarketplaceRef::Resolved(marketplace)
    }
}
