//! Secret values with automatic memory zeroization.
//!
//! The MWS auth token a seller grants to a developer is the one long-lived
//! secret this client handles. It is kept in a [`SecretString`], which is
//! wiped when dropped and never printed by `Debug` or `Display`.
//!
//! # Example
//!
//! ```rust
//! use mws_core::credentials::SecretString;
//!
//! let token = SecretString::new("amzn.mws.0000");
//! assert_eq!(token.expose_secret(), "amzn.mws.0000");
//! assert_eq!(format!("{token:?}"), "[REDACTED]");
//! ```

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string that is zeroed when dropped and redacted when formatted.
#[derive(Clone, Zeroize, ZeroizeOnDrop, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Creates a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the secret value.
    ///
    /// Use the reference immediately; do not persist it.
    #[inline]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns true if the secret string is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_redacted() {
        let secret = SecretString::new("amzn.mws.token");
        assert_eq!(format!("{secret:?}"), "[REDACTED]");
        assert_eq!(format!("{secret}"), "[REDACTED]");
        assert!(!format!("{:?}", Some(&secret)).contains("amzn"));
    }

    #[test]
    fn test_secret_string_expose() {
        let secret: SecretString = "token".into();
        assert_eq!(secret.expose_secret(), "token");
        assert!(!secret.is_empty());
        assert!(SecretString::new("").is_empty());
    }

    #[test]
    fn test_secret_string_zeroize() {
        let mut secret = SecretString::new("token");
        secret.zeroize();
        assert!(secret.is_empty());
    }
}
