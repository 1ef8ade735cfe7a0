//! Product identifier newtype.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Amazon Standard Identification Number, the unique key of a deal.
///
/// Serialized as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Asin(String);

impl Asin {
    /// Create an ASIN from a string.
    pub fn new(asin: impl Into<String>) -> Self {
        Self(asin.into())
    }

    /// Parse a caller-supplied ASIN, rejecting empty values.
    pub fn parse(asin: &str) -> Option<Self> {
        if asin.is_empty() {
            None
        } else {
            Some(Self(asin.to_string()))
        }
    }

    /// Get the ASIN as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Asin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Asin {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Asin {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Asin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asin_creation() {
        let asin = Asin::new("B00TEST123");
        assert_eq!(asin.as_str(), "B00TEST123");
    }

    #[test]
    fn test_asin_parse_rejects_empty() {
        assert_eq!(Asin::parse(""), None);
        assert_eq!(Asin::parse("B001"), Some(Asin::new("B001")));
    }

    #[test]
    fn test_asin_display() {
        let asin = Asin::new("B0789");
        assert_eq!(format!("{}", asin), "B0789");
    }

    #[test]
    fn test_asin_serializes_as_plain_string() {
        let json = serde_json::to_string(&Asin::new("B001")).unwrap();
        assert_eq!(json, r#""B001""#);

        let parsed: Asin = serde_json::from_str(r#""B002""#).unwrap();
        assert_eq!(parsed, Asin::new("B002"));
    }
}
