//! Deal record types.

use crate::error::DealError;
use crate::ids::Asin;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Completeness of a deal, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DealStatus {
    /// Title, price and a code or discount are all known.
    Ready,
    /// At least one of the required fields is still missing.
    #[default]
    Incomplete,
}

impl DealStatus {
    /// Derive the status of a deal from its current field values.
    pub fn derive(deal: &Deal) -> Self {
        if deal.is_complete() {
            DealStatus::Ready
        } else {
            DealStatus::Incomplete
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DealStatus::Ready => "Ready",
            DealStatus::Incomplete => "Incomplete",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ready" => Some(DealStatus::Ready),
            "incomplete" => Some(DealStatus::Incomplete),
            _ => None,
        }
    }
}

impl fmt::Display for DealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A price or discount, which callers send either as text or as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// Numeric value, kept exactly as received.
    Number(Number),
    /// Free-form text such as `"$9.99"` or `"20%"`.
    Text(String),
}

impl Amount {
    /// Whether the amount counts as supplied. Empty text and zero do not.
    pub fn is_present(&self) -> bool {
        match self {
            Amount::Text(text) => !text.is_empty(),
            Amount::Number(number) => number.as_f64().map_or(true, |value| value != 0.0),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(number) => write!(f, "{}", number),
            Amount::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Amount {
    fn from(s: &str) -> Self {
        Amount::Text(s.to_string())
    }
}

impl From<String> for Amount {
    fn from(s: String) -> Self {
        Amount::Text(s)
    }
}

impl From<i64> for Amount {
    fn from(n: i64) -> Self {
        Amount::Number(n.into())
    }
}

/// A field value that may or may not count as supplied.
pub(crate) trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for Amount {
    fn is_present(&self) -> bool {
        Amount::is_present(self)
    }
}

fn present<T: Presence>(value: &Option<T>) -> bool {
    value.as_ref().is_some_and(Presence::is_present)
}

/// The canonical, merged record for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    /// Product identifier (unique within the collection).
    pub asin: Asin,
    /// Product title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Current price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Amount>,
    /// Discount code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Discount amount, an alternative to a code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Amount>,
    /// Product image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Affiliate link for the product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_link: Option<String>,
    /// Milliseconds since the Unix epoch of the last ingest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<i64>,
    /// Derived completeness status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DealStatus>,
    /// Fields this service does not interpret, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Deal {
    /// Create an empty deal for the given ASIN.
    pub fn new(asin: impl Into<Asin>) -> Self {
        Self {
            asin: asin.into(),
            title: None,
            price: None,
            code: None,
            discount: None,
            image_url: None,
            affiliate_link: None,
            last_updated: None,
            status: None,
            extra: Map::new(),
        }
    }

    /// Whether title, price and a code or discount are all present.
    pub fn is_complete(&self) -> bool {
        present(&self.title)
            && present(&self.price)
            && (present(&self.code) || present(&self.discount))
    }

    /// Stored status, or the derived one when the record carries none.
    pub fn effective_status(&self) -> DealStatus {
        self.status.unwrap_or_else(|| DealStatus::derive(self))
    }

    /// Whether the typed field serialized under `key` holds a value.
    pub(crate) fn has_field(&self, key: &str) -> bool {
        match key {
            "asin" => true,
            "title" => self.title.is_some(),
            "price" => self.price.is_some(),
            "code" => self.code.is_some(),
            "discount" => self.discount.is_some(),
            "imageUrl" => self.image_url.is_some(),
            "affiliateLink" => self.affiliate_link.is_some(),
            "lastUpdated" => self.last_updated.is_some(),
            "status" => self.status.is_some(),
            _ => false,
        }
    }
}

/// A caller-supplied fragment of a deal, used as merge input.
///
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialDeal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate_link: Option<String>,
}

impl PartialDeal {
    /// Decode a request body, checking the ASIN before any other field.
    ///
    /// # Errors
    ///
    /// [`DealError::MissingAsin`] when the body has no non-empty string
    /// `asin`, and [`DealError::InvalidPartial`] when a known field has the
    /// wrong type.
    pub fn from_value(value: Value) -> Result<Self, DealError> {
        match value.get("asin") {
            Some(Value::String(asin)) if !asin.is_empty() => {}
            _ => return Err(DealError::MissingAsin),
        }

        serde_json::from_value(value).map_err(|e| DealError::InvalidPartial(e.to_string()))
    }

    /// Start a partial record for the given ASIN.
    pub fn new(asin: impl Into<String>) -> Self {
        Self {
            asin: Some(asin.into()),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_price(mut self, price: impl Into<Amount>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_discount(mut self, discount: impl Into<Amount>) -> Self {
        self.discount = Some(discount.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_affiliate_link(mut self, link: impl Into<String>) -> Self {
        self.affiliate_link = Some(link.into());
        self
    }
}
