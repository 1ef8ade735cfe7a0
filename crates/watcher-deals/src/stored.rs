//! Lenient decoding of a persisted deal collection.
//!
//! Stored records are whatever earlier ingests and bulk replaces wrote. A
//! known field holding a value of an unexpected type is left in
//! [`Deal::extra`] under its own key, so decoding and re-encoding a record
//! never loses data.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::deal::{Deal, DealStatus};
use crate::error::DealError;
use crate::ids::Asin;

/// Decode a stored collection.
///
/// # Errors
///
/// [`DealError::NotAnArray`] when `value` is not an array, and
/// [`DealError::InvalidDeal`] for an element that is not an object with a
/// non-empty string `asin`. No other field can fail decoding.
pub fn decode_collection(value: Value) -> Result<Vec<Deal>, DealError> {
    let Value::Array(items) = value else {
        return Err(DealError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| decode_record(index, item))
        .collect()
}

fn decode_record(index: usize, item: Value) -> Result<Deal, DealError> {
    let Value::Object(mut fields) = item else {
        return Err(DealError::invalid(index, "expected an object"));
    };

    let asin = match fields.remove("asin") {
        Some(Value::String(asin)) if !asin.is_empty() => Asin::new(asin),
        Some(Value::String(_)) | Some(Value::Null) | None => {
            return Err(DealError::invalid(index, "asin is required"));
        }
        Some(_) => return Err(DealError::invalid(index, "asin must be a string")),
    };

    let mut deal = Deal::new(asin);
    deal.title = take(&mut fields, "title");
    deal.price = take(&mut fields, "price");
    deal.code = take(&mut fields, "code");
    deal.discount = take(&mut fields, "discount");
    deal.image_url = take(&mut fields, "imageUrl");
    deal.affiliate_link = take(&mut fields, "affiliateLink");
    deal.last_updated = take(&mut fields, "lastUpdated");
    deal.status = take::<DealStatus>(&mut fields, "status");
    deal.extra = fields;
    Ok(deal)
}

/// Remove and return `key` when it decodes as `T`; otherwise leave it in place.
fn take<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    let parsed = serde_json::from_value::<Option<T>>(fields.get(key)?.clone()).ok()?;
    fields.remove(key);
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::Amount;
    use serde_json::json;

    // === Decode Tests ===

    #[test]
    fn test_decode_well_formed_records() {
        let deals = decode_collection(json!([
            { "asin": "B001", "title": "Widget", "price": "9.99", "code": "SAVE10",
              "lastUpdated": 1_700_000_000_000_i64, "status": "Ready" },
            { "asin": "B002", "discount": 5 }
        ]))
        .unwrap();

        assert_eq!(deals.len(), 2);
        assert_eq!(deals[0].status, Some(DealStatus::Ready));
        assert_eq!(deals[0].last_updated, Some(1_700_000_000_000));
        assert_eq!(deals[1].discount, Some(Amount::from(5)));
        assert!(deals[0].extra.is_empty());
    }

    #[test]
    fn test_decode_keeps_unrecognized_status_verbatim() {
        let stored = json!([{ "asin": "B002", "title": "Gadget", "status": "Posted" }]);

        let deals = decode_collection(stored.clone()).unwrap();

        assert_eq!(deals[0].status, None);
        assert_eq!(deals[0].title.as_deref(), Some("Gadget"));
        assert_eq!(serde_json::to_value(&deals).unwrap(), stored);
    }

    #[test]
    fn test_decode_keeps_mistyped_fields_verbatim() {
        let stored = json!([{
            "asin": "B003",
            "title": 42,
            "price": { "amount": 3 },
            "lastUpdated": "2024-01-01T00:00:00Z"
        }]);

        let deals = decode_collection(stored.clone()).unwrap();

        let deal = &deals[0];
        assert_eq!(deal.title, None);
        assert_eq!(deal.price, None);
        assert_eq!(deal.last_updated, None);
        assert_eq!(serde_json::to_value(&deals).unwrap(), stored);
    }

    #[test]
    fn test_decode_null_fields_are_absent() {
        let deals = decode_collection(json!([{ "asin": "B001", "code": null }])).unwrap();

        assert_eq!(deals[0].code, None);
        assert!(deals[0].extra.is_empty());
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert_eq!(
            decode_collection(json!({ "deals": [] })),
            Err(DealError::NotAnArray)
        );
    }

    #[test]
    fn test_decode_rejects_record_without_string_asin() {
        let missing = decode_collection(json!([{ "asin": "B001" }, { "title": "x" }]));
        let numeric = decode_collection(json!([{ "asin": 123 }]));
        let scalar = decode_collection(json!(["B001"]));

        assert!(matches!(missing, Err(DealError::InvalidDeal { index: 1, .. })));
        assert!(matches!(numeric, Err(DealError::InvalidDeal { index: 0, .. })));
        assert!(matches!(scalar, Err(DealError::InvalidDeal { index: 0, .. })));
    }
}
