//! Merge engine: folds partial records into the deal collection.
//!
//! The collection is ordered newest-first for new arrivals. Updating an
//! existing ASIN keeps its position; a new ASIN is prepended.

use std::collections::HashSet;

use serde_json::Value;

use crate::deal::{Deal, DealStatus, PartialDeal, Presence};
use crate::error::DealError;
use crate::ids::Asin;

/// Whether an ingest created a new record or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    Added,
    Updated,
}

impl IngestOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngestOutcome::Added => "added",
            IngestOutcome::Updated => "updated",
        }
    }
}

/// Result of ingesting one partial record.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingested {
    /// The merged record.
    pub deal: Deal,
    /// The next state of the collection, ready to persist.
    pub deals: Vec<Deal>,
    /// Whether the record was added or updated.
    pub outcome: IngestOutcome,
}

/// Deterministic placeholder image for an ASIN.
pub fn placeholder_image_url(asin: &Asin) -> String {
    format!("https://picsum.photos/seed/{}/400/400", asin)
}

/// Ingest a partial record at the current time.
pub fn ingest(partial: PartialDeal, current: Vec<Deal>) -> Result<Ingested, DealError> {
    ingest_at(partial, current, now_millis())
}

/// Ingest a partial record, stamping it with `now` (milliseconds since epoch).
///
/// # Errors
///
/// Returns [`DealError::MissingAsin`] when the partial has no ASIN or an
/// empty one. The collection is not touched in that case.
pub fn ingest_at(
    partial: PartialDeal,
    mut current: Vec<Deal>,
    now: i64,
) -> Result<Ingested, DealError> {
    let asin = partial
        .asin
        .as_deref()
        .and_then(Asin::parse)
        .ok_or(DealError::MissingAsin)?;

    let position = current.iter().position(|deal| deal.asin == asin);
    let existing = position.map(|index| &current[index]);
    let deal = merge(existing, partial, asin, now);

    let outcome = match position {
        Some(index) => {
            current[index] = deal.clone();
            IngestOutcome::Updated
        }
        None => {
            current.insert(0, deal.clone());
            IngestOutcome::Added
        }
    };

    Ok(Ingested {
        deal,
        deals: current,
        outcome,
    })
}

fn merge(existing: Option<&Deal>, partial: PartialDeal, asin: Asin, now: i64) -> Deal {
    let mut deal = Deal::new(asin);

    deal.title = pick(partial.title, existing.and_then(|d| d.title.as_ref()));
    deal.price = pick(partial.price, existing.and_then(|d| d.price.as_ref()));
    deal.code = pick(partial.code, existing.and_then(|d| d.code.as_ref()));
    deal.discount = pick(partial.discount, existing.and_then(|d| d.discount.as_ref()));
    deal.affiliate_link = pick(
        partial.affiliate_link,
        existing.and_then(|d| d.affiliate_link.as_ref()),
    );
    deal.image_url = pick(partial.image_url, existing.and_then(|d| d.image_url.as_ref()))
        .or_else(|| Some(placeholder_image_url(&deal.asin)));

    deal.last_updated = Some(now);
    deal.status = Some(DealStatus::derive(&deal));

    // A stored key shadowed by a typed value would serialize twice.
    if let Some(existing) = existing {
        let mut extra = existing.extra.clone();
        extra.retain(|key, _| !deal.has_field(key));
        deal.extra = extra;
    }
    deal
}

/// Incoming value when supplied, otherwise whatever is stored.
fn pick<T: Presence + Clone>(incoming: Option<T>, existing: Option<&T>) -> Option<T> {
    incoming
        .filter(Presence::is_present)
        .or_else(|| existing.cloned())
}

/// Validate a wholesale replacement of the collection.
///
/// The input is trusted as-is: no merge, no status recomputation. It must
/// still be an array of objects, each with a non-empty string `asin` and
/// correctly typed known fields, and no ASIN may repeat.
///
/// # Errors
///
/// [`DealError::NotAnArray`], [`DealError::InvalidDeal`] or
/// [`DealError::DuplicateAsin`].
pub fn replace_all(value: Value) -> Result<Vec<Deal>, DealError> {
    let Value::Array(items) = value else {
        return Err(DealError::NotAnArray);
    };

    let mut seen = HashSet::with_capacity(items.len());
    let mut deals = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let deal = validate_entry(index, item)?;
        if !seen.insert(deal.asin.clone()) {
            return Err(DealError::DuplicateAsin(deal.asin.into_inner()));
        }
        deals.push(deal);
    }

    Ok(deals)
}

fn validate_entry(index: usize, item: Value) -> Result<Deal, DealError> {
    let Some(object) = item.as_object() else {
        return Err(DealError::invalid(index, "expected an object"));
    };

    match object.get("asin") {
        Some(Value::String(asin)) if !asin.is_empty() => {}
        Some(Value::String(_)) | None | Some(Value::Null) => {
            return Err(DealError::invalid(index, "asin is required"));
        }
        Some(_) => return Err(DealError::invalid(index, "asin must be a string")),
    }

    serde_json::from_value(item).map_err(|e| DealError::invalid(index, e.to_string()))
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
