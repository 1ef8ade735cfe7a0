//! Spans for deal collection operations.

use tracing::Span;

/// Create a span for one operation on the deal collection.
///
/// The `asin` field starts empty; record it once the ASIN is known:
///
/// ```rust
/// let span = watcher_observability::deal_span("ingest");
/// span.record("asin", "B001");
/// ```
#[must_use]
pub fn deal_span(operation: &'static str) -> Span {
    tracing::info_span!("deals", op = operation, asin = tracing::field::Empty)
}
