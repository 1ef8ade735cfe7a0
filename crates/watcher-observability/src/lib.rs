//! Observability for the ASIN watcher.
//!
//! This crate provides:
//! - `LoggingConfig` / `init_logging` - `tracing` subscriber setup
//! - `deal_span` - Span for deal collection operations

mod logging;
mod span;

pub use logging::*;
pub use span::*;
