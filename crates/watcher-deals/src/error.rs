//! Deal validation errors.

use thiserror::Error;

/// Errors raised when caller-supplied deal data fails validation.
///
/// Every variant is a client fault; none of them is raised after a write.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DealError {
    /// The partial record carried no ASIN, or an empty one.
    #[error("ASIN is required")]
    MissingAsin,

    /// A partial record carried a known field of the wrong type.
    #[error("Invalid deal: {0}")]
    InvalidPartial(String),

    /// A bulk replacement was not a JSON array.
    #[error("Deals must be an array")]
    NotAnArray,

    /// An element of a bulk replacement is not a valid deal.
    #[error("Invalid deal at index {index}: {reason}")]
    InvalidDeal { index: usize, reason: String },

    /// The same ASIN appears more than once in a bulk replacement.
    #[error("Duplicate ASIN in deals: {0}")]
    DuplicateAsin(String),
}

impl DealError {
    /// Create an invalid-element error.
    pub fn invalid(index: usize, reason: impl Into<String>) -> Self {
        DealError::InvalidDeal {
            index,
            reason: reason.into(),
        }
    }
}
