use thiserror::Error;

use crate::models::{TableId, ZoneId};

/// Rejected operator input. The model is never modified when one of these is
/// returned; the prior valid value stays in place.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("dimension must be a positive finite number of feet, got {0}")]
    NonPositive(f64),
    #[error("price must be a finite amount of zero or more, got {0}")]
    InvalidPrice(f64),
    #[error("rotation must be one of 0, 90, 180 or 270 degrees, got {0}")]
    InvalidRotation(u16),
    #[error("unknown table {0}")]
    UnknownTable(TableId),
    #[error("unknown zone {0}")]
    UnknownZone(ZoneId),
    #[error("nothing is selected")]
    EmptySelection,
}

/// Failure reported by an [`crate::store::EventStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("event {0} not found")]
    NotFound(String),
    #[error("failed to encode floor plan: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        StoreError::Backend(err.to_string())
    }
}
