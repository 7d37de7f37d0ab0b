//! Error types for the entity host.

use basset_entities::NumberDataType;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when applying a transaction or querying the store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Malformed path or timestamp/duration literal.
    #[error(transparent)]
    Types(#[from] basset_types::Error),

    /// Number literal that does not parse under its declared subtype.
    #[error("invalid {data_type:?} literal at {path}: {value}")]
    InvalidNumber {
        path: String,
        data_type: NumberDataType,
        value: String,
    },

    /// Time range whose end precedes its start.
    #[error("time range end precedes start at {path}")]
    InvalidTimeRange { path: String },
}
