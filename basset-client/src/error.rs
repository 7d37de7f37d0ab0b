//! Error types for the client boundary.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur at the client boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// The host rejected a transaction or query.
    #[error(transparent)]
    Store(#[from] basset_store::StoreError),

    /// The host could not be reached or answered out of protocol.
    #[error("host error: {0}")]
    Host(String),
}
