//! Core type definitions for Basset.
//!
//! This crate defines the fundamental, host-agnostic types used throughout
//! the entity platform:
//! - Hierarchical entity paths (`Namespace:/segment/segment`)
//! - Deterministic path-derived UUIDs
//! - Unix-nanosecond timestamps
//!
//! All entry, transaction, and store types build on these; nothing here
//! knows about entry variants or hosts.

mod path;
mod timestamp;

pub use path::{EntityPath, DEFAULT_NAMESPACE, NAMESPACE_DELIMITER, PATH_SEPARATOR};
pub use timestamp::{parse_duration, parse_timestamp, unix_now_nanos};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
