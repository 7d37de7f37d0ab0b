//! Typed entry variants and publish transactions for Basset.
//!
//! Defines the wire-facing types callers use to describe data bound for an
//! entity host:
//! - [`Entry`] / [`EntryPayload`] — one typed unit of data at a path
//! - [`PublishTransaction`] / [`Transaction`] — an atomic, ordered batch
//! - Value records ([`Observation`], [`LogRecord`], ...) returned by queries
//!
//! Entries carry raw path strings; path syntax and literal parseability are
//! the host's concern and are checked when a transaction is applied.

mod entry;
mod transaction;
mod values;

pub use entry::{Entry, EntryClass, EntryPayload, LogLevel, NumberDataType};
pub use transaction::{PublishTransaction, Transaction};
pub use values::{LogRecord, Observation, TimeRangeValue};
