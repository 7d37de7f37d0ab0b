//! In-memory entity host for Basset.
//!
//! [`MemoryEntityStore`] holds published entity content in per-class maps
//! behind one lock and applies transactions atomically: every entry in a
//! batch is validated and normalized before anything is written, so a bad
//! entry anywhere rejects the whole batch with the store untouched.
//!
//! Queries return the latest value for scalar classes and accumulated,
//! publish-ordered collections for set-like classes. A missing path or value
//! is `None`/empty, never an error; only malformed query paths fail.

mod error;
mod store;

pub use error::{StoreError, StoreResult};
pub use store::MemoryEntityStore;
