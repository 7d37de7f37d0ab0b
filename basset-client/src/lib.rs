//! Async entity client boundary for Basset.
//!
//! [`EntityClient`] is the seam between callers (functions, services, glue
//! code) and whatever hosts the entity content. [`LocalClient`] is the
//! in-process implementation over [`MemoryEntityStore`]; remote transports
//! implement the same trait.
//!
//! Missing content reads as `Ok(None)` or an empty collection. Errors mean
//! the request itself failed (malformed path, rejected transaction, host
//! unreachable), never "nothing there yet".

mod client;
mod error;
mod local;

pub use client::EntityClient;
pub use error::{ClientError, ClientResult};
pub use local::LocalClient;
