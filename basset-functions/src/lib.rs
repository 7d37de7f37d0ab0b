//! Function invocation layer for Basset.
//!
//! A [`Function`] is a stateless unit of work invoked with a
//! [`FunctionRequest`] — named string parameters plus a client handle to the
//! entity host — and returning a [`FunctionResponse`] with an HTTP-shaped
//! status code and named result parameters.
//!
//! [`FunctionEngine`] is the host-side runner: it stamps run/engine ids and
//! started/completed instants onto the response, and converts a function's
//! `Err` into a 500 response so callers always receive a status.

mod engine;
mod request;
mod response;

pub use engine::FunctionEngine;
pub use request::FunctionRequest;
pub use response::FunctionResponse;

use async_trait::async_trait;
use thiserror::Error;

/// Result type for function bodies.
pub type FunctionResult<T> = Result<T, FunctionError>;

/// Errors a function body can surface to the engine.
#[derive(Debug, Error)]
pub enum FunctionError {
    /// A client call against the entity host failed.
    #[error(transparent)]
    Client(#[from] basset_client::ClientError),

    /// A required invocation parameter was absent or malformed.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Any other failure the function wants reported as a 500.
    #[error("{0}")]
    Failed(String),
}

/// A unit of work runnable by a [`FunctionEngine`].
///
/// Each invocation is independent; implementations hold configuration, not
/// per-run state.
#[async_trait]
pub trait Function: Send + Sync {
    async fn run(&self, request: FunctionRequest) -> FunctionResult<FunctionResponse>;
}
