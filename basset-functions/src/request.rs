//! Invocation context handed to a function.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use basset_client::EntityClient;

use crate::{FunctionError, FunctionResult};

/// What a function receives per invocation: the run id, the caller-supplied
/// parameters, and a handle to the entity host.
#[derive(Clone)]
pub struct FunctionRequest {
    run_id: String,
    parameters: HashMap<String, String>,
    client: Arc<dyn EntityClient>,
}

impl FunctionRequest {
    pub fn new(
        run_id: impl Into<String>,
        parameters: HashMap<String, String>,
        client: Arc<dyn EntityClient>,
    ) -> Self {
        Self {
            run_id: run_id.into(),
            parameters,
            client,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// The entity host handle.
    pub fn client(&self) -> &Arc<dyn EntityClient> {
        &self.client
    }

    pub fn parameters(&self) -> &HashMap<String, String> {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// A required parameter parsed to a concrete type.
    pub fn require<T: FromStr>(&self, name: &str) -> FunctionResult<T> {
        self.parameter(name)
            .ok_or_else(|| FunctionError::InvalidParameter(name.to_string()))?
            .parse()
            .map_err(|_| FunctionError::InvalidParameter(name.to_string()))
    }
}

impl std::fmt::Debug for FunctionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRequest")
            .field("run_id", &self.run_id)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}
