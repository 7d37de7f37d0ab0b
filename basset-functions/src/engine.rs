//! Host-side runner for functions.

use std::collections::HashMap;
use std::sync::Arc;

use basset_client::EntityClient;
use basset_types::unix_now_nanos;
use tracing::{error, info};
use uuid::Uuid;

use crate::request::FunctionRequest;
use crate::response::FunctionResponse;
use crate::Function;

/// Runs one function against an entity client and a parameter set.
///
/// The engine owns invocation bookkeeping: a fresh run id per run (unless
/// one is supplied), started/completed instants, and the guarantee that the
/// caller always gets a response — a function error becomes a 500 carrying
/// the error message.
pub struct FunctionEngine<F> {
    engine_id: String,
    function: F,
    client: Arc<dyn EntityClient>,
    parameters: HashMap<String, String>,
    run_id: Option<String>,
}

impl<F: Function> FunctionEngine<F> {
    pub fn new(function: F, client: Arc<dyn EntityClient>) -> Self {
        Self {
            engine_id: Uuid::new_v4().to_string(),
            function,
            client,
            parameters: HashMap::new(),
            run_id: None,
        }
    }

    /// Sets the caller-supplied invocation parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: HashMap<String, String>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Pins the run id instead of generating one per run.
    #[must_use]
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    pub fn engine_id(&self) -> &str {
        &self.engine_id
    }

    /// Invokes the function once and returns its stamped response.
    pub async fn run(&self) -> FunctionResponse {
        let run_id = self
            .run_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let started = unix_now_nanos();
        info!(run_id = %run_id, engine_id = %self.engine_id, "function started");

        let request = FunctionRequest::new(
            run_id.clone(),
            self.parameters.clone(),
            self.client.clone(),
        );

        let mut response = match self.function.run(request).await {
            Ok(response) => {
                info!(run_id = %run_id, "function completed");
                response
            }
            Err(e) => {
                error!(run_id = %run_id, error = %e, "function failed");
                FunctionResponse::internal_error(e.to_string())
            }
        };

        response.id = run_id;
        response.engine_id = self.engine_id.clone();
        response.started = started;
        response.completed = unix_now_nanos();
        response
    }
}
