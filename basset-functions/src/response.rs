//! The fixed-shape response every function invocation produces.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Function invocation result: an HTTP-shaped status code plus named string
/// parameters, stamped by the engine with run/engine ids and timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    /// Run id, stamped by the engine.
    #[serde(default)]
    pub id: String,
    /// Id of the engine that ran the function, stamped by the engine.
    #[serde(default)]
    pub engine_id: String,
    pub status_code: u16,
    /// Unix nanoseconds; stamped by the engine.
    #[serde(default)]
    pub started: i64,
    /// Unix nanoseconds; stamped by the engine.
    #[serde(default)]
    pub completed: i64,
    /// Named result parameters in insertion order, one value per name.
    #[serde(default)]
    parameters: Vec<(String, String)>,
}

impl FunctionResponse {
    pub fn new(status_code: u16) -> Self {
        Self {
            id: String::new(),
            engine_id: String::new(),
            status_code,
            started: 0,
            completed: 0,
            parameters: Vec::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(200)
    }

    pub fn ok_message(message: impl Into<String>) -> Self {
        let mut response = Self::new(200);
        response.add_parameter("message", message);
        response
    }

    /// 200 response carrying a JSON payload in the `content` parameter.
    pub fn ok_json<T: Serialize>(value: &T) -> serde_json::Result<Self> {
        let mut response = Self::new(200);
        response.add_parameter("contentType", "application/json");
        response.add_parameter("content", serde_json::to_string(value)?);
        Ok(response)
    }

    pub fn created() -> Self {
        Self::new(201)
    }

    pub fn accepted() -> Self {
        Self::new(202)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        let mut response = Self::new(400);
        response.add_parameter("message", message);
        response
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        let mut response = Self::new(404);
        response.add_parameter("message", message);
        response
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        let mut response = Self::new(500);
        response.add_parameter("message", message);
        response
    }

    /// True for 2xx status codes.
    pub fn success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Adds a named parameter, replacing any earlier value under the name.
    /// Empty names and empty values are ignored.
    pub fn add_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if name.is_empty() || value.is_empty() {
            return;
        }
        match self.parameters.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.parameters.push((name, value)),
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// A parameter parsed to a concrete type, when present and parseable.
    pub fn parameter_as<T: FromStr>(&self, name: &str) -> Option<T> {
        self.parameter(name).and_then(|v| v.parse().ok())
    }

    /// Parameters in insertion order.
    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }
}

impl Default for FunctionResponse {
    fn default() -> Self {
        Self::ok()
    }
}
