//! Inbound request shapes.
//!
//! [`ApiRequest`] models the gateway proxy event the handlers consume;
//! [`CreateTaskRequest`] and [`UpdateTaskRequest`] are the JSON bodies of
//! the create and update endpoints.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use taskvault_store::TaskPatch;

/// A gateway-shaped proxy request.
///
/// Only the pieces the handlers consume are modeled: headers (for the
/// bearer credential), path parameters (for the task id) and the raw body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiRequest {
    /// Request headers. Lookup is case-insensitive via
    /// [`header`](Self::header).
    pub headers: HashMap<String, String>,
    /// Path parameters, e.g. `taskId` for update/delete.
    pub path_parameters: HashMap<String, String>,
    /// Raw request body, if any.
    pub body: Option<String>,
}

impl ApiRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds a path parameter.
    #[must_use]
    pub fn with_path_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.path_parameters.insert(name.into(), value.into());
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the `Authorization` header value, if present.
    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.header("Authorization")
    }

    /// Returns a path parameter by exact name.
    #[must_use]
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters.get(name).map(String::as_str)
    }
}

/// Body of the create endpoint.
///
/// The caller supplies only `name` and `dueDate`; the service generates
/// the id and creation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Free-text label.
    pub name: String,
    /// Due date.
    pub due_date: NaiveDate,
}

/// Body of the update endpoint — exactly the three mutable fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New free-text label.
    pub name: String,
    /// New due date.
    pub due_date: NaiveDate,
    /// New completion flag.
    pub done: bool,
}

impl From<UpdateTaskRequest> for TaskPatch {
    fn from(request: UpdateTaskRequest) -> Self {
        TaskPatch { name: request.name, due_date: request.due_date, done: request.done }
    }
}
