//! Outbound response shaping.
//!
//! Every response carries permissive cross-origin headers. Store failures
//! map to status codes here; verification failures never reach this module
//! with any detail — they surface as a uniform access-denied response.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::json;
use taskvault_store::StoreError;

/// A gateway-shaped proxy response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response headers, including CORS.
    pub headers: HashMap<String, String>,
    /// JSON body.
    pub body: String,
}

/// Permissive cross-origin headers attached to every response.
fn cors_headers() -> HashMap<String, String> {
    HashMap::from([
        ("Access-Control-Allow-Origin".to_owned(), "*".to_owned()),
        ("Access-Control-Allow-Credentials".to_owned(), "true".to_owned()),
    ])
}

impl ApiResponse {
    /// Builds a JSON response with the given status code.
    ///
    /// Serialization of `body` is infallible for the types used by the
    /// handlers; a failure degrades to an internal error response rather
    /// than a panic.
    #[must_use]
    pub fn json(status_code: u16, body: &impl Serialize) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self { status_code, headers: cors_headers(), body },
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize response body");
                Self::internal_error()
            },
        }
    }

    /// 201 with the created item: `{"item": ...}`.
    #[must_use]
    pub fn created(item: &impl Serialize) -> Self {
        Self::json(201, &json!({ "item": item }))
    }

    /// 200 with a list of items: `{"items": [...]}`.
    #[must_use]
    pub fn ok_items(items: &impl Serialize) -> Self {
        Self::json(200, &json!({ "items": items }))
    }

    /// 200 with a single item: `{"item": ...}`.
    #[must_use]
    pub fn ok_item(item: &impl Serialize) -> Self {
        Self::json(200, &json!({ "item": item }))
    }

    /// 200 with an empty body object.
    #[must_use]
    pub fn ok_empty() -> Self {
        Self::json(200, &json!({}))
    }

    /// 401 access denied.
    ///
    /// Deliberately uniform: no hint of which verification check failed.
    #[must_use]
    pub fn access_denied() -> Self {
        Self::json(401, &json!({ "message": "Access denied" }))
    }

    /// 400 with a short reason.
    #[must_use]
    pub fn bad_request(message: &str) -> Self {
        Self::json(400, &json!({ "message": message }))
    }

    /// 404 task not found.
    #[must_use]
    pub fn not_found() -> Self {
        Self::json(404, &json!({ "message": "Task not found" }))
    }

    /// 500 internal error, detail withheld.
    #[must_use]
    pub fn internal_error() -> Self {
        Self {
            status_code: 500,
            headers: cors_headers(),
            body: r#"{"message":"Internal server error"}"#.to_owned(),
        }
    }

    /// Maps a store failure to a response.
    ///
    /// `NotFound` becomes 404; every other store failure is a 500 with the
    /// detail kept in the logs.
    #[must_use]
    pub fn from_store_error(error: &StoreError) -> Self {
        match error {
            StoreError::NotFound { .. } => Self::not_found(),
            _ => {
                tracing::error!(error = %error, "store operation failed");
                Self::internal_error()
            },
        }
    }
}
