//! API surface for the TaskVault backend.
//!
//! This crate composes the two core components — the token verifier
//! (`taskvault-authn`) and the record store adapter (`taskvault-store`) —
//! into the surface the hosting gateway consumes:
//!
//! - **[`TaskService`]**: owner-scoped task operations (identity generation, ownership
//!   enforcement) over any [`TaskStore`](taskvault_store::TaskStore)
//! - **[`Api`]**: the four HTTP entry points (create / list / update / delete), each verifying
//!   the bearer credential and performing at most one store operation
//! - **[`authorizer`]**: the gateway authorizer decision (IAM-style allow/deny policy)
//!
//! Every invocation is stateless and independent; concurrency comes from
//! the hosting platform running many invocations in parallel, not from
//! anything in here.
//!
//! # Example
//!
//! ```
//! use taskvault_api::{Api, ApiRequest, TaskService};
//! use taskvault_authn::TokenVerifier;
//! use taskvault_store::MemoryTaskStore;
//!
//! # async fn example(verifier: TokenVerifier, request: ApiRequest) {
//! let api = Api::new(verifier, TaskService::new(MemoryTaskStore::new()));
//!
//! let response = api.list_tasks(&request).await;
//! assert!(response.status_code == 200 || response.status_code == 401);
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod authorizer;
pub mod handlers;
pub mod request;
pub mod response;
pub mod service;

// Re-export primary types at crate root for convenience
pub use authorizer::{AuthorizerRequest, AuthorizerResponse, Effect, authorize};
pub use handlers::Api;
pub use request::{ApiRequest, CreateTaskRequest, UpdateTaskRequest};
pub use response::ApiResponse;
pub use service::TaskService;
