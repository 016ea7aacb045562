//! Task record store adapter for TaskVault.
//!
//! This crate provides the [`TaskStore`] trait and related types that form
//! the persistence layer of the TaskVault backend. Every HTTP entry point
//! performs at most one store operation per invocation through this
//! abstraction.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  HTTP Entry Points                          │
//! │        (create / list / update / delete handlers)           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    Service Layer                            │
//! │      (identity, ownership enforcement — taskvault-api)      │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  taskvault-store                            │
//! │                  TaskStore trait                            │
//! │        (create, get, list_by_owner, update, delete)         │
//! ├───────────────────┬─────────────────────────────────────────┤
//! │  MemoryTaskStore  │            DynamoTaskStore              │
//! │     (testing)     │            (production)                 │
//! └───────────────────┴─────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use taskvault_store::{MemoryTaskStore, OwnerId, TaskRecord, TaskStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryTaskStore::new();
//!     let due = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//!
//!     let record = TaskRecord::new(OwnerId::from("u1"), "Buy milk", due);
//!     store.create(record.clone()).await?;
//!
//!     let mine = store.list_by_owner(&OwnerId::from("u1")).await?;
//!     assert_eq!(mine.len(), 1);
//!
//!     store.delete(&record.task_id).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Available Backends
//!
//! | Backend | Use Case | Persistence |
//! |---------|----------|-------------|
//! | [`MemoryTaskStore`] | Testing, development | No |
//! | [`DynamoTaskStore`] | Production | Yes |
//!
//! # Error Handling
//!
//! All operations return [`StoreResult<T>`], which wraps potential
//! [`StoreError`] variants. Backends map their internal errors to these
//! standardized types; failures are surfaced immediately with no local
//! recovery.
//!
//! # Feature Flags
//!
//! - **`testutil`**: Enables the `testutil` module with shared test helpers (record factories,
//!   pre-populated stores, assertion macros). Enable this in `[dev-dependencies]` for integration
//!   tests.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod dynamo;
pub mod error;
pub mod memory;
pub mod store;
pub mod task;
#[cfg(any(test, feature = "testutil"))]
#[allow(clippy::expect_used)]
pub mod testutil;

// Re-export primary types at crate root for convenience
pub use config::{ENV_ENDPOINT, ENV_OWNER_INDEX, ENV_TABLE, StoreConfig};
pub use dynamo::DynamoTaskStore;
pub use error::{BoxError, StoreError, StoreResult};
pub use memory::MemoryTaskStore;
pub use store::TaskStore;
pub use task::{OwnerId, TaskId, TaskPatch, TaskRecord};
