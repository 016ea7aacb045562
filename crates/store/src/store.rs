//! Store trait definition.
//!
//! This module defines the [`TaskStore`] trait, the core abstraction over
//! task record persistence. Both backends ([`MemoryTaskStore`],
//! [`DynamoTaskStore`]) implement this trait.
//!
//! # Design Philosophy
//!
//! The trait is a thin translation layer, not a business layer:
//! - **One round trip per call**: no caching, no retries, no batching
//! - **Async by default**: every operation can suspend on store I/O
//! - **Ownership-blind**: operations are keyed by [`TaskId`] alone; callers
//!   that want ownership enforcement perform it before invoking `update`
//!   or `delete`
//!
//! Queries split between a primary-key path (`get`, `update`, `delete`) and
//! a secondary-index path (`list_by_owner`) because the store's query model
//! requires an index to filter by a non-key attribute.
//!
//! [`MemoryTaskStore`]: crate::MemoryTaskStore
//! [`DynamoTaskStore`]: crate::DynamoTaskStore

use async_trait::async_trait;

use crate::{
    error::StoreResult,
    task::{OwnerId, TaskId, TaskPatch, TaskRecord},
};

/// Abstract store for task record persistence.
///
/// Implementations are expected to be thread-safe (`Send + Sync`) and
/// support concurrent invocations; each call is independent of every other.
///
/// # Operations
///
/// | Method | Description |
/// |--------|-------------|
/// | [`create`](TaskStore::create) | Unconditional write of a full record |
/// | [`get`](TaskStore::get) | Point lookup by primary key |
/// | [`list_by_owner`](TaskStore::list_by_owner) | Equality query on the owner index |
/// | [`update`](TaskStore::update) | Partial update of the mutable fields |
/// | [`delete`](TaskStore::delete) | Idempotent removal by primary key |
///
/// # Example
///
/// ```
/// use taskvault_store::{MemoryTaskStore, OwnerId, TaskRecord, TaskStore};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let store = MemoryTaskStore::new();
/// let due = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
///
/// let record = TaskRecord::new(OwnerId::from("u1"), "Buy milk", due);
/// let created = store.create(record.clone()).await.unwrap();
/// assert_eq!(created, record);
///
/// let found = store.get(&record.task_id).await.unwrap();
/// assert_eq!(found, Some(record));
/// # });
/// ```
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Writes the full record unconditionally.
    ///
    /// No existence check and no idempotency key: writing a record whose id
    /// already exists overwrites it. Returns the same record verbatim on
    /// success.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`](crate::StoreError::Write) if the
    /// underlying write fails (network, throttling, validation). Not
    /// retried by this layer.
    #[must_use = "store operations may fail and errors must be handled"]
    async fn create(&self, record: TaskRecord) -> StoreResult<TaskRecord>;

    /// Point lookup by primary key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if the record exists
    /// - `Ok(None)` if it doesn't — absence is not an error here
    /// - `Err(...)` on store errors
    #[must_use = "store operations may fail and errors must be handled"]
    async fn get(&self, id: &TaskId) -> StoreResult<Option<TaskRecord>>;

    /// Returns all records belonging to `owner_id`.
    ///
    /// Queries the owner secondary index with exact-match equality. If the
    /// store paginates internally, implementations drain all pages before
    /// returning — callers always see the complete set. Order is
    /// unspecified.
    ///
    /// Returns an empty vector (not an error) when no records exist for
    /// that owner.
    #[must_use = "store operations may fail and errors must be handled"]
    async fn list_by_owner(&self, owner_id: &OwnerId) -> StoreResult<Vec<TaskRecord>>;

    /// Partial update restricted to exactly the three mutable fields,
    /// keyed by `id` alone.
    ///
    /// Ownership is **not** checked at this layer; enforcement, if desired,
    /// is the caller's responsibility before invoking `update`.
    ///
    /// Updating a non-existent id fails with
    /// [`StoreError::NotFound`](crate::StoreError::NotFound) — it never
    /// creates a record. (The underlying store's default would be an
    /// upsert; implementations must suppress it.)
    ///
    /// Returns the applied patch on success.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`](crate::StoreError::NotFound) — no record with this id
    /// - [`StoreError::Write`](crate::StoreError::Write) — the write round trip failed
    #[must_use = "store operations may fail and errors must be handled"]
    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> StoreResult<TaskPatch>;

    /// Unconditional delete keyed by `id`.
    ///
    /// Succeeds (idempotently, no error) even if the record did not exist,
    /// mirroring the delete semantics of the underlying key-value store.
    #[must_use = "store operations may fail and errors must be handled"]
    async fn delete(&self, id: &TaskId) -> StoreResult<()>;
}
