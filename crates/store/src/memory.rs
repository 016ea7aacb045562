//! In-memory store backend implementation.
//!
//! This module provides [`MemoryTaskStore`], an in-memory implementation of
//! [`TaskStore`] suitable for testing and development.
//!
//! # Features
//!
//! - **Thread-safe**: Uses [`parking_lot::RwLock`] for concurrent access
//! - **Clone-shared**: All clones share the same underlying map
//! - **Faithful semantics**: update-of-missing fails, delete is idempotent,
//!   exactly like the production backend
//!
//! # Limitations
//!
//! Data is not persisted; everything is lost when the process exits.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::{
    error::{StoreError, StoreResult},
    store::TaskStore,
    task::{OwnerId, TaskId, TaskPatch, TaskRecord},
};

/// In-memory task store keyed by [`TaskId`].
///
/// Primarily intended for tests, but usable anywhere persistence is not
/// required. Owner-scoped listing is a filter scan; with test-sized data
/// that is indistinguishable from an index query.
///
/// # Cloning
///
/// `MemoryTaskStore` is cheaply cloneable via [`Arc`]. All clones share the
/// same underlying data.
#[derive(Debug, Default, Clone)]
pub struct MemoryTaskStore {
    tasks: Arc<RwLock<HashMap<TaskId, TaskRecord>>>,
}

impl MemoryTaskStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.read().len()
    }

    /// Returns `true` when the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.read().is_empty()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    #[tracing::instrument(skip(self, record), fields(task_id = %record.task_id))]
    async fn create(&self, record: TaskRecord) -> StoreResult<TaskRecord> {
        let mut tasks = self.tasks.write();
        tasks.insert(record.task_id.clone(), record.clone());
        Ok(record)
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: &TaskId) -> StoreResult<Option<TaskRecord>> {
        let tasks = self.tasks.read();
        Ok(tasks.get(id).cloned())
    }

    #[tracing::instrument(skip(self))]
    async fn list_by_owner(&self, owner_id: &OwnerId) -> StoreResult<Vec<TaskRecord>> {
        let tasks = self.tasks.read();
        Ok(tasks.values().filter(|record| &record.owner_id == owner_id).cloned().collect())
    }

    #[tracing::instrument(skip(self, patch))]
    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> StoreResult<TaskPatch> {
        let mut tasks = self.tasks.write();

        let record = tasks.get_mut(id).ok_or_else(|| StoreError::not_found(id.as_str()))?;
        record.apply(patch);

        Ok(patch.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &TaskId) -> StoreResult<()> {
        let mut tasks = self.tasks.write();
        // Removing a missing key is a no-op: delete is idempotent.
        tasks.remove(id);
        Ok(())
    }
}
