//! Task service: the business layer between handlers and the store.
//!
//! The service owns the pieces the store adapter deliberately doesn't:
//! identity generation at creation, and ownership enforcement on mutation.
//! The adapter stays ownership-blind; every ownership decision lives here.
//!
//! A record owned by a different caller is reported as not-found rather
//! than forbidden, so mutation probes don't distinguish "exists but not
//! yours" from "doesn't exist". Deleting an id that never existed remains
//! a silent success (idempotent delete).

use taskvault_store::{OwnerId, StoreError, StoreResult, TaskId, TaskPatch, TaskRecord, TaskStore};

use crate::request::{CreateTaskRequest, UpdateTaskRequest};

/// Owner-scoped task operations over a [`TaskStore`].
///
/// One invocation performs at most one mutation; reads done for ownership
/// checks are point lookups on the primary key.
#[derive(Debug, Clone)]
pub struct TaskService<S> {
    store: S,
}

impl<S: TaskStore> TaskService<S> {
    /// Creates a service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a task for `owner`.
    ///
    /// Generates the id and creation timestamp; `done` starts `false` and
    /// there is no attachment. Returns the stored record.
    #[tracing::instrument(skip(self, request), fields(owner = %owner))]
    pub async fn create_task(
        &self,
        owner: &OwnerId,
        request: CreateTaskRequest,
    ) -> StoreResult<TaskRecord> {
        let record = TaskRecord::new(owner.clone(), request.name, request.due_date);
        self.store.create(record).await
    }

    /// Lists all tasks belonging to `owner`.
    #[tracing::instrument(skip(self), fields(owner = %owner))]
    pub async fn list_tasks(&self, owner: &OwnerId) -> StoreResult<Vec<TaskRecord>> {
        self.store.list_by_owner(owner).await
    }

    /// Updates the mutable fields of `owner`'s task `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the task does not exist or
    /// belongs to a different owner.
    #[tracing::instrument(skip(self, request), fields(owner = %owner, task_id = %id))]
    pub async fn update_task(
        &self,
        owner: &OwnerId,
        id: &TaskId,
        request: UpdateTaskRequest,
    ) -> StoreResult<TaskPatch> {
        self.ensure_owned(owner, id).await?;
        self.store.update(id, &request.into()).await
    }

    /// Deletes `owner`'s task `id`.
    ///
    /// Deleting an id that does not exist succeeds silently. Deleting a
    /// task owned by someone else reports not-found and leaves the record
    /// in place.
    #[tracing::instrument(skip(self), fields(owner = %owner, task_id = %id))]
    pub async fn delete_task(&self, owner: &OwnerId, id: &TaskId) -> StoreResult<()> {
        match self.store.get(id).await? {
            // Idempotent: nothing to delete is a success, not an error.
            None => Ok(()),
            Some(record) if record.owner_id != *owner => {
                tracing::warn!("delete attempt on task owned by another user");
                Err(StoreError::not_found(id.as_str()))
            },
            Some(_) => self.store.delete(id).await,
        }
    }

    /// Point-reads `id` and verifies it belongs to `owner`.
    async fn ensure_owned(&self, owner: &OwnerId, id: &TaskId) -> StoreResult<()> {
        let record = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| StoreError::not_found(id.as_str()))?;

        if record.owner_id != *owner {
            tracing::warn!("mutation attempt on task owned by another user");
            return Err(StoreError::not_found(id.as_str()));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use chrono::NaiveDate;
    use taskvault_store::MemoryTaskStore;

    use super::*;

    fn service() -> TaskService<MemoryTaskStore> {
        TaskService::new(MemoryTaskStore::new())
    }

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
    }

    fn create_request(name: &str) -> CreateTaskRequest {
        CreateTaskRequest { name: name.into(), due_date: due() }
    }

    fn update_request(name: &str, done: bool) -> UpdateTaskRequest {
        UpdateTaskRequest { name: name.into(), due_date: due(), done }
    }

    #[tokio::test]
    async fn test_create_generates_identity() {
        let service = service();
        let owner = OwnerId::from("u1");

        let record =
            service.create_task(&owner, create_request("Buy milk")).await.expect("create");

        assert!(!record.task_id.as_str().is_empty());
        assert_eq!(record.owner_id, owner);
        assert!(!record.done);
        assert!(record.attachment_url.is_none());
    }

    #[tokio::test]
    async fn test_two_creates_get_distinct_ids() {
        let service = service();
        let owner = OwnerId::from("u1");

        let a = service.create_task(&owner, create_request("a")).await.expect("create a");
        let b = service.create_task(&owner, create_request("b")).await.expect("create b");

        assert_ne!(a.task_id, b.task_id);
    }

    #[tokio::test]
    async fn test_list_is_owner_scoped() {
        let service = service();
        service.create_task(&OwnerId::from("u1"), create_request("mine")).await.expect("create");
        service.create_task(&OwnerId::from("u2"), create_request("theirs")).await.expect("create");

        let mine = service.list_tasks(&OwnerId::from("u1")).await.expect("list");

        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "mine");
    }

    #[tokio::test]
    async fn test_update_own_task() {
        let service = service();
        let owner = OwnerId::from("u1");
        let record = service.create_task(&owner, create_request("Buy milk")).await.expect("create");

        service
            .update_task(&owner, &record.task_id, update_request("Buy milk and bread", true))
            .await
            .expect("update");

        let found = service.store().get(&record.task_id).await.expect("get").expect("exists");
        assert_eq!(found.name, "Buy milk and bread");
        assert!(found.done);
    }

    #[tokio::test]
    async fn test_update_foreign_task_reports_not_found() {
        let service = service();
        let record = service
            .create_task(&OwnerId::from("u1"), create_request("Buy milk"))
            .await
            .expect("create");

        let result = service
            .update_task(&OwnerId::from("u2"), &record.task_id, update_request("hijacked", true))
            .await;

        assert!(matches!(result, Err(StoreError::NotFound { .. })));

        // The record is untouched.
        let found = service.store().get(&record.task_id).await.expect("get").expect("exists");
        assert_eq!(found.name, "Buy milk");
    }

    #[tokio::test]
    async fn test_update_missing_task_reports_not_found() {
        let service = service();

        let result = service
            .update_task(&OwnerId::from("u1"), &TaskId::from("ghost"), update_request("x", false))
            .await;

        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_own_task() {
        let service = service();
        let owner = OwnerId::from("u1");
        let record = service.create_task(&owner, create_request("Buy milk")).await.expect("create");

        service.delete_task(&owner, &record.task_id).await.expect("delete");

        assert!(service.store().get(&record.task_id).await.expect("get").is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_task_is_silent_success() {
        let service = service();

        service
            .delete_task(&OwnerId::from("u1"), &TaskId::from("never-existed"))
            .await
            .expect("delete of missing id should succeed");
    }

    #[tokio::test]
    async fn test_delete_foreign_task_reports_not_found_and_keeps_record() {
        let service = service();
        let record = service
            .create_task(&OwnerId::from("u1"), create_request("Buy milk"))
            .await
            .expect("create");

        let result = service.delete_task(&OwnerId::from("u2"), &record.task_id).await;

        assert!(matches!(result, Err(StoreError::NotFound { .. })));
        assert!(service.store().get(&record.task_id).await.expect("get").is_some());
    }
}
