//! HTTP entry points.
//!
//! One handler per endpoint, each composing the same sequence: verify the
//! bearer credential, take the subject as the owner identity, perform at
//! most one service operation, shape the response. There is no shared
//! mutable state between invocations; a handler call is independent of
//! every other.

use taskvault_authn::{TokenVerifier, Verdict};
use taskvault_store::{OwnerId, TaskId, TaskStore};

use crate::{
    request::{ApiRequest, CreateTaskRequest, UpdateTaskRequest},
    response::ApiResponse,
    service::TaskService,
};

/// Path parameter naming the task id for update and delete.
const PARAM_TASK_ID: &str = "taskId";

/// The four task endpoints bound to a verifier and a store.
///
/// Constructed once per process and shared across invocations; both
/// members are immutable after construction.
///
/// # Example
///
/// ```no_run
/// use taskvault_api::{Api, ApiRequest, TaskService};
/// use taskvault_authn::{AuthConfig, TokenVerifier};
/// use taskvault_store::DynamoTaskStore;
///
/// # async fn example(request: ApiRequest) -> Result<(), Box<dyn std::error::Error>> {
/// let verifier = TokenVerifier::from_config(&AuthConfig::from_env()?)?;
/// let store = DynamoTaskStore::from_env().await?;
/// let api = Api::new(verifier, TaskService::new(store));
///
/// let response = api.create_task(&request).await;
/// println!("{}", response.status_code);
/// # Ok(())
/// # }
/// ```
pub struct Api<S> {
    verifier: TokenVerifier,
    service: TaskService<S>,
}

impl<S: TaskStore> Api<S> {
    /// Creates the endpoint surface from a verifier and a service.
    pub fn new(verifier: TokenVerifier, service: TaskService<S>) -> Self {
        Self { verifier, service }
    }

    /// Verifies the request credential and yields the owner identity.
    ///
    /// Any failure becomes a uniform access-denied response.
    fn authenticate(&self, request: &ApiRequest) -> Result<OwnerId, Box<ApiResponse>> {
        match self.verifier.authorize(request.authorization()) {
            Verdict::Authorized(claims) => Ok(OwnerId::from(claims.sub.as_str())),
            Verdict::Denied => Err(Box::new(ApiResponse::access_denied())),
        }
    }

    /// `POST /tasks` — creates a task, returns 201 with the created item.
    #[tracing::instrument(skip(self, request))]
    pub async fn create_task(&self, request: &ApiRequest) -> ApiResponse {
        let owner = match self.authenticate(request) {
            Ok(owner) => owner,
            Err(denied) => return *denied,
        };

        let body: CreateTaskRequest = match parse_body(request) {
            Ok(body) => body,
            Err(response) => return *response,
        };

        match self.service.create_task(&owner, body).await {
            Ok(record) => ApiResponse::created(&record),
            Err(e) => ApiResponse::from_store_error(&e),
        }
    }

    /// `GET /tasks` — returns 200 with the caller's tasks.
    #[tracing::instrument(skip(self, request))]
    pub async fn list_tasks(&self, request: &ApiRequest) -> ApiResponse {
        let owner = match self.authenticate(request) {
            Ok(owner) => owner,
            Err(denied) => return *denied,
        };

        match self.service.list_tasks(&owner).await {
            Ok(records) => ApiResponse::ok_items(&records),
            Err(e) => ApiResponse::from_store_error(&e),
        }
    }

    /// `PATCH /tasks/{taskId}` — updates the mutable fields, returns 200.
    #[tracing::instrument(skip(self, request))]
    pub async fn update_task(&self, request: &ApiRequest) -> ApiResponse {
        let owner = match self.authenticate(request) {
            Ok(owner) => owner,
            Err(denied) => return *denied,
        };

        let id = match task_id_parameter(request) {
            Ok(id) => id,
            Err(response) => return *response,
        };

        let body: UpdateTaskRequest = match parse_body(request) {
            Ok(body) => body,
            Err(response) => return *response,
        };

        match self.service.update_task(&owner, &id, body).await {
            Ok(patch) => ApiResponse::ok_item(&patch),
            Err(e) => ApiResponse::from_store_error(&e),
        }
    }

    /// `DELETE /tasks/{taskId}` — deletes the task, returns 200.
    ///
    /// Deleting an id that does not exist also returns 200.
    #[tracing::instrument(skip(self, request))]
    pub async fn delete_task(&self, request: &ApiRequest) -> ApiResponse {
        let owner = match self.authenticate(request) {
            Ok(owner) => owner,
            Err(denied) => return *denied,
        };

        let id = match task_id_parameter(request) {
            Ok(id) => id,
            Err(response) => return *response,
        };

        match self.service.delete_task(&owner, &id).await {
            Ok(()) => ApiResponse::ok_empty(),
            Err(e) => ApiResponse::from_store_error(&e),
        }
    }
}

/// Parses the JSON request body, mapping absence or malformed JSON to 400.
fn parse_body<T: serde::de::DeserializeOwned>(
    request: &ApiRequest,
) -> Result<T, Box<ApiResponse>> {
    let body = request
        .body
        .as_deref()
        .ok_or_else(|| Box::new(ApiResponse::bad_request("Request body is required")))?;

    serde_json::from_str(body).map_err(|e| {
        tracing::debug!(error = %e, "request body failed to parse");
        Box::new(ApiResponse::bad_request("Invalid request body"))
    })
}

/// Extracts the `taskId` path parameter, mapping absence to 400.
fn task_id_parameter(request: &ApiRequest) -> Result<TaskId, Box<ApiResponse>> {
    request
        .path_parameter(PARAM_TASK_ID)
        .map(TaskId::from)
        .ok_or_else(|| Box::new(ApiResponse::bad_request("Missing taskId path parameter")))
}
