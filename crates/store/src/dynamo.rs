//! DynamoDB store backend for task persistence.
//!
//! [`DynamoTaskStore`] implements [`TaskStore`] using Amazon DynamoDB as the
//! underlying document store. It maps the five trait methods to DynamoDB API
//! calls: `PutItem`, `GetItem`, `Query` (on the owner secondary index),
//! `UpdateItem` (with a `ConditionExpression` so a missing record fails
//! instead of upserting), and `DeleteItem`.
//!
//! # Table Schema
//!
//! | Attribute       | Type | Description                                |
//! |-----------------|------|--------------------------------------------|
//! | `taskId`        | S    | Partition key                              |
//! | `ownerId`       | S    | Partition key of the owner secondary index |
//! | `name`          | S    | Free-text label                            |
//! | `dueDate`       | S    | ISO-8601 calendar date                     |
//! | `done`          | BOOL | Completion flag                            |
//! | `createdAt`     | S    | RFC 3339 timestamp                         |
//! | `attachmentUrl` | S    | Optional file reference (omitted if unset) |
//!
//! Table and index names come from [`StoreConfig`], not from code.
//!
//! # Pagination
//!
//! `Query` results are paginated by DynamoDB; [`list_by_owner`] drains
//! `LastEvaluatedKey` pages before returning, so callers always see the
//! complete owner-scoped set.
//!
//! # Client Reuse
//!
//! The DynamoDB client is constructed once per process behind
//! [`shared_client`] and reused across invocations. There is no explicit
//! teardown.
//!
//! [`list_by_owner`]: TaskStore::list_by_owner

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, types::AttributeValue};
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::OnceCell;

use crate::{
    config::StoreConfig,
    error::{StoreError, StoreResult},
    store::TaskStore,
    task::{OwnerId, TaskId, TaskPatch, TaskRecord},
};

const ATTR_TASK_ID: &str = "taskId";
const ATTR_OWNER_ID: &str = "ownerId";
const ATTR_NAME: &str = "name";
const ATTR_DUE_DATE: &str = "dueDate";
const ATTR_DONE: &str = "done";
const ATTR_CREATED_AT: &str = "createdAt";
const ATTR_ATTACHMENT_URL: &str = "attachmentUrl";

/// Date format stored in the `dueDate` attribute.
const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Process-wide DynamoDB client, initialized on first use.
static SHARED_CLIENT: OnceCell<Client> = OnceCell::const_new();

/// Returns the process-wide DynamoDB client, constructing it on first call.
///
/// Credentials and region come from the standard AWS config chain
/// (environment, profiles, IMDS). When `endpoint_url` is set the client
/// targets a local store instance instead.
///
/// The client is cheap to clone; all clones share the same connection pool.
pub async fn shared_client(endpoint_url: Option<&str>) -> &'static Client {
    SHARED_CLIENT
        .get_or_init(|| async {
            let sdk_config =
                aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
            if let Some(url) = endpoint_url {
                builder = builder.endpoint_url(url);
            }
            Client::from_conf(builder.build())
        })
        .await
}

/// DynamoDB-backed task store.
///
/// A thin adapter: each call is one round trip, failures are surfaced
/// immediately, nothing is cached or retried. Domain rules (identity,
/// ownership) live with the caller.
///
/// # Examples
///
/// ```rust,no_run
/// use taskvault_store::{DynamoTaskStore, StoreConfig};
///
/// # async fn example() -> Result<(), taskvault_store::StoreError> {
/// // From environment (TASKS_TABLE / OWNER_INDEX):
/// let store = DynamoTaskStore::from_env().await?;
///
/// // With a pre-built client:
/// let config = StoreConfig::builder().table_name("tasks").owner_index("ownerIdIndex").build()?;
/// let client = taskvault_store::dynamo::shared_client(None).await.clone();
/// let store = DynamoTaskStore::new(client, config);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DynamoTaskStore {
    client: Client,
    config: StoreConfig,
}

impl DynamoTaskStore {
    /// Creates a store with a pre-built DynamoDB client.
    ///
    /// The table must already exist with `taskId` as its partition key and
    /// a secondary index keyed by `ownerId` under the configured name.
    pub fn new(client: Client, config: StoreConfig) -> Self {
        Self { client, config }
    }

    /// Creates a store from the given configuration, reusing the
    /// process-wide client.
    pub async fn from_config(config: StoreConfig) -> Self {
        let client = shared_client(config.endpoint_url()).await.clone();
        Self { client, config }
    }

    /// Creates a store from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] when required environment variables
    /// are unset.
    pub async fn from_env() -> StoreResult<Self> {
        let config = StoreConfig::from_env()?;
        Ok(Self::from_config(config).await)
    }
}

// ---------------------------------------------------------------------------
// Attribute mapping
// ---------------------------------------------------------------------------

/// Serializes a record into DynamoDB item attributes.
///
/// `attachmentUrl` is omitted entirely when unset rather than stored as an
/// empty string.
fn record_to_item(record: &TaskRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::from([
        (ATTR_TASK_ID.to_owned(), AttributeValue::S(record.task_id.as_str().to_owned())),
        (ATTR_OWNER_ID.to_owned(), AttributeValue::S(record.owner_id.as_str().to_owned())),
        (ATTR_NAME.to_owned(), AttributeValue::S(record.name.clone())),
        (
            ATTR_DUE_DATE.to_owned(),
            AttributeValue::S(record.due_date.format(DUE_DATE_FORMAT).to_string()),
        ),
        (ATTR_DONE.to_owned(), AttributeValue::Bool(record.done)),
        (ATTR_CREATED_AT.to_owned(), AttributeValue::S(record.created_at.to_rfc3339())),
    ]);

    if let Some(url) = &record.attachment_url {
        item.insert(ATTR_ATTACHMENT_URL.to_owned(), AttributeValue::S(url.clone()));
    }

    item
}

/// Extracts a required string attribute from an item.
fn string_attr(item: &HashMap<String, AttributeValue>, name: &str) -> StoreResult<String> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| StoreError::serialization(format!("missing or invalid {name} attribute")))
}

/// Deserializes DynamoDB item attributes back into a record.
fn item_to_record(item: &HashMap<String, AttributeValue>) -> StoreResult<TaskRecord> {
    let due_date_raw = string_attr(item, ATTR_DUE_DATE)?;
    let due_date = NaiveDate::parse_from_str(&due_date_raw, DUE_DATE_FORMAT).map_err(|e| {
        StoreError::serialization_with_source(format!("invalid dueDate '{due_date_raw}'"), e)
    })?;

    let created_at_raw = string_attr(item, ATTR_CREATED_AT)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_raw)
        .map_err(|e| {
            StoreError::serialization_with_source(format!("invalid createdAt '{created_at_raw}'"), e)
        })?
        .with_timezone(&Utc);

    let done = item
        .get(ATTR_DONE)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| StoreError::serialization("missing or invalid done attribute"))?;

    Ok(TaskRecord {
        task_id: TaskId::from(string_attr(item, ATTR_TASK_ID)?),
        owner_id: OwnerId::from(string_attr(item, ATTR_OWNER_ID)?),
        name: string_attr(item, ATTR_NAME)?,
        due_date,
        done,
        created_at,
        attachment_url: item.get(ATTR_ATTACHMENT_URL).and_then(|v| v.as_s().ok()).cloned(),
    })
}

// ---------------------------------------------------------------------------
// TaskStore implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl TaskStore for DynamoTaskStore {
    #[tracing::instrument(skip(self, record), fields(task_id = %record.task_id))]
    async fn create(&self, record: TaskRecord) -> StoreResult<TaskRecord> {
        self.client
            .put_item()
            .table_name(self.config.table_name())
            .set_item(Some(record_to_item(&record)))
            .send()
            .await
            .map_err(|e| {
                StoreError::write_with_source(
                    format!("DynamoDB put failed for task {}", record.task_id),
                    e,
                )
            })?;

        Ok(record)
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: &TaskId) -> StoreResult<Option<TaskRecord>> {
        let output = self
            .client
            .get_item()
            .table_name(self.config.table_name())
            .key(ATTR_TASK_ID, AttributeValue::S(id.as_str().to_owned()))
            .send()
            .await
            .map_err(|e| {
                StoreError::read_with_source(format!("DynamoDB get failed for task {id}"), e)
            })?;

        output.item().map(item_to_record).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn list_by_owner(&self, owner_id: &OwnerId) -> StoreResult<Vec<TaskRecord>> {
        let mut records = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let mut query = self
                .client
                .query()
                .table_name(self.config.table_name())
                .index_name(self.config.owner_index())
                .key_condition_expression("ownerId = :ownerId")
                .expression_attribute_values(
                    ":ownerId",
                    AttributeValue::S(owner_id.as_str().to_owned()),
                );

            if let Some(start_key) = exclusive_start_key.take() {
                query = query.set_exclusive_start_key(Some(start_key));
            }

            let output = query.send().await.map_err(|e| {
                StoreError::read_with_source(
                    format!("DynamoDB query failed for owner {owner_id}"),
                    e,
                )
            })?;

            for item in output.items() {
                records.push(item_to_record(item)?);
            }

            match output.last_evaluated_key() {
                Some(last_key) if !last_key.is_empty() => {
                    exclusive_start_key = Some(last_key.clone());
                },
                _ => break,
            }
        }

        Ok(records)
    }

    #[tracing::instrument(skip(self, patch))]
    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> StoreResult<TaskPatch> {
        // `name` is a DynamoDB reserved word and must go through an
        // expression attribute name.
        let result = self
            .client
            .update_item()
            .table_name(self.config.table_name())
            .key(ATTR_TASK_ID, AttributeValue::S(id.as_str().to_owned()))
            .update_expression("SET #name = :name, dueDate = :dueDate, done = :done")
            .condition_expression("attribute_exists(taskId)")
            .expression_attribute_names("#name", ATTR_NAME)
            .expression_attribute_values(":name", AttributeValue::S(patch.name.clone()))
            .expression_attribute_values(
                ":dueDate",
                AttributeValue::S(patch.due_date.format(DUE_DATE_FORMAT).to_string()),
            )
            .expression_attribute_values(":done", AttributeValue::Bool(patch.done))
            .send()
            .await;

        match result {
            Ok(_) => Ok(patch.clone()),
            Err(sdk_err) => {
                // The condition expression suppresses DynamoDB's default
                // upsert: a missing record is a NotFound, not a new row.
                if sdk_err
                    .as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception())
                {
                    return Err(StoreError::not_found(id.as_str()));
                }
                Err(StoreError::write_with_source(
                    format!("DynamoDB update failed for task {id}"),
                    sdk_err,
                ))
            },
        }
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &TaskId) -> StoreResult<()> {
        self.client
            .delete_item()
            .table_name(self.config.table_name())
            .key(ATTR_TASK_ID, AttributeValue::S(id.as_str().to_owned()))
            .send()
            .await
            .map_err(|e| {
                StoreError::write_with_source(format!("DynamoDB delete failed for task {id}"), e)
            })?;

        Ok(())
    }
}
