//! Configuration for the DynamoDB store backend.
//!
//! This module provides [`StoreConfig`], which names the table and the
//! owner secondary index the backend operates against. Both are supplied as
//! environment configuration, never hardcoded.

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Environment variable naming the task table.
pub const ENV_TABLE: &str = "TASKS_TABLE";

/// Environment variable naming the owner secondary index.
pub const ENV_OWNER_INDEX: &str = "OWNER_INDEX";

/// Environment variable overriding the store endpoint (local development).
pub const ENV_ENDPOINT: &str = "TASKS_ENDPOINT";

/// Configuration for [`DynamoTaskStore`](crate::DynamoTaskStore).
///
/// # Example
///
/// ```
/// use taskvault_store::StoreConfig;
///
/// let config = StoreConfig::builder()
///     .table_name("tasks")
///     .owner_index("ownerIdIndex")
///     .build()?;
/// # Ok::<(), taskvault_store::StoreError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Name of the task table.
    pub(crate) table_name: String,

    /// Name of the secondary index keyed by `ownerId`.
    pub(crate) owner_index: String,

    /// Optional endpoint override for a local store instance.
    #[serde(default)]
    pub(crate) endpoint_url: Option<String>,
}

#[bon::bon]
impl StoreConfig {
    /// Creates a new configuration, validating all required fields.
    ///
    /// # Arguments
    ///
    /// * `table_name` - Name of the task table. Must be non-empty.
    /// * `owner_index` - Name of the owner secondary index. Must be non-empty.
    ///
    /// # Optional Fields
    ///
    /// * `endpoint_url` - Endpoint override, e.g. `http://localhost:8000` for a local DynamoDB.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if `table_name` or `owner_index` is
    /// empty.
    #[builder]
    pub fn new(
        #[builder(into)] table_name: String,
        #[builder(into)] owner_index: String,
        #[builder(into)] endpoint_url: Option<String>,
    ) -> StoreResult<Self> {
        if table_name.is_empty() {
            return Err(StoreError::config("table_name cannot be empty"));
        }

        if owner_index.is_empty() {
            return Err(StoreError::config("owner_index cannot be empty"));
        }

        Ok(Self { table_name, owner_index, endpoint_url })
    }

    /// Loads the configuration from the process environment.
    ///
    /// Reads [`ENV_TABLE`] and [`ENV_OWNER_INDEX`] (required) and
    /// [`ENV_ENDPOINT`] (optional).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if a required variable is unset or
    /// empty.
    pub fn from_env() -> StoreResult<Self> {
        let table_name = std::env::var(ENV_TABLE)
            .map_err(|_| StoreError::config(format!("{ENV_TABLE} must be set")))?;
        let owner_index = std::env::var(ENV_OWNER_INDEX)
            .map_err(|_| StoreError::config(format!("{ENV_OWNER_INDEX} must be set")))?;
        let endpoint_url = std::env::var(ENV_ENDPOINT).ok();

        Self::builder()
            .table_name(table_name)
            .owner_index(owner_index)
            .maybe_endpoint_url(endpoint_url)
            .build()
    }

    /// Returns the table name.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Returns the owner index name.
    #[must_use]
    pub fn owner_index(&self) -> &str {
        &self.owner_index
    }

    /// Returns the endpoint override if configured.
    #[must_use]
    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = StoreConfig::builder().table_name("tasks").owner_index("ownerIdIndex").build();

        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.table_name(), "tasks");
        assert_eq!(config.owner_index(), "ownerIdIndex");
        assert!(config.endpoint_url().is_none());
    }

    #[test]
    fn test_config_with_endpoint() {
        let config = StoreConfig::builder()
            .table_name("tasks")
            .owner_index("ownerIdIndex")
            .endpoint_url("http://localhost:8000")
            .build()
            .unwrap();

        assert_eq!(config.endpoint_url(), Some("http://localhost:8000"));
    }

    #[test]
    fn test_validation_empty_table_name() {
        let result = StoreConfig::builder().table_name("").owner_index("ownerIdIndex").build();

        assert!(result.is_err());
    }

    #[test]
    fn test_validation_empty_owner_index() {
        let result = StoreConfig::builder().table_name("tasks").owner_index("").build();

        assert!(result.is_err());
    }

    #[test]
    fn test_config_deserialization_without_endpoint() {
        let json = r#"{
            "table_name": "tasks",
            "owner_index": "ownerIdIndex"
        }"#;

        let config: StoreConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.table_name, "tasks");
        assert!(config.endpoint_url.is_none());
    }
}
