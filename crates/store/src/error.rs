//! Store error types and result alias.
//!
//! This module defines the error types that can occur during store
//! operations. Both backends map their internal failures to these
//! standardized variants.
//!
//! # Error Types
//!
//! - [`StoreError::NotFound`] - A record keyed by `id` does not exist
//! - [`StoreError::Read`] - The underlying read/query round trip failed
//! - [`StoreError::Write`] - The underlying write round trip failed
//! - [`StoreError::Serialization`] - Record encoding/decoding failed
//! - [`StoreError::Config`] - Store configuration is missing or invalid
//!
//! An empty owner-scoped listing is **not** an error; only a point lookup
//! that must find a record reports [`StoreError::NotFound`].

use std::sync::Arc;

use thiserror::Error;

/// A boxed error type for source chain tracking.
pub type BoxError = Arc<dyn std::error::Error + Send + Sync>;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
///
/// Errors preserve their source chain via the `#[source]` attribute,
/// enabling debugging tools to display the full error context.
///
/// # Non-exhaustive
///
/// This enum is marked `#[non_exhaustive]` — new variants may be added in
/// future minor releases without a semver-breaking change. Downstream match
/// expressions must include a wildcard arm (`_ =>`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The requested record was not found.
    ///
    /// Raised by operations that require the record to exist (update of a
    /// non-existent id). Point lookups return `Ok(None)` instead.
    #[error("Task not found: {key}")]
    NotFound {
        /// The record key that was not found.
        key: String,
    },

    /// A read or query round trip to the underlying store failed.
    #[error("Store read failed: {message}")]
    Read {
        /// Description of the read failure.
        message: String,
        /// The underlying error that caused the read to fail.
        #[source]
        source: Option<BoxError>,
    },

    /// A write round trip to the underlying store failed.
    ///
    /// Covers network failures, throttling and store-side validation.
    /// Writes are not retried by this layer.
    #[error("Store write failed: {message}")]
    Write {
        /// Description of the write failure.
        message: String,
        /// The underlying error that caused the write to fail.
        #[source]
        source: Option<BoxError>,
    },

    /// A record could not be encoded for storage or decoded on retrieval.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure.
        message: String,
        /// The underlying error that caused serialization to fail.
        #[source]
        source: Option<BoxError>,
    },

    /// Store configuration is missing or invalid.
    #[error("Invalid store configuration: {0}")]
    Config(String),
}

impl StoreError {
    /// Creates a new `NotFound` error for the given key.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Creates a new `Read` error with the given message.
    #[must_use]
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read { message: message.into(), source: None }
    }

    /// Creates a new `Read` error with a message and source error.
    #[must_use]
    pub fn read_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Read { message: message.into(), source: Some(Arc::new(source)) }
    }

    /// Creates a new `Write` error with the given message.
    #[must_use]
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write { message: message.into(), source: None }
    }

    /// Creates a new `Write` error with a message and source error.
    #[must_use]
    pub fn write_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Write { message: message.into(), source: Some(Arc::new(source)) }
    }

    /// Creates a new `Serialization` error with the given message.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization { message: message.into(), source: None }
    }

    /// Creates a new `Serialization` error with a message and source error.
    #[must_use]
    pub fn serialization_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Serialization { message: message.into(), source: Some(Arc::new(source)) }
    }

    /// Creates a new `Config` error with the given message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::not_found("task-1");
        assert_eq!(err.to_string(), "Task not found: task-1");

        let err = StoreError::write("throttled");
        assert_eq!(err.to_string(), "Store write failed: throttled");

        let err = StoreError::config("TASKS_TABLE must be set");
        assert_eq!(err.to_string(), "Invalid store configuration: TASKS_TABLE must be set");
    }

    #[test]
    fn test_source_chain_preserved() {
        use std::error::Error;

        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = StoreError::read_with_source("connection failed", inner);

        let source = err.source().expect("source chain must be preserved");
        assert_eq!(source.to_string(), "refused");
    }

    #[test]
    fn test_errors_without_source() {
        use std::error::Error;

        let err = StoreError::write("validation rejected");
        assert!(err.source().is_none());
    }
}
