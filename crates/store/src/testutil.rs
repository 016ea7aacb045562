//! Shared test utilities for store backend testing.
//!
//! This module provides common helpers for creating test records,
//! pre-populating stores, and asserting on [`StoreResult`] values. It is
//! feature-gated behind `testutil` to prevent leaking into production
//! builds.
//!
//! # Usage
//!
//! In integration tests, enable the feature in `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! taskvault-store = { path = "../store", features = ["testutil"] }
//! ```

use chrono::NaiveDate;

use crate::{
    error::{StoreError, StoreResult},
    memory::MemoryTaskStore,
    store::TaskStore,
    task::{OwnerId, TaskRecord},
};

/// Due date used by record factories: 2024-01-01.
#[must_use]
pub fn test_due_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
}

/// Creates a test record for `owner` with the given name and a fixed due
/// date.
#[must_use]
pub fn make_task(owner: &str, name: &str) -> TaskRecord {
    TaskRecord::new(OwnerId::from(owner), name, test_due_date())
}

/// Creates a [`MemoryTaskStore`] pre-populated with `count` records for
/// `owner`, named `"{owner}-task-{idx}"`.
///
/// # Panics
///
/// Panics if any `create` fails (should not happen with
/// `MemoryTaskStore`).
pub async fn populated_store(owner: &str, count: usize) -> MemoryTaskStore {
    let store = MemoryTaskStore::new();
    for i in 0..count {
        store
            .create(make_task(owner, &format!("{owner}-task-{i}")))
            .await
            .expect("populate create failed");
    }
    store
}

/// Asserts that a [`StoreResult`] is an `Err` matching the given
/// [`StoreError`] variant.
///
/// # Examples
///
/// ```no_run
/// // Requires the `testutil` feature to be enabled.
/// use taskvault_store::assert_store_error;
/// use taskvault_store::{StoreError, StoreResult};
///
/// let result: StoreResult<()> = Err(StoreError::not_found("missing"));
/// assert_store_error!(result, NotFound);
/// ```
#[macro_export]
macro_rules! assert_store_error {
    ($result:expr, $variant:ident) => {
        assert!(
            matches!($result, Err($crate::error::StoreError::$variant { .. })),
            "expected StoreError::{}, got: {:?}",
            stringify!($variant),
            $result,
        );
    };
    ($result:expr, $variant:ident, $msg:expr) => {
        assert!(
            matches!($result, Err($crate::error::StoreError::$variant { .. })),
            "{}: expected StoreError::{}, got: {:?}",
            $msg,
            stringify!($variant),
            $result,
        );
    };
}

/// Helper to verify that a result is a `NotFound` error.
pub fn is_not_found<T>(result: &StoreResult<T>) -> bool {
    matches!(result, Err(StoreError::NotFound { .. }))
}
