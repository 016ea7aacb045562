//! Task record types shared across store backends.
//!
//! This module defines the primary entity ([`TaskRecord`]), the restricted
//! mutation shape ([`TaskPatch`]), and the identifier newtypes used to key
//! store operations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Macro to define a newtype wrapper around `String` with standard trait
/// implementations.
///
/// Each generated type:
/// - Is a transparent wrapper around `String` (no wire-format overhead)
/// - Derives `Clone`, `Debug`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Derives `Serialize` and `Deserialize` (transparent)
/// - Implements `From<String>` and `From<&str>` for ergonomic construction
/// - Implements `Display` that outputs the inner value
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Opaque unique identifier of a task record.
    ///
    /// Generated once at creation ([`TaskId::generate`]) and never reused.
    /// This is the primary key of the task table.
    ///
    /// Wrapping the raw `String` prevents accidental misuse — passing an
    /// [`OwnerId`] where a `TaskId` is expected is a compile-time error.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskvault_store::TaskId;
    ///
    /// let id = TaskId::from("3f1c9a2e-...");
    /// assert_eq!(id.as_str(), "3f1c9a2e-...");
    /// ```
    TaskId
);

define_id!(
    /// Identifier of the authenticated user that owns a task record.
    ///
    /// Set once at creation from the verified token's subject claim and
    /// never changed. This is the partition key of the owner secondary
    /// index used for owner-scoped listing.
    OwnerId
);

impl TaskId {
    /// Generates a fresh, globally unique task identifier (UUID v4).
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// A single task record.
///
/// `task_id`, `owner_id` and `created_at` are immutable after creation;
/// `name`, `due_date` and `done` are mutable through [`TaskPatch`];
/// `attachment_url` is set out-of-band when a file is attached.
///
/// Wire names follow the JSON contract of the HTTP surface
/// (`taskId`, `ownerId`, `dueDate`, `createdAt`, `attachmentUrl`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Primary key. Immutable.
    pub task_id: TaskId,
    /// Owning user. Immutable, indexed for owner-scoped listing.
    pub owner_id: OwnerId,
    /// Free-text label.
    pub name: String,
    /// Due date (calendar date, no time component).
    pub due_date: NaiveDate,
    /// Completion flag. Defaults to `false` at creation.
    pub done: bool,
    /// Creation timestamp. Immutable.
    pub created_at: DateTime<Utc>,
    /// Optional reference to an externally stored file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl TaskRecord {
    /// Creates a new record for `owner_id` with a generated [`TaskId`],
    /// `created_at` set to the current time, `done = false` and no
    /// attachment.
    #[must_use]
    pub fn new(owner_id: OwnerId, name: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            task_id: TaskId::generate(),
            owner_id,
            name: name.into(),
            due_date,
            done: false,
            created_at: Utc::now(),
            attachment_url: None,
        }
    }

    /// Applies a patch to the three mutable fields, leaving `task_id`,
    /// `owner_id`, `created_at` and `attachment_url` untouched.
    pub fn apply(&mut self, patch: &TaskPatch) {
        self.name = patch.name.clone();
        self.due_date = patch.due_date;
        self.done = patch.done;
    }
}

/// Partial update restricted to exactly the mutable fields of a
/// [`TaskRecord`].
///
/// The public update contract permits changing `name`, `due_date` and
/// `done` only; everything else is immutable or managed out-of-band.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New free-text label.
    pub name: String,
    /// New due date.
    pub due_date: NaiveDate,
    /// New completion flag.
    pub done: bool,
}
