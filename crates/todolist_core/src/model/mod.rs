//! Domain model for the task and category lists.
//!
//! # Responsibility
//! - Define the two persisted entity shapes shown by list controllers.
//! - Name the storage kind each entity maps to.
//!
//! # Invariants
//! - Every entity is identified by a store-assigned `EntityId`.
//! - Deletion is a hard delete; a deleted entity is never returned again.

pub mod category;
pub mod task;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier assigned by the store when an entity is inserted.
pub type EntityId = Uuid;

/// Persisted entity family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Task,
    Category,
}

impl EntityKind {
    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::Task => "tasks",
            Self::Category => "categories",
        }
    }

    /// Column holding the user-visible label (title or name).
    pub fn label_column(self) -> &'static str {
        match self {
            Self::Task => "title",
            Self::Category => "name",
        }
    }

    /// Column referencing the owning category, when the kind has one.
    pub fn scope_column(self) -> Option<&'static str> {
        match self {
            Self::Task => Some("category_uuid"),
            Self::Category => None,
        }
    }

    /// Stable lowercase name used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Category => "category",
        }
    }
}
