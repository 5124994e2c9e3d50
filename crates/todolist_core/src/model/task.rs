//! Task domain model.
//!
//! # Invariants
//! - `done` starts as `false` for every newly created task.
//! - `category_id` is cleared by the store when the category is deleted.

use super::category::CategoryId;
use super::EntityId;
use serde::{Deserialize, Serialize};

pub type TaskId = EntityId;

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// User-entered title; absent when the prompt was confirmed without text.
    pub title: Option<String>,
    pub done: bool,
    pub category_id: Option<CategoryId>,
}

impl Task {
    /// Creates an open task with the given store-assigned id.
    pub fn new(id: TaskId, title: Option<String>) -> Self {
        Self {
            id,
            title,
            done: false,
            category_id: None,
        }
    }

    /// Flips completion state and returns the new value.
    pub fn toggle_done(&mut self) -> bool {
        self.done = !self.done;
        self.done
    }
}
