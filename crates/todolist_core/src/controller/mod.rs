//! List controllers: the presentation-facing half of the core.
//!
//! # Responsibility
//! - Keep one in-memory list per screen in sync with the store.
//! - Expose row, swipe-action and prompt contracts to the UI layer.
//! - Handle search bar submit/clear events.
//!
//! # Invariants
//! - One generic controller serves every entity kind; task-only operations
//!   live in a `ListController<Task, _>` impl block.
//! - Controllers receive their store handle at construction.

mod list;
mod search;
mod view;

pub use list::{ListConfig, ListController, ListError, ListResult};
pub use view::{
    Accessory, ListView, Presentable, RowContent, RowTint, SwipeAction, TextPrompt,
};

use crate::model::category::Category;
use crate::model::task::Task;

/// Controller for the task screen.
pub type TaskList<V> = ListController<Task, V>;
/// Controller for the category screen.
pub type CategoryList<V> = ListController<Category, V>;
