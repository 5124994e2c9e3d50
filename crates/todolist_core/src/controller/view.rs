//! Presentation contract between list controllers and the UI layer.
//!
//! Row content is always derived from entity data; the UI never feeds
//! presentation state back into the model.

use crate::model::category::Category;
use crate::model::task::Task;
use serde::Serialize;

/// Trailing marker shown on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessory {
    None,
    Checkmark,
}

/// Text color hint for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowTint {
    Default,
    /// Highlighted color used for open tasks.
    Accent,
}

/// Everything a UI needs to draw one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowContent {
    pub text: Option<String>,
    pub detail: Option<String>,
    pub accessory: Accessory,
    pub tint: RowTint,
}

/// Per-row trailing swipe action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeAction {
    Delete,
}

impl SwipeAction {
    pub fn title(self) -> &'static str {
        match self {
            Self::Delete => "Delete",
        }
    }

    pub fn is_destructive(self) -> bool {
        matches!(self, Self::Delete)
    }
}

/// Single-line text prompt shown before creating an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextPrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub placeholder: &'static str,
    pub confirm_label: &'static str,
}

/// Entity that can be shown as a list row.
pub trait Presentable {
    fn row_content(&self) -> RowContent;
    fn prompt() -> TextPrompt;
}

/// Rendering surface driven by a list controller.
pub trait ListView {
    /// Discards every visible row and redraws from `rows`.
    fn reload_data(&mut self, rows: &[RowContent]);

    /// Releases keyboard focus from the search input.
    fn resign_search_focus(&mut self) {}
}

impl Presentable for Task {
    fn row_content(&self) -> RowContent {
        RowContent {
            text: self.title.clone(),
            detail: Some(if self.done { "Completed" } else { "Not completed" }.to_string()),
            accessory: if self.done {
                Accessory::Checkmark
            } else {
                Accessory::None
            },
            tint: if self.done {
                RowTint::Default
            } else {
                RowTint::Accent
            },
        }
    }

    fn prompt() -> TextPrompt {
        TextPrompt {
            title: "New task",
            message: "Task",
            placeholder: "Enter the task name",
            confirm_label: "Add",
        }
    }
}

impl Presentable for Category {
    fn row_content(&self) -> RowContent {
        RowContent {
            text: self.name.clone(),
            detail: None,
            accessory: Accessory::None,
            tint: RowTint::Default,
        }
    }

    fn prompt() -> TextPrompt {
        TextPrompt {
            title: "New category",
            message: "Category",
            placeholder: "Enter the category name",
            confirm_label: "Add",
        }
    }
}
