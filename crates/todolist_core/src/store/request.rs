//! Fetch request: filter predicate plus optional sort directive.

use crate::model::category::CategoryId;

/// Result ordering for a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Label ascending; absent labels sort as empty text.
    LabelAscending,
}

/// Query options for listing one entity kind.
///
/// The default request returns every row in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchRequest {
    /// Case- and diacritic-insensitive substring match on the label.
    pub label_contains: Option<String>,
    /// Restricts the result to one category (tasks only).
    pub category: Option<CategoryId>,
    pub sort: Option<SortOrder>,
}

impl FetchRequest {
    /// Unfiltered request in insertion order.
    pub fn all() -> Self {
        Self::default()
    }

    /// Request matching labels that contain `text`.
    pub fn label_contains(text: impl Into<String>) -> Self {
        Self {
            label_contains: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn in_category(mut self, category: Option<CategoryId>) -> Self {
        self.category = category;
        self
    }

    pub fn sorted(mut self, sort: Option<SortOrder>) -> Self {
        self.sort = sort;
        self
    }
}
