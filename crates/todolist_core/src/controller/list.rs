//! Generic list controller shared by the task and category screens.
//!
//! # Responsibility
//! - Own the in-memory collection shown by one list.
//! - Route every mutation through the store and the persistence gateway.
//! - Drive full re-renders of the attached view.
//!
//! # Invariants
//! - After a mutation commits, `items()` matches a fresh fetch of the base
//!   request, unless a search filter is active.
//! - Store failures are logged and never escape a public operation.
//! - Index arguments are validated before any side effect.

use super::view::{ListView, Presentable, RowContent, SwipeAction, TextPrompt};
use crate::gateway::{self, PersistenceError};
use crate::model::category::CategoryId;
use crate::model::task::Task;
use crate::model::EntityId;
use crate::store::{FetchRequest, Record, StoreHandle};
use log::{debug, warn};
use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ListResult<T> = Result<T, ListError>;

/// Caller errors for index-addressed operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for ListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "row index {index} out of range for list of {len}")
            }
        }
    }
}

impl Error for ListError {}

/// Per-list behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListConfig {
    /// Order submitted search results by label instead of insertion order.
    pub sort_search_results: bool,
}

/// Work queued for the main context after the current handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DeferredUi {
    ResignSearchFocus,
}

/// Controller for one list of `E` rendered into `V`.
pub struct ListController<E, V> {
    pub(super) store: StoreHandle,
    pub(super) view: V,
    pub(super) items: Vec<E>,
    pub(super) scope: Option<CategoryId>,
    pub(super) config: ListConfig,
    pub(super) deferred: VecDeque<DeferredUi>,
}

impl<E: Record + Presentable, V: ListView> ListController<E, V> {
    /// Creates an empty controller; call [`Self::reload`] to populate it.
    pub fn new(store: StoreHandle, view: V) -> Self {
        Self::with_config(store, view, ListConfig::default())
    }

    pub fn with_config(store: StoreHandle, view: V, config: ListConfig) -> Self {
        Self {
            store,
            view,
            items: Vec::new(),
            scope: None,
            config,
            deferred: VecDeque::new(),
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn row_count(&self) -> usize {
        self.items.len()
    }

    pub fn row(&self, index: usize) -> Option<RowContent> {
        self.items.get(index).map(Presentable::row_content)
    }

    /// Trailing swipe actions offered for `index`; empty for invalid rows.
    pub fn swipe_actions(&self, index: usize) -> Vec<SwipeAction> {
        if index < self.items.len() {
            vec![SwipeAction::Delete]
        } else {
            Vec::new()
        }
    }

    pub fn perform_swipe_action(&mut self, index: usize, action: SwipeAction) -> ListResult<()> {
        match action {
            SwipeAction::Delete => self.delete(index).map(|_| ()),
        }
    }

    /// Prompt to present before [`Self::create`].
    pub fn prompt(&self) -> TextPrompt {
        E::prompt()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    pub fn config(&self) -> ListConfig {
        self.config
    }

    /// Unfiltered request for this list, honoring the category scope.
    pub fn base_request(&self) -> FetchRequest {
        FetchRequest::all().in_category(self.scope)
    }

    /// Loads the unfiltered list.
    pub fn reload(&mut self) {
        let request = self.base_request();
        self.load(&request);
    }

    /// Replaces the collection with the result of `request` and re-renders.
    ///
    /// On query failure the previous collection is kept.
    pub fn load(&mut self, request: &FetchRequest) {
        self.replace_items(request);
        self.render();
    }

    /// Creates an entity labelled `name`, appends it and commits.
    ///
    /// The row stays in the list even if the commit fails.
    pub fn create(&mut self, name: Option<String>) -> EntityId {
        let entity: E = self.store.create(name, self.scope);
        let id = entity.id();
        self.items.push(entity);
        debug!(
            "event=list_create module=controller status=ok kind={} rows={}",
            E::KIND.as_str(),
            self.items.len()
        );
        self.commit();
        id
    }

    /// Removes the entity at `index` from the store and the list, then commits.
    pub fn delete(&mut self, index: usize) -> ListResult<E> {
        self.check_index(index)?;
        let entity = self.items.remove(index);
        self.store.delete(&entity);
        debug!(
            "event=list_delete module=controller status=ok kind={} rows={}",
            E::KIND.as_str(),
            self.items.len()
        );
        self.commit();
        Ok(entity)
    }

    /// Flushes staged changes and re-renders regardless of the outcome.
    pub fn commit(&mut self) {
        gateway::commit_best_effort(&mut self.store, E::KIND);
        self.render();
    }

    /// Runs UI work deferred by earlier handlers; returns how many ran.
    pub fn run_deferred(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.deferred.pop_front() {
            match task {
                DeferredUi::ResignSearchFocus => self.view.resign_search_focus(),
            }
            ran += 1;
        }
        ran
    }

    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }

    pub(super) fn replace_items(&mut self, request: &FetchRequest) -> bool {
        match self.store.fetch::<E>(request) {
            Ok(items) => {
                self.items = items;
                true
            }
            Err(source) => {
                let err = PersistenceError::Query {
                    kind: E::KIND,
                    source,
                };
                warn!(
                    "event=list_load module=controller status=error kind={} error_code={} error={}",
                    E::KIND.as_str(),
                    err.code(),
                    err
                );
                false
            }
        }
    }

    pub(super) fn render(&mut self) {
        let rows = self
            .items
            .iter()
            .map(Presentable::row_content)
            .collect::<Vec<_>>();
        self.view.reload_data(&rows);
    }

    pub(super) fn check_index(&self, index: usize) -> ListResult<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(ListError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }
}

impl<V: ListView> ListController<Task, V> {
    /// Task list restricted to one category; new tasks join that category.
    pub fn for_category(store: StoreHandle, view: V, category: CategoryId) -> Self {
        let mut controller = Self::new(store, view);
        controller.scope = Some(category);
        controller
    }

    pub fn category(&self) -> Option<CategoryId> {
        self.scope
    }

    /// Flips `done` on the task at `index` and commits.
    ///
    /// Returns the new value.
    pub fn toggle_done(&mut self, index: usize) -> ListResult<bool> {
        self.check_index(index)?;
        let done = self.items[index].toggle_done();
        self.store.update(&self.items[index], &["done"]);
        self.commit();
        Ok(done)
    }

    /// Files the task at `index` under `category` (or none) and commits.
    ///
    /// In a scoped list the task leaves the list when it moves elsewhere.
    pub fn assign_category(&mut self, index: usize, category: Option<CategoryId>) -> ListResult<()> {
        self.check_index(index)?;
        self.items[index].category_id = category;
        self.store.update(&self.items[index], &["category_uuid"]);
        if self.scope.is_some() && self.scope != category {
            self.items.remove(index);
        }
        self.commit();
        Ok(())
    }
}
