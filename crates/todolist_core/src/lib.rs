//! Core logic for the todolist app: task and category lists over a local store.
//! This crate is the single source of truth for list and persistence behavior.

pub mod controller;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod store;

pub use controller::{
    Accessory, CategoryList, ListConfig, ListController, ListError, ListResult, ListView,
    Presentable, RowContent, RowTint, SwipeAction, TaskList, TextPrompt,
};
pub use gateway::{CommitReport, PersistenceError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, CategoryId};
pub use model::task::{Task, TaskId};
pub use model::{EntityId, EntityKind};
pub use store::{FetchRequest, Record, SortOrder, StoreError, StoreHandle, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
