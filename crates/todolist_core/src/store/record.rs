//! Row mapping between entities and their SQLite tables.
//!
//! # Invariants
//! - `uuid` is always the first selected column and the primary key.
//! - `values()` returns one value per entry of `COLUMNS`, in order.
//! - Read paths reject invalid persisted state instead of masking it.

use super::{StoreError, StoreResult};
use crate::model::category::{Category, CategoryId};
use crate::model::task::Task;
use crate::model::{EntityId, EntityKind};
use rusqlite::types::Value;
use rusqlite::Row;
use uuid::Uuid;

/// An entity the store knows how to persist.
pub trait Record: Clone {
    const KIND: EntityKind;
    /// Writable columns besides `uuid`.
    const COLUMNS: &'static [&'static str];

    /// Builds a fresh entity around a store-assigned id.
    fn create(id: EntityId, label: Option<String>) -> Self;
    fn id(&self) -> EntityId;
    fn values(&self) -> Vec<Value>;
    fn from_row(row: &Row<'_>) -> StoreResult<Self>;

    /// Files a fresh entity under `category`; no-op for kinds without one.
    fn set_scope(&mut self, _category: Option<CategoryId>) {}
}

impl Record for Task {
    const KIND: EntityKind = EntityKind::Task;
    const COLUMNS: &'static [&'static str] = &["title", "done", "category_uuid"];

    fn create(id: EntityId, label: Option<String>) -> Self {
        Task::new(id, label)
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn values(&self) -> Vec<Value> {
        vec![
            optional_text(self.title.as_deref()),
            Value::Integer(bool_to_int(self.done)),
            optional_text(self.category_id.map(|id| id.to_string()).as_deref()),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        let done = match row.get::<_, i64>("done")? {
            0 => false,
            1 => true,
            other => {
                return Err(StoreError::InvalidData(format!(
                    "invalid done value `{other}` in tasks.done"
                )));
            }
        };
        let category_id = match row.get::<_, Option<String>>("category_uuid")? {
            Some(text) => Some(parse_uuid(&text, "tasks.category_uuid")?),
            None => None,
        };

        Ok(Task {
            id: parse_uuid(&row.get::<_, String>("uuid")?, "tasks.uuid")?,
            title: row.get("title")?,
            done,
            category_id,
        })
    }

    fn set_scope(&mut self, category: Option<CategoryId>) {
        self.category_id = category;
    }
}

impl Record for Category {
    const KIND: EntityKind = EntityKind::Category;
    const COLUMNS: &'static [&'static str] = &["name"];

    fn create(id: EntityId, label: Option<String>) -> Self {
        Category::new(id, label)
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn values(&self) -> Vec<Value> {
        vec![optional_text(self.name.as_deref())]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        Ok(Category {
            id: parse_uuid(&row.get::<_, String>("uuid")?, "categories.uuid")?,
            name: row.get("name")?,
        })
    }
}

pub(super) fn select_sql<E: Record>() -> String {
    format!(
        "SELECT uuid, {} FROM {}",
        E::COLUMNS.join(", "),
        E::KIND.table()
    )
}

fn parse_uuid(text: &str, column: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(text)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid value `{text}` in {column}")))
}

fn optional_text(value: Option<&str>) -> Value {
    match value {
        Some(text) => Value::Text(text.to_string()),
        None => Value::Null,
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
