//! Store handle: one SQLite connection plus its staged change set.
//!
//! # Responsibility
//! - Open the durable store (file or in-memory).
//! - Translate fetch requests into SQL.
//! - Hold pending creates/updates/deletes and flush them in one transaction.
//!
//! # Invariants
//! - Staged changes are applied in the order they were staged.
//! - Updates write only the columns the caller changed.
//! - A failed save leaves the durable store untouched and discards the
//!   batch; nothing is replayed by a later save.

use super::record::select_sql;
use super::request::{FetchRequest, SortOrder};
use super::{Record, StoreError, StoreResult};
use crate::db::{open_db, open_db_in_memory};
use crate::model::category::CategoryId;
use crate::model::{EntityId, EntityKind};
use log::{debug, error};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Transaction};
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone)]
enum PendingChange {
    Insert {
        kind: EntityKind,
        columns: &'static [&'static str],
        id: EntityId,
        values: Vec<Value>,
    },
    Update {
        kind: EntityKind,
        columns: Vec<&'static str>,
        id: EntityId,
        values: Vec<Value>,
    },
    Delete {
        kind: EntityKind,
        id: EntityId,
    },
}

/// Handle to the persistent context.
///
/// Injected into each list controller; several handles may point at the same
/// database file.
pub struct StoreHandle {
    conn: Connection,
    pending: Vec<PendingChange>,
}

impl StoreHandle {
    /// Opens (and bootstraps if needed) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already bootstrapped connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            pending: Vec::new(),
        }
    }

    /// Raw connection, for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns whether any change is staged but not yet saved.
    pub fn has_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Runs `request` against committed rows of `E`.
    pub fn fetch<E: Record>(&self, request: &FetchRequest) -> StoreResult<Vec<E>> {
        let kind = E::KIND;
        let label = kind.label_column();
        let mut sql = format!("{} WHERE 1 = 1", select_sql::<E>());
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(category) = request.category {
            let column = kind.scope_column().ok_or_else(|| {
                StoreError::InvalidRequest(format!(
                    "{} rows cannot be scoped to a category",
                    kind.as_str()
                ))
            })?;
            sql.push_str(&format!(" AND {column} = ?"));
            bind_values.push(Value::Text(category.to_string()));
        }

        if let Some(needle) = request.label_contains.as_deref() {
            sql.push_str(&format!(" AND instr(fold_text({label}), fold_text(?)) > 0"));
            bind_values.push(Value::Text(needle.to_string()));
        }

        match request.sort {
            None => sql.push_str(" ORDER BY rowid ASC"),
            Some(SortOrder::LabelAscending) => {
                sql.push_str(&format!(" ORDER BY COALESCE({label}, '') ASC, rowid ASC"));
            }
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut entities = Vec::new();

        while let Some(row) = rows.next()? {
            entities.push(E::from_row(row)?);
        }

        debug!(
            "event=store_fetch module=store status=ok kind={} filtered={} rows={}",
            kind.as_str(),
            request.label_contains.is_some(),
            entities.len()
        );
        Ok(entities)
    }

    /// Creates a new entity with a fresh id and stages its insert.
    pub fn create<E: Record>(&mut self, label: Option<String>, scope: Option<CategoryId>) -> E {
        let mut entity = E::create(Uuid::new_v4(), label);
        entity.set_scope(scope);
        self.pending.push(PendingChange::Insert {
            kind: E::KIND,
            columns: E::COLUMNS,
            id: entity.id(),
            values: entity.values(),
        });
        entity
    }

    /// Stages the current values of the `changed` columns on `entity`.
    ///
    /// Columns not listed keep whatever the store holds, so a stale copy
    /// cannot overwrite them.
    pub fn update<E: Record>(&mut self, entity: &E, changed: &[&str]) {
        let (columns, values): (Vec<_>, Vec<_>) = E::COLUMNS
            .iter()
            .copied()
            .zip(entity.values())
            .filter(|(column, _)| changed.contains(column))
            .unzip();
        if columns.is_empty() {
            return;
        }
        self.pending.push(PendingChange::Update {
            kind: E::KIND,
            columns,
            id: entity.id(),
            values,
        });
    }

    /// Stages removal of `entity`.
    pub fn delete<E: Record>(&mut self, entity: &E) {
        self.pending.push(PendingChange::Delete {
            kind: E::KIND,
            id: entity.id(),
        });
    }

    /// Flushes every staged change in one transaction.
    ///
    /// Returns the number of changes written. The staged batch is cleared
    /// either way; on error none of it reached the store.
    pub fn save(&mut self) -> StoreResult<usize> {
        if self.pending.is_empty() {
            return Ok(0);
        }

        let batch = std::mem::take(&mut self.pending);
        match flush(&mut self.conn, &batch) {
            Ok(()) => {
                debug!(
                    "event=store_save module=store status=ok written={}",
                    batch.len()
                );
                Ok(batch.len())
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error discarded={} error={}",
                    batch.len(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn flush(conn: &mut Connection, batch: &[PendingChange]) -> StoreResult<()> {
    let tx = conn.transaction()?;
    for change in batch {
        apply_change(&tx, change)?;
    }
    tx.commit()?;
    Ok(())
}

fn apply_change(tx: &Transaction<'_>, change: &PendingChange) -> StoreResult<()> {
    match change {
        PendingChange::Insert {
            kind,
            columns,
            id,
            values,
        } => {
            let placeholders = (0..=columns.len())
                .map(|_| "?")
                .collect::<Vec<_>>()
                .join(", ");
            let sql = format!(
                "INSERT INTO {} (uuid, {}) VALUES ({placeholders});",
                kind.table(),
                columns.join(", ")
            );
            tx.execute(&sql, params_from_iter(with_id(*id, values)))?;
        }
        PendingChange::Update {
            kind,
            columns,
            id,
            values,
        } => {
            let assignments = columns
                .iter()
                .map(|column| format!("{column} = ?"))
                .collect::<Vec<_>>()
                .join(", ");
            let sql = format!("UPDATE {} SET {assignments} WHERE uuid = ?;", kind.table());
            let mut bind_values = values.clone();
            bind_values.push(Value::Text(id.to_string()));
            let changed = tx.execute(&sql, params_from_iter(bind_values))?;
            if changed == 0 {
                return Err(StoreError::NotFound {
                    kind: *kind,
                    id: *id,
                });
            }
        }
        PendingChange::Delete { kind, id } => {
            // Deleting an already-missing row is a no-op.
            tx.execute(
                &format!("DELETE FROM {} WHERE uuid = ?1;", kind.table()),
                [id.to_string()],
            )?;
        }
    }
    Ok(())
}

fn with_id(id: EntityId, values: &[Value]) -> Vec<Value> {
    let mut bind_values = Vec::with_capacity(values.len() + 1);
    bind_values.push(Value::Text(id.to_string()));
    bind_values.extend_from_slice(values);
    bind_values
}
