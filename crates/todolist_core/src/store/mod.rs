//! Object store over SQLite: the persistent context list controllers talk to.
//!
//! # Responsibility
//! - Open a handle to the durable store (the store accessor).
//! - Run fetch requests with optional label filter, category scope and sort.
//! - Stage creates, updates and deletes until the next commit.
//!
//! # Invariants
//! - Fetches only see committed rows; staged changes become visible after
//!   a successful commit.
//! - A commit applies every staged change or none of them.

use crate::db::DbError;
use crate::model::{EntityId, EntityKind};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod handle;
mod record;
mod request;

pub use handle::StoreHandle;
pub use record::Record;
pub use request::{FetchRequest, SortOrder};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure for fetches and commits.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// A staged update targets a row that no longer exists.
    NotFound { kind: EntityKind, id: EntityId },
    /// A persisted row could not be decoded.
    InvalidData(String),
    /// The request uses a filter the entity kind does not support.
    InvalidRequest(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{} not found: {id}", kind.as_str()),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::InvalidRequest(message) => write!(f, "invalid fetch request: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) | Self::InvalidRequest(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
