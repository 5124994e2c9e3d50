//! Persistence gateway between list controllers and the store.
//!
//! # Responsibility
//! - Flush staged mutations to durable storage.
//! - Classify failures as query or commit errors.
//! - Apply the best-effort policy: log, never retry, never roll back caller state.

use crate::model::EntityKind;
use crate::store::{StoreError, StoreHandle};
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Outcome of a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitReport {
    /// Number of staged changes written.
    pub written: usize,
}

/// The two store failure classes seen by list controllers.
#[derive(Debug)]
pub enum PersistenceError {
    /// Store read failed.
    Query {
        kind: EntityKind,
        source: StoreError,
    },
    /// Store write failed; the `pending` changes were discarded unwritten.
    Commit {
        kind: EntityKind,
        pending: usize,
        source: StoreError,
    },
}

impl PersistenceError {
    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Query { .. } => "query_failed",
            Self::Commit { .. } => "commit_failed",
        }
    }
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query { kind, source } => {
                write!(f, "failed to fetch {} rows: {source}", kind.as_str())
            }
            Self::Commit {
                kind,
                pending,
                source,
            } => write!(
                f,
                "failed to save {pending} pending {} change(s): {source}",
                kind.as_str()
            ),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Query { source, .. } | Self::Commit { source, .. } => Some(source),
        }
    }
}

/// Commits every staged change on `store`.
pub fn commit(store: &mut StoreHandle, kind: EntityKind) -> Result<CommitReport, PersistenceError> {
    let pending = store.pending_len();
    store
        .save()
        .map(|written| CommitReport { written })
        .map_err(|source| PersistenceError::Commit {
            kind,
            pending,
            source,
        })
}

/// Commits and logs the outcome; the caller always proceeds.
///
/// Returns `true` when the changes reached durable storage.
pub fn commit_best_effort(store: &mut StoreHandle, kind: EntityKind) -> bool {
    match commit(store, kind) {
        Ok(report) => {
            debug!(
                "event=commit module=gateway status=ok kind={} written={}",
                kind.as_str(),
                report.written
            );
            true
        }
        Err(err) => {
            error!(
                "event=commit module=gateway status=error kind={} error_code={} error={}",
                kind.as_str(),
                err.code(),
                err
            );
            false
        }
    }
}
