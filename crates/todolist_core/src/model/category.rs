//! Category domain model.

use super::EntityId;
use serde::{Deserialize, Serialize};

pub type CategoryId = EntityId;

/// A named bucket tasks can be filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: Option<String>,
}

impl Category {
    pub fn new(id: CategoryId, name: Option<String>) -> Self {
        Self { id, name }
    }
}
