//! Role entity.

use crate::RoleId;
use serde::{Deserialize, Serialize};

/// A named role that users can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Store-assigned identifier.
    pub id: RoleId,
    /// Role name.
    pub name: String,
}

impl Role {
    /// Creates a role that has not been persisted yet.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RoleId(0),
            name: name.into(),
        }
    }

    /// Returns a copy of this role with the given id.
    #[must_use]
    pub fn with_id(mut self, id: RoleId) -> Self {
        self.id = id;
        self
    }
}
