//! The todo resource served by the remote endpoint.

use serde::{Deserialize, Serialize};

/// A single todo item as returned by `GET <base>/<id>`.
///
/// The wire format uses camelCase (`userId`); the remaining keys already
/// match the field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Owner of the todo.
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(user_id: i64, id: i64, title: impl Into<String>, completed: bool) -> Self {
        Self {
            user_id,
            id,
            title: title.into(),
            completed,
        }
    }
}
