//! Domain DTOs for the todo API.
//!
//! # Design
//! Field names match the wire format (`completed_flg`, `delete_flg`, `sort`).
//! The types are defined independently from the mock-server crate;
//! integration tests catch schema drift between the two.

use serde::{Deserialize, Serialize};

/// A todo item as stored by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub content: String,
    pub completed_flg: bool,
    pub delete_flg: bool,
    pub sort: i64,
}

impl Todo {
    /// Apply every field present in `patch`.
    pub fn apply(&mut self, patch: &TodoPatch) {
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(completed) = patch.completed_flg {
            self.completed_flg = completed;
        }
        if let Some(deleted) = patch.delete_flg {
            self.delete_flg = deleted;
        }
        if let Some(sort) = patch.sort {
            self.sort = sort;
        }
    }
}

/// A todo that has not been assigned an id yet; the create payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub content: String,
    #[serde(default)]
    pub completed_flg: bool,
    #[serde(default)]
    pub delete_flg: bool,
    #[serde(default)]
    pub sort: i64,
}

impl NewTodo {
    /// An open, visible item placed ahead of everything else.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            completed_flg: false,
            delete_flg: false,
            sort: 0,
        }
    }
}

/// Partial update payload. Only the fields present in the JSON are applied;
/// omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_flg: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_flg: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<i64>,
}

impl TodoPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            completed_flg: Some(completed),
            ..Self::default()
        }
    }

    pub fn deleted(deleted: bool) -> Self {
        Self {
            delete_flg: Some(deleted),
            ..Self::default()
        }
    }

    pub fn sort(sort: i64) -> Self {
        Self {
            sort: Some(sort),
            ..Self::default()
        }
    }
}
