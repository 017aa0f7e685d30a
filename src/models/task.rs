//! Task model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Creation time in Unix milliseconds, unique within a board
    pub id: u64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Mirrors membership of the done column
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a new task as it would be placed into a column
    pub fn new(id: u64, text: impl Into<String>, created_at: DateTime<Utc>, completed: bool) -> Self {
        Task {
            id,
            text: text.into(),
            created_at,
            completed,
        }
    }

    /// Checkbox marker used in exports
    pub fn checkbox(&self) -> &'static str {
        if self.completed { "[x]" } else { "[ ]" }
    }
}
