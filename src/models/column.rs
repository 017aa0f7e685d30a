//! Board columns and their fixed key set

use crate::models::task::Task;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of one of the three fixed board columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKey {
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "inProgress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
}

impl ColumnKey {
    /// All column keys in board order
    pub const ALL: [ColumnKey; 3] = [ColumnKey::Todo, ColumnKey::InProgress, ColumnKey::Done];

    /// Human-readable column title
    pub fn title(self) -> &'static str {
        match self {
            ColumnKey::Todo => "To Do",
            ColumnKey::InProgress => "In Progress",
            ColumnKey::Done => "Done",
        }
    }

    /// Whether tasks in this column count as completed
    pub fn is_done(self) -> bool {
        self == ColumnKey::Done
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKey::Todo => write!(f, "todo"),
            ColumnKey::InProgress => write!(f, "inProgress"),
            ColumnKey::Done => write!(f, "done"),
        }
    }
}

impl std::str::FromStr for ColumnKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" | "to-do" | "to_do" => Ok(ColumnKey::Todo),
            "inprogress" | "in-progress" | "in_progress" | "doing" => Ok(ColumnKey::InProgress),
            "done" => Ok(ColumnKey::Done),
            _ => Err(format!("Unknown column: {}", s)),
        }
    }
}

/// A titled, ordered list of tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Column {
    /// Create an empty column for the given key
    pub fn empty(key: ColumnKey) -> Self {
        Column {
            title: key.title().to_string(),
            tasks: Vec::new(),
        }
    }

    /// Position of the task with the given id, if present
    pub fn position(&self, task_id: u64) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }
}

/// A column as stored; either field may be missing
#[derive(Debug, Default, Deserialize)]
struct StoredColumn {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    tasks: Vec<Task>,
}

impl StoredColumn {
    fn into_column(self, key: ColumnKey) -> Column {
        Column {
            title: self.title.unwrap_or_else(|| key.title().to_string()),
            tasks: self.tasks,
        }
    }
}

/// The stored column map; missing columns come back empty
#[derive(Debug, Default, Deserialize)]
struct StoredColumns {
    #[serde(default)]
    todo: StoredColumn,
    #[serde(rename = "inProgress", default)]
    in_progress: StoredColumn,
    #[serde(default)]
    done: StoredColumn,
}

/// The three fixed columns of a project.
///
/// Each key is a struct field, so a project can never gain or lose a column.
/// Columns or titles missing from persisted data are filled in from the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredColumns")]
pub struct Columns {
    pub todo: Column,
    #[serde(rename = "inProgress")]
    pub in_progress: Column,
    pub done: Column,
}

impl From<StoredColumns> for Columns {
    fn from(stored: StoredColumns) -> Self {
        Columns {
            todo: stored.todo.into_column(ColumnKey::Todo),
            in_progress: stored.in_progress.into_column(ColumnKey::InProgress),
            done: stored.done.into_column(ColumnKey::Done),
        }
    }
}

impl Default for Columns {
    fn default() -> Self {
        Columns {
            todo: Column::empty(ColumnKey::Todo),
            in_progress: Column::empty(ColumnKey::InProgress),
            done: Column::empty(ColumnKey::Done),
        }
    }
}

impl Columns {
    /// Borrow a column by key
    pub fn get(&self, key: ColumnKey) -> &Column {
        match key {
            ColumnKey::Todo => &self.todo,
            ColumnKey::InProgress => &self.in_progress,
            ColumnKey::Done => &self.done,
        }
    }

    /// Mutably borrow a column by key
    pub fn get_mut(&mut self, key: ColumnKey) -> &mut Column {
        match key {
            ColumnKey::Todo => &mut self.todo,
            ColumnKey::InProgress => &mut self.in_progress,
            ColumnKey::Done => &mut self.done,
        }
    }

    /// Iterate columns in board order (todo, inProgress, done)
    pub fn iter(&self) -> impl Iterator<Item = (ColumnKey, &Column)> {
        ColumnKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// Total number of tasks across all columns
    pub fn task_count(&self) -> usize {
        self.iter().map(|(_, c)| c.tasks.len()).sum()
    }
}
