//! kanban-todo - Kanban-style project and task board
//!
//! This library holds the board state (projects, fixed columns, tasks), its
//! local persistence, date formatting for task cards and Markdown export.
//! Front ends drive it through [`Session`] or [`Board`] directly.

pub mod cli;
pub mod format;
pub mod models;
pub mod storage;

pub use format::{ExportScope, days_since, export_all_projects, export_project, format_display_date};
pub use models::{Column, ColumnKey, Columns, DEFAULT_PROJECT_ID, Project, ProjectId, Task};
pub use storage::{
    Board, DataLocation, FileKeyValueStore, KeyValueStore, Persistence, Session, Snapshot,
};
