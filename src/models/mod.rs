//! Data models for the kanban board

pub mod column;
pub mod project;
pub mod task;

pub use column::{Column, ColumnKey, Columns};
pub use project::{DEFAULT_PROJECT_ID, DEFAULT_PROJECT_NAME, Project, ProjectId};
pub use task::Task;
