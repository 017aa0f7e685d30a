//! Project model

use crate::models::column::Columns;
use serde::{Deserialize, Serialize};

/// Key of a project within the board
pub type ProjectId = String;

/// Id of the project that always exists and cannot be deleted
pub const DEFAULT_PROJECT_ID: &str = "default";

/// Name given to the seeded default project
pub const DEFAULT_PROJECT_NAME: &str = "Main Project";

/// A named board with the three fixed columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub columns: Columns,
}

impl Project {
    /// Create a project with empty columns
    pub fn new(name: impl Into<String>) -> Self {
        Project {
            name: name.into(),
            columns: Columns::default(),
        }
    }

    /// The seeded default project
    pub fn main() -> Self {
        Project::new(DEFAULT_PROJECT_NAME)
    }

    /// Total number of tasks across all columns
    pub fn task_count(&self) -> usize {
        self.columns.task_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::column::ColumnKey;

    #[test]
    fn test_project_new() {
        let project = Project::new("Launch");
        assert_eq!(project.name, "Launch");
        assert_eq!(project.task_count(), 0);
        for key in ColumnKey::ALL {
            assert!(project.columns.get(key).tasks.is_empty());
        }
    }

    #[test]
    fn test_project_missing_columns() {
        let project: Project = serde_json::from_str(r#"{"name": "Bare"}"#).unwrap();
        assert_eq!(project, Project::new("Bare"));
    }
}
