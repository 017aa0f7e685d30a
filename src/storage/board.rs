//! In-memory project and task store

use crate::models::{ColumnKey, Columns, DEFAULT_PROJECT_ID, Project, ProjectId, Task};
use crate::storage::id_generator::IdGenerator;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::borrow::Cow;

/// The persisted tree: every project by id, in creation order
pub type Snapshot = IndexMap<ProjectId, Project>;

/// Projects, their columns and tasks, plus the active project selection.
///
/// Every mutation reports whether it changed the snapshot. Invalid input
/// (blank text, unknown ids, deleting the default project) is a no-op.
#[derive(Debug, Clone)]
pub struct Board {
    projects: Snapshot,
    active: ProjectId,
    ids: IdGenerator,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board holding only the default project, which is active
    pub fn new() -> Self {
        let mut projects = Snapshot::new();
        projects.insert(DEFAULT_PROJECT_ID.to_string(), Project::main());
        Board {
            projects,
            active: DEFAULT_PROJECT_ID.to_string(),
            ids: IdGenerator::default(),
        }
    }

    /// Restore a board from a loaded snapshot
    pub fn from_snapshot(mut projects: Snapshot) -> Self {
        if !projects.contains_key(DEFAULT_PROJECT_ID) {
            log::warn!("Saved state has no default project; recreating it");
            projects.shift_insert(0, DEFAULT_PROJECT_ID.to_string(), Project::main());
        }

        let floor = projects
            .iter()
            .flat_map(|(key, project)| {
                let project_id = IdGenerator::parse_project_id(key);
                let task_ids = project
                    .columns
                    .iter()
                    .flat_map(|(_, column)| column.tasks.iter().map(|t| t.id));
                project_id.into_iter().chain(task_ids)
            })
            .max()
            .unwrap_or(0);

        Board {
            projects,
            active: DEFAULT_PROJECT_ID.to_string(),
            ids: IdGenerator::seeded(floor),
        }
    }

    /// The current snapshot
    pub fn snapshot(&self) -> &Snapshot {
        &self.projects
    }

    /// Iterate projects in store order
    pub fn projects(&self) -> impl Iterator<Item = (&ProjectId, &Project)> {
        self.projects.iter()
    }

    /// Look up a project
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.get(id)
    }

    /// Id of the active project
    pub fn active_project_id(&self) -> &str {
        &self.active
    }

    /// Make an existing project active
    pub fn set_active_project(&mut self, id: &str) -> bool {
        if !self.projects.contains_key(id) {
            return false;
        }
        self.active = id.to_string();
        true
    }

    /// Add a project and make it active
    pub fn add_project(&mut self, name: &str) -> Option<ProjectId> {
        self.add_project_at(name, Utc::now())
    }

    /// Add a project created at `now`
    pub fn add_project_at(&mut self, name: &str, now: DateTime<Utc>) -> Option<ProjectId> {
        if name.trim().is_empty() {
            return None;
        }

        let id = self.next_id(now)?.to_string();
        self.projects.insert(id.clone(), Project::new(name));
        self.active = id.clone();
        log::debug!("Added project {} ({})", id, name);
        Some(id)
    }

    /// Delete a project; the default project is never removed
    pub fn delete_project(&mut self, id: &str) -> bool {
        if id == DEFAULT_PROJECT_ID {
            return false;
        }

        if self.projects.shift_remove(id).is_none() {
            return false;
        }

        if self.active == id {
            self.active = DEFAULT_PROJECT_ID.to_string();
        }
        log::debug!("Deleted project {}", id);
        true
    }

    /// Append a task to a column
    pub fn add_task(&mut self, project_id: &str, column: ColumnKey, text: &str) -> Option<u64> {
        self.add_task_at(project_id, column, text, Utc::now())
    }

    /// Append a task created at `now`
    pub fn add_task_at(
        &mut self,
        project_id: &str,
        column: ColumnKey,
        text: &str,
        now: DateTime<Utc>,
    ) -> Option<u64> {
        if text.trim().is_empty() {
            return None;
        }

        if !self.projects.contains_key(project_id) {
            return None;
        }

        let id = self.next_id(now)?;
        let task = Task::new(id, text, now, column.is_done());
        let project = self.projects.get_mut(project_id)?;
        project.columns.get_mut(column).tasks.push(task);
        log::debug!("Added task {} to {}/{}", id, project_id, column);
        Some(id)
    }

    /// Move a task to the end of another (or the same) column
    pub fn move_task(
        &mut self,
        project_id: &str,
        task_id: u64,
        from: ColumnKey,
        to: ColumnKey,
    ) -> bool {
        let Some(project) = self.projects.get_mut(project_id) else {
            return false;
        };

        let source = project.columns.get_mut(from);
        let Some(index) = source.position(task_id) else {
            return false;
        };

        let mut task = source.tasks.remove(index);
        task.completed = to.is_done();
        project.columns.get_mut(to).tasks.push(task);
        log::debug!("Moved task {} from {} to {}", task_id, from, to);
        true
    }

    /// Remove a task from a column
    pub fn delete_task(&mut self, project_id: &str, column: ColumnKey, task_id: u64) -> bool {
        let Some(project) = self.projects.get_mut(project_id) else {
            return false;
        };

        let tasks = &mut project.columns.get_mut(column).tasks;
        let before = tasks.len();
        tasks.retain(|t| t.id != task_id);
        before != tasks.len()
    }

    /// Columns of a project, or empty columns if the project is unknown
    pub fn active_columns(&self, project_id: &str) -> Cow<'_, Columns> {
        match self.projects.get(project_id) {
            Some(project) => Cow::Borrowed(&project.columns),
            None => Cow::Owned(Columns::default()),
        }
    }

    /// Locate a task and the column holding it
    pub fn find_task(&self, project_id: &str, task_id: u64) -> Option<(ColumnKey, &Task)> {
        let project = self.projects.get(project_id)?;
        project.columns.iter().find_map(|(key, column)| {
            column
                .tasks
                .iter()
                .find(|t| t.id == task_id)
                .map(|task| (key, task))
        })
    }

    /// Total tasks in a project (zero if unknown)
    pub fn task_count(&self, project_id: &str) -> usize {
        self.projects
            .get(project_id)
            .map(Project::task_count)
            .unwrap_or(0)
    }

    fn next_id(&mut self, now: DateTime<Utc>) -> Option<u64> {
        let id = self.ids.next_id_at(now);
        if id.is_none() {
            log::warn!("No ids left above {}; nothing added", u64::MAX);
        }
        id
    }
}
