//! Markdown export of one project or the whole board

use crate::format::dates::{days_since_from, format_display_date};
use crate::models::{Project, ProjectId};
use crate::storage::{Board, Snapshot};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Document title heading every export
const DOCUMENT_TITLE: &str = "# Kanban Todo List";

/// Filename prefix for written exports
const FILE_PREFIX: &str = "kanban-todo";

/// Errors that can occur while writing an export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What an export covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportScope {
    /// A single project
    Project(ProjectId),
    /// Every project in store order
    AllProjects,
}

/// Render one project as a Markdown document
pub fn export_project(project: &Project) -> String {
    export_project_at(project, Utc::now())
}

/// Render one project, measuring task age against `now`
pub fn export_project_at(project: &Project, now: DateTime<Utc>) -> String {
    let mut out = document_header();
    push_project(&mut out, project, now);
    out
}

/// Render every project as a Markdown document
pub fn export_all_projects(projects: &Snapshot) -> String {
    export_all_projects_at(projects, Utc::now())
}

/// Render every project, measuring task age against `now`
pub fn export_all_projects_at(projects: &Snapshot, now: DateTime<Utc>) -> String {
    let mut out = document_header();
    for project in projects.values() {
        push_project(&mut out, project, now);
    }
    out
}

/// Render the given scope of the board.
/// An unknown project renders as an empty section named after its id.
pub fn render(board: &Board, scope: &ExportScope) -> String {
    render_at(board, scope, Utc::now())
}

/// Render the given scope, measuring task age against `now`
pub fn render_at(board: &Board, scope: &ExportScope, now: DateTime<Utc>) -> String {
    match scope {
        ExportScope::AllProjects => export_all_projects_at(board.snapshot(), now),
        ExportScope::Project(id) => match board.project(id) {
            Some(project) => export_project_at(project, now),
            None => export_project_at(&Project::new(id.as_str()), now),
        },
    }
}

/// Filename for an export, e.g. "kanban-todo-launch-plan.md"
pub fn export_filename(board: &Board, scope: &ExportScope) -> String {
    let suffix = match scope {
        ExportScope::AllProjects => "all-projects".to_string(),
        ExportScope::Project(id) => {
            let name = board.project(id).map(|p| p.name.as_str()).unwrap_or("");
            let sanitized = slug::slugify(name);
            if sanitized.is_empty() {
                slug::slugify(id)
            } else {
                sanitized
            }
        }
    };
    format!("{}-{}.md", FILE_PREFIX, suffix)
}

/// Write the export into `dir`, returning the file path
pub fn write_export(dir: &Path, board: &Board, scope: &ExportScope) -> Result<PathBuf, ExportError> {
    let path = dir.join(export_filename(board, scope));
    std::fs::write(&path, render(board, scope))?;
    log::debug!("Wrote export to {:?}", path);
    Ok(path)
}

fn document_header() -> String {
    format!("{}\n\n", DOCUMENT_TITLE)
}

fn push_project(out: &mut String, project: &Project, now: DateTime<Utc>) {
    out.push_str(&format!("## {}\n\n", project.name));

    for (_, column) in project.columns.iter() {
        out.push_str(&format!("### {}\n\n", column.title));

        for task in &column.tasks {
            out.push_str(&format!(
                "* {} {} {{{}}} {}\n",
                task.checkbox(),
                task.text,
                format_display_date(task.created_at),
                days_since_from(task.created_at, now)
            ));
        }

        out.push('\n');
    }
}
