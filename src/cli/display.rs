//! Display formatting for CLI output

use crate::format::{days_since_from, format_display_date, truncate_text};
use crate::models::{ColumnKey, Columns, Project};
use crate::storage::Board;
use chrono::{DateTime, Utc};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns as TableColumns},
};

/// Tasks shown per column on an overview card
const CARD_PREVIEW_TASKS: usize = 3;

/// Characters of task text shown on an overview card
const CARD_TEXT_WIDTH: usize = 30;

/// Project row for table display
#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Project")]
    name: String,
    #[tabled(rename = "To Do")]
    todo: String,
    #[tabled(rename = "In Progress")]
    in_progress: String,
    #[tabled(rename = "Done")]
    done: String,
    #[tabled(rename = "Total")]
    total: String,
}

impl ProjectRow {
    fn new(id: &str, project: &Project, active: bool) -> Self {
        let count = |key: ColumnKey| project.columns.get(key).tasks.len().to_string();
        ProjectRow {
            id: if active { format!("* {}", id) } else { id.to_string() },
            name: project.name.clone(),
            todo: count(ColumnKey::Todo),
            in_progress: count(ColumnKey::InProgress),
            done: count(ColumnKey::Done),
            total: project.task_count().to_string(),
        }
    }
}

/// Display all projects, marking the active one
pub fn display_projects(board: &Board) {
    let rows: Vec<ProjectRow> = board
        .projects()
        .map(|(id, project)| ProjectRow::new(id, project, id == board.active_project_id()))
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(TableColumns::new(2..=5)).with(Alignment::right()))
        .to_string();

    println!("{}", table);
}

/// Task row for table display
#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Column")]
    column: String,
    #[tabled(rename = "Task")]
    text: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Age")]
    age: String,
}

/// Display the columns of one project as a task table
pub fn display_board(name: &str, columns: &Columns, now: DateTime<Utc>) {
    println!("{}", name);

    let rows: Vec<TaskRow> = columns
        .iter()
        .flat_map(|(_, column)| {
            column.tasks.iter().map(move |task| TaskRow {
                id: task.id.to_string(),
                column: column.title.clone(),
                text: format!("{} {}", task.checkbox(), task.text),
                created: format_display_date(task.created_at),
                age: days_since_from(task.created_at, now),
            })
        })
        .collect();

    if rows.is_empty() {
        log::info!("No tasks yet.");
        return;
    }

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(TableColumns::single(0)).with(Alignment::right()))
        .to_string();

    println!("{}", table);
}

/// Card row for the overview
#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "Column")]
    column: String,
    #[tabled(rename = "Tasks")]
    tasks: String,
}

/// Preview lines for a column: the first few tasks, then "+N more"
pub fn card_preview(project: &Project, key: ColumnKey, now: DateTime<Utc>) -> Vec<String> {
    let tasks = &project.columns.get(key).tasks;
    let mut lines: Vec<String> = tasks
        .iter()
        .take(CARD_PREVIEW_TASKS)
        .map(|task| {
            format!(
                "{} ({})",
                truncate_text(&task.text, CARD_TEXT_WIDTH),
                days_since_from(task.created_at, now)
            )
        })
        .collect();

    if tasks.len() > CARD_PREVIEW_TASKS {
        lines.push(format!("+{} more", tasks.len() - CARD_PREVIEW_TASKS));
    }
    lines
}

/// Display one card per project with a short preview of each column
pub fn display_overview(board: &Board, now: DateTime<Utc>) {
    for (id, project) in board.projects() {
        println!("{} [{}] - {} tasks", project.name, id, project.task_count());

        let rows: Vec<CardRow> = project
            .columns
            .iter()
            .map(|(key, column)| CardRow {
                column: format!("{} ({})", column.title, column.tasks.len()),
                tasks: card_preview(project, key, now).join("\n"),
            })
            .collect();

        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{}", table);
        println!();
    }
}

/// Format for success messages
pub fn success(msg: &str) {
    println!("{}", msg);
}

/// Format for error messages
pub fn error(msg: &str) {
    eprintln!("Error: {}", msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_card_preview_short_column() {
        let mut board = Board::new();
        let id = board.add_project_at("Launch", now()).unwrap();
        board.add_task_at(&id, ColumnKey::Todo, "Only one", now());

        let lines = card_preview(board.project(&id).unwrap(), ColumnKey::Todo, now());
        assert_eq!(lines, vec!["Only one (today)"]);
    }

    #[test]
    fn test_card_preview_more_marker() {
        let mut board = Board::new();
        let id = board.add_project_at("Launch", now()).unwrap();
        for text in ["a", "b", "c", "d", "e"] {
            board.add_task_at(&id, ColumnKey::InProgress, text, now());
        }

        let lines = card_preview(board.project(&id).unwrap(), ColumnKey::InProgress, now());
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "+2 more");
    }

    #[test]
    fn test_card_preview_truncates() {
        let mut board = Board::new();
        let id = board.add_project_at("Launch", now()).unwrap();
        let long = "x".repeat(45);
        board.add_task_at(&id, ColumnKey::Done, &long, now());

        let lines = card_preview(board.project(&id).unwrap(), ColumnKey::Done, now());
        assert_eq!(lines[0], format!("{}... (today)", "x".repeat(30)));
    }

    #[test]
    fn test_project_row_marks_active() {
        let board = Board::new();
        let (id, project) = board.projects().next().unwrap();
        let row = ProjectRow::new(id, project, true);
        assert_eq!(row.id, "* default");
        assert_eq!(row.total, "0");
    }
}
