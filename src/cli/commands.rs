//! CLI command definitions using clap

use crate::models::{ColumnKey, DEFAULT_PROJECT_ID};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Kanban-style project and task board
#[derive(Parser, Debug)]
#[command(name = "kanban")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the board state (defaults to $KANBAN_TODO_DIR, then the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Project to work on
    #[arg(short, long, global = true, default_value = DEFAULT_PROJECT_ID)]
    pub project: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List projects
    Projects,

    /// Create a project
    AddProject {
        /// Project name
        name: String,
    },

    /// Delete a project and all its tasks
    DeleteProject {
        /// Project ID
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Show the columns of the selected project
    Show,

    /// Show a card for every project
    Overview,

    /// Add a task to the selected project
    Add {
        /// Task text
        text: String,

        /// Column to add to (todo, in-progress, done)
        #[arg(short, long, default_value = "todo", value_parser = parse_column)]
        column: ColumnKey,
    },

    /// Move a task to another column
    Move {
        /// Task ID
        id: u64,

        /// Destination column (todo, in-progress, done)
        #[arg(value_parser = parse_column)]
        to: ColumnKey,

        /// Column the task is in (looked up when omitted)
        #[arg(long, value_parser = parse_column)]
        from: Option<ColumnKey>,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: u64,

        /// Column the task is in (looked up when omitted)
        #[arg(short, long, value_parser = parse_column)]
        column: Option<ColumnKey>,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Export the selected project (or all projects) as Markdown
    Export {
        /// Export every project instead of the selected one
        #[arg(short, long)]
        all: bool,

        /// Directory to write the file into (defaults to the current directory)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the document instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
}

fn parse_column(s: &str) -> Result<ColumnKey, String> {
    s.parse()
}
