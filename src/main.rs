//! kanban CLI - project and task board with Markdown export

use anyhow::{Result, bail};
use chrono::Utc;
use clap::Parser;
use kanban_todo::cli::display::{display_board, display_overview, display_projects, error, success};
use kanban_todo::cli::{Cli, Commands};
use kanban_todo::format::{ExportScope, export_filename, render, write_export};
use kanban_todo::models::{ColumnKey, DEFAULT_PROJECT_ID};
use kanban_todo::storage::{DataLocation, FileKeyValueStore, Persistence, Session};
use std::io::{self, Write};

type FileSession = Session<FileKeyValueStore>;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let cli = Cli::parse();

    let result = run(cli);

    if let Err(e) = &result {
        error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let location = DataLocation::resolve(cli.data_dir.as_deref())?;
    location.ensure_exists()?;

    let store = FileKeyValueStore::new(location.data_dir.clone());
    let mut session = Session::open(Persistence::new(store));

    if !session.set_active_project(&cli.project) {
        bail!("Project not found: {}", cli.project);
    }
    let project = cli.project;

    match cli.command {
        Commands::Projects => {
            display_projects(session.board());
        }

        Commands::AddProject { name } => match session.add_project(&name) {
            Some(id) => success(&format!("Created project {}: {}", id, name.trim())),
            None => log::info!("Project name is empty; nothing added."),
        },

        Commands::DeleteProject { id, force } => {
            if id == DEFAULT_PROJECT_ID {
                log::info!("The default project cannot be deleted.");
                return Ok(());
            }

            let Some(target) = session.board().project(&id) else {
                bail!("Project not found: {}", id);
            };

            if !force && !confirm(&format!("Delete project '{}' and all its tasks?", target.name))? {
                log::info!("Cancelled.");
                return Ok(());
            }

            session.delete_project(&id);
            success(&format!("Deleted project {}", id));
        }

        Commands::Show => {
            let board = session.board();
            let name = board
                .project(&project)
                .map(|p| p.name.as_str())
                .unwrap_or(project.as_str());
            display_board(name, &board.active_columns(&project), Utc::now());
        }

        Commands::Overview => {
            display_overview(session.board(), Utc::now());
        }

        Commands::Add { text, column } => match session.add_task(&project, column, &text) {
            Some(id) => success(&format!("Added #{} to {}: {}", id, column.title(), text)),
            None => log::info!("Task text is empty or no id is free; nothing added."),
        },

        Commands::Move { id, to, from } => {
            let from = locate(&session, &project, id, from)?;
            session.move_task(&project, id, from, to);
            success(&format!("Moved #{} from {} to {}", id, from.title(), to.title()));
        }

        Commands::Delete { id, column, force } => {
            let column = locate(&session, &project, id, column)?;

            if !force {
                let text = session
                    .board()
                    .find_task(&project, id)
                    .map(|(_, task)| task.text.clone())
                    .unwrap_or_default();
                if !confirm(&format!("Delete #{} '{}'?", id, text))? {
                    log::info!("Cancelled.");
                    return Ok(());
                }
            }

            session.delete_task(&project, column, id);
            success(&format!("Deleted #{}", id));
        }

        Commands::Export {
            all,
            output,
            stdout,
        } => {
            let board = session.board();
            let scope = if all {
                ExportScope::AllProjects
            } else {
                ExportScope::Project(project.clone())
            };

            if stdout {
                print!("{}", render(board, &scope));
                return Ok(());
            }

            let dir = match output {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            log::debug!("Exporting {} into {:?}", export_filename(board, &scope), dir);
            let path = write_export(&dir, board, &scope)?;
            success(&format!("Exported to {}", path.display()));
        }
    }

    Ok(())
}

/// Resolve the column holding a task, checking an explicit column if one was given
fn locate(session: &FileSession, project: &str, id: u64, column: Option<ColumnKey>) -> Result<ColumnKey> {
    match (session.board().find_task(project, id), column) {
        (Some((found, _)), None) => Ok(found),
        (Some((found, _)), Some(given)) if found == given => Ok(given),
        (Some((found, _)), Some(given)) => bail!(
            "Task #{} is in {}, not {}",
            id,
            found.title(),
            given.title()
        ),
        (None, _) => bail!("Task not found: #{}", id),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}
