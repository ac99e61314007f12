//! # tick
//!
//! Local to-do list CLI — the thin presentation shell over
//! [`TaskService`]. Wires settings → pool → migrations → service, then
//! maps each subcommand onto one service operation.

mod render;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tick_core::query::{self, TaskQuery};
use tick_core::task::{SortKey, StatusFilter, Task};
use tick_core::{logging, settings};
use tick_service::TaskService;
use tick_store::connection::{self, ConnectionConfig};
use tick_store::migrations;

/// Local to-do list.
#[derive(Parser, Debug)]
#[command(name = "tick", about = "Local to-do list", version)]
struct Cli {
    /// Path to the SQLite database (defaults to ~/.tick/tasks.db or $TICK_DB).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level filter (RUST_LOG takes precedence).
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new task.
    Add {
        /// Task description; must not be blank.
        description: String,
    },
    /// List tasks, optionally searched, filtered, and sorted.
    List {
        /// Case-insensitive substring to search descriptions for.
        #[arg(long, default_value = "")]
        search: String,
        /// Completion filter: all, completed, or pending.
        #[arg(long, default_value = "all")]
        filter: StatusFilter,
        /// Sort key: name, date, or status.
        #[arg(long, default_value = "name")]
        sort: SortKey,
        /// Emit the derived list as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Toggle a task's completion state.
    Toggle {
        /// Id of the task to toggle.
        id: i64,
    },
    /// Replace a task's description.
    Edit {
        /// Id of the task to edit.
        id: i64,
        /// New description; must not be blank.
        description: String,
    },
    /// Delete a task.
    Rm {
        /// Id of the task to delete.
        id: i64,
    },
    /// Delete every task.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_subscriber(&cli.log_level);

    let db_path = settings::resolve_db_path(cli.db.clone());
    settings::ensure_parent_dir(&db_path)
        .with_context(|| format!("failed to create {}", db_path.display()))?;
    let pool = connection::new_file(
        db_path.to_str().context("database path is not valid UTF-8")?,
        &ConnectionConfig::default(),
    )?;
    {
        let conn = pool.get()?;
        let _ = migrations::run_migrations(&conn)?;
    }
    tracing::debug!(db = %db_path.display(), "database ready");
    let service = TaskService::open(pool).await?;

    match cli.command {
        Command::Add { description } => {
            let created = service.add_task(&description).await?;
            println!("added {}  {}", created.id, created.description);
        }
        Command::List {
            search,
            filter,
            sort,
            json,
        } => {
            let visible = query::apply(&service.tasks(), &TaskQuery { search, filter, sort });
            if json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else {
                print!("{}", render::render_table(&visible));
            }
        }
        Command::Toggle { id } => {
            let task = find_task(&service, id)?;
            let updated = service.toggle_completion(&task).await?;
            let state = if updated.is_completed {
                "completed"
            } else {
                "pending"
            };
            println!("marked {} {state}", updated.id);
        }
        Command::Edit { id, description } => {
            let task = find_task(&service, id)?;
            let updated = service.update_description(&task, &description).await?;
            println!("updated {}  {}", updated.id, updated.description);
        }
        Command::Rm { id } => {
            let task = find_task(&service, id)?;
            service.delete_task(&task).await?;
            println!("deleted {id}");
        }
        Command::Clear { yes } => {
            let count = service.tasks().len();
            if count == 0 {
                println!("nothing to delete");
                return Ok(());
            }
            if !yes && !confirm(&format!("delete all {count} tasks? [y/N] "))? {
                println!("aborted");
                return Ok(());
            }
            service.delete_all().await?;
            println!("deleted {count} tasks");
        }
    }

    Ok(())
}

/// Resolve an id against the current snapshot.
fn find_task(service: &TaskService, id: i64) -> Result<Task> {
    service
        .tasks()
        .into_iter()
        .find(|task| task.id == id)
        .with_context(|| format!("no task with id {id}"))
}

/// Ask a yes/no question on stdin; only `y`/`yes` confirm.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    let _ = io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
