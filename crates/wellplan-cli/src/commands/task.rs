//! Task status and slot commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use wellplan_core::{Database, Slot, TaskStatus};

use super::date_or_today;

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks for a day
    List {
        /// Date to list (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Set a task's status
    Status {
        /// Task ID
        id: String,
        /// New status: planned, done or skipped
        status: TaskStatus,
    },
    /// Shortcut for `status <id> done`
    Done {
        /// Task ID
        id: String,
    },
    /// Move a task to another slot of its day
    Move {
        /// Task ID
        id: String,
        /// Target slot: morning, afternoon or evening
        slot: Slot,
    },
    /// Show a task's status history
    History {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        TaskAction::List { date } => {
            let tasks = db.tasks_for_date(date_or_today(date))?;
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Status { id, status } => {
            let task = db.update_task_status(&id, status)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Done { id } => {
            let task = db.update_task_status(&id, TaskStatus::Done)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Move { id, slot } => {
            let task = db.move_task(&id, slot)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::History { id } => {
            let events = db.task_events(&id)?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
    }
    Ok(())
}
