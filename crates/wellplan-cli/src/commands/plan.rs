use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;
use wellplan_core::{workflow, Config, Database, StoredTask};

use super::date_or_today;

#[derive(Subcommand)]
pub enum PlanAction {
    /// Show the stored plan for one day
    Show {
        /// Date to show (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show the stored week, or rebuild it with --auto
    Week {
        /// Any date inside the week (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Re-plan all seven days from stored energy windows
        #[arg(long)]
        auto: bool,
    },
}

#[derive(Serialize)]
struct DayView {
    date: NaiveDate,
    tasks: Vec<StoredTask>,
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        PlanAction::Show { date } => {
            let date = date_or_today(date);
            let view = DayView {
                date,
                tasks: db.tasks_for_date(date)?,
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        PlanAction::Week { date, auto } => {
            let anchor = date_or_today(date);
            if auto {
                let config = Config::load()?;
                let profile = config.profile.is_onboarded().then_some(&config.profile);
                workflow::auto_slot(&db, anchor, profile)?;
            }
            let days: Vec<DayView> = workflow::stored_week(&db, anchor)?
                .into_iter()
                .map(|(date, tasks)| DayView { date, tasks })
                .collect();
            println!("{}", serde_json::to_string_pretty(&days)?);
        }
    }
    Ok(())
}
