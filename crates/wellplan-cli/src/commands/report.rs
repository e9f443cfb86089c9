use chrono::{Duration, NaiveDate};
use clap::Args;
use wellplan_core::{week_start, Config, Database, ProgressReport};

use super::date_or_today;

#[derive(Args)]
pub struct ReportArgs {
    /// Report as of this date (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Days of history to load (default: config report.lookback_days)
    #[arg(long)]
    days: Option<u32>,
}

pub fn run(args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;

    let today = date_or_today(args.date);
    let lookback = args.days.unwrap_or(config.report.lookback_days);
    let monday = week_start(today);
    // the weekly scorecard needs the whole week, including days still ahead
    let from = (today - Duration::days(i64::from(lookback))).min(monday);
    let to = monday + Duration::days(6);

    let tasks: Vec<_> = db
        .tasks_between(from, to)?
        .into_iter()
        .map(|stored| stored.task)
        .collect();
    let report = ProgressReport::compute(&tasks, today);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
