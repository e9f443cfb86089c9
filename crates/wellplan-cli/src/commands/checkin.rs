use chrono::NaiveDate;
use clap::Args;
use wellplan_core::{workflow, CheckIn, Config, Database};

use super::date_or_today;

#[derive(Args)]
pub struct CheckinArgs {
    /// Hours slept last night (3-12)
    #[arg(long)]
    sleep: f64,
    /// Wake time as HH:MM
    #[arg(long)]
    wake: String,
    /// Self-reported energy (1-5)
    #[arg(long)]
    energy: u8,
    /// Mood (1-5)
    #[arg(long, default_value = "3")]
    mood: u8,
    /// Free-form notes
    #[arg(long)]
    notes: Option<String>,
    /// Date to check in for (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,
}

pub fn run(args: CheckinArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let date = date_or_today(args.date);

    let checkin = CheckIn {
        sleep_hours: args.sleep,
        wake_time: args.wake,
        energy: args.energy,
        mood: args.mood,
    };
    let tasks = workflow::submit_checkin(
        &db,
        &checkin,
        args.notes.as_deref(),
        date,
        &config.profile,
        &config.estimator(),
    )?;

    let window = db.energy_window(date)?;
    let out = serde_json::json!({
        "date": date,
        "energy": window,
        "tasks": tasks,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
