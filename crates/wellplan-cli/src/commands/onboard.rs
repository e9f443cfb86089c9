use chrono::NaiveDate;
use clap::Args;
use wellplan_core::{workflow, Conditions, Config, Database, Goal, OnboardingAnswers};

use super::date_or_today;

#[derive(Args)]
pub struct OnboardArgs {
    /// Display name
    #[arg(long)]
    name: String,
    /// IANA time zone, e.g. "Europe/Berlin"
    #[arg(long, default_value = "UTC")]
    tz: String,
    /// Goal: fat_loss, recomp or glute
    #[arg(long)]
    goal: Goal,
    /// Comma-separated equipment list
    #[arg(long, value_delimiter = ',')]
    equipment: Vec<String>,
    /// Current cycle phase
    #[arg(long)]
    cycle_phase: Option<String>,
    /// Morning energy preference (1-5)
    #[arg(long, default_value = "3")]
    morning: i32,
    /// Afternoon energy preference (1-5)
    #[arg(long, default_value = "4")]
    afternoon: i32,
    /// Evening energy preference (1-5)
    #[arg(long, default_value = "2")]
    evening: i32,
    /// Typical hours of sleep (4-10)
    #[arg(long, default_value = "7.5")]
    sleep: f64,
    /// Typical wake time as HH:MM
    #[arg(long, default_value = "07:00")]
    wake: String,
    #[arg(long)]
    postpartum: bool,
    #[arg(long)]
    ir: bool,
    #[arg(long)]
    hashimoto: bool,
    #[arg(long)]
    pcos: bool,
    /// Date of the first plan (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,
}

pub fn run(args: OnboardArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    let db = Database::open()?;
    let today = date_or_today(args.date);

    let answers = OnboardingAnswers {
        name: args.name,
        tz: args.tz,
        goal: args.goal,
        equipment: args.equipment,
        cycle_phase: args.cycle_phase,
        conditions: Conditions {
            postpartum: args.postpartum,
            ir: args.ir,
            hashimoto: args.hashimoto,
            pcos: args.pcos,
        },
        morning_energy: args.morning,
        afternoon_energy: args.afternoon,
        evening_energy: args.evening,
        sleep_hours: args.sleep,
        wake_time: args.wake,
    };

    config.profile = workflow::complete_onboarding(&db, &answers, today, &config.estimator())?;
    config.save()?;

    let tasks = db.tasks_for_date(today)?;
    let out = serde_json::json!({
        "profile": config.profile,
        "tasks": tasks,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
