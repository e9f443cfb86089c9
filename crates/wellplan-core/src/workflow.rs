//! Flows that connect the plan engine to the store.
//!
//! Each flow validates its input, runs the pure engine and persists the
//! result. Nothing here decides what a plan looks like.

use chrono::NaiveDate;
use tracing::info;

use crate::energy::{CheckIn, EnergyEstimator};
use crate::error::Result;
use crate::onboarding::OnboardingAnswers;
use crate::plan::{build_week_starting, generate, week_dates, WeekPlan};
use crate::profile::Profile;
use crate::storage::{Database, StoredTask};

/// Record a check-in for `date` and re-plan that day.
///
/// The stored window and task list for `date` are replaced; other dates
/// are untouched. Returns the freshly stored tasks.
///
/// # Errors
/// Returns a validation error before anything is written if the check-in is
/// out of range.
pub fn submit_checkin(
    db: &Database,
    checkin: &CheckIn,
    notes: Option<&str>,
    date: NaiveDate,
    profile: &Profile,
    estimator: &EnergyEstimator,
) -> Result<Vec<StoredTask>> {
    checkin.validate()?;
    db.upsert_checkin(date, checkin, notes)?;

    let window = estimator.estimate(checkin, profile.baseline(), date);
    db.upsert_energy_window(&window)?;

    let tasks = generate(&window, Some(profile));
    let stored = db.replace_day(date, &tasks)?;
    info!(%date, tasks = stored.len(), "check-in recorded");
    Ok(stored)
}

/// Turn onboarding answers into a profile and plan `today` from them.
///
/// The answers double as the first check-in: their energy preferences
/// become the baseline and the reported sleep becomes the day's input.
/// The caller is responsible for saving the returned profile.
pub fn complete_onboarding(
    db: &Database,
    answers: &OnboardingAnswers,
    today: NaiveDate,
    estimator: &EnergyEstimator,
) -> Result<Profile> {
    answers.validate()?;
    let profile = answers.to_profile();
    submit_checkin(
        db,
        &answers.initial_checkin(),
        Some("onboarding"),
        today,
        &profile,
        estimator,
    )?;
    info!(goal = %answers.goal, "onboarding complete");
    Ok(profile)
}

/// Re-plan the whole week containing `anchor` from stored windows.
///
/// Days without a stored window fall back to the default baseline. Every
/// day's tasks are replaced, including any status already recorded.
pub fn auto_slot(db: &Database, anchor: NaiveDate, profile: Option<&Profile>) -> Result<WeekPlan> {
    let dates = week_dates(anchor);
    let (first, last) = (dates[0], dates[6]);
    let windows = db.energy_windows_between(first, last)?;
    let week = build_week_starting(anchor, &windows, profile);

    for day in &week.days {
        db.replace_day(day.date, &day.tasks)?;
    }
    info!(week_start = %week.week_start, windows = windows.len(), "week auto-slotted");
    Ok(week)
}

/// Load the stored tasks of the week containing `anchor`, one entry per day.
pub fn stored_week(db: &Database, anchor: NaiveDate) -> Result<Vec<(NaiveDate, Vec<StoredTask>)>> {
    let dates = week_dates(anchor);
    let stored = db.tasks_between(dates[0], dates[6])?;

    let days = dates
        .into_iter()
        .map(|date| {
            let day = stored
                .iter()
                .filter(|s| s.task.date == date)
                .cloned()
                .collect();
            (date, day)
        })
        .collect();
    Ok(days)
}
