//! Progress reports over stored tasks.
//!
//! Streaks and weekly scorecards are computed from task status only; a day
//! counts as active when any of its tasks is done.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::plan::week_start;
use crate::task::DailyTask;

/// Planned/done counts for one date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub planned: u32,
    pub done: u32,
    /// Done share in percent, rounded
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressReport {
    /// Consecutive days up to today with at least one task done
    pub streak: u32,
    /// Share of this week's tasks that are done (0.0-1.0)
    pub completion_rate: f64,
    pub done_this_week: u32,
    pub planned_this_week: u32,
    /// Per-date summaries, oldest first
    pub days: Vec<DaySummary>,
}

impl ProgressReport {
    /// Compute the report for `today` from whatever tasks the caller loaded.
    pub fn compute(tasks: &[DailyTask], today: NaiveDate) -> Self {
        let mut counts: BTreeMap<NaiveDate, (u32, u32)> = BTreeMap::new();
        for task in tasks {
            let entry = counts.entry(task.date).or_default();
            entry.0 += 1;
            if task.is_done() {
                entry.1 += 1;
            }
        }

        let days: Vec<DaySummary> = counts
            .into_iter()
            .map(|(date, (planned, done))| DaySummary {
                date,
                planned,
                done,
                score: percent(done, planned),
            })
            .collect();

        let monday = week_start(today);
        let (planned_this_week, done_this_week) = days
            .iter()
            .filter(|d| d.date >= monday)
            .fold((0, 0), |(planned, done), d| (planned + d.planned, done + d.done));

        let completion_rate = if planned_this_week > 0 {
            f64::from(done_this_week) / f64::from(planned_this_week)
        } else {
            0.0
        };

        Self {
            streak: streak(&days, today),
            completion_rate,
            done_this_week,
            planned_this_week,
            days,
        }
    }
}

fn percent(done: u32, planned: u32) -> u32 {
    if planned == 0 {
        return 0;
    }
    (f64::from(done) / f64::from(planned) * 100.0).round() as u32
}

/// Walk dates newest first. Each date must sit exactly `streak` days before
/// today and have a done task to extend the run. Dates after today are
/// passed over whatever their status.
fn streak(days: &[DaySummary], today: NaiveDate) -> u32 {
    let mut streak = 0u32;
    for day in days.iter().rev() {
        let diff = (today - day.date).num_days();
        if diff < 0 {
            continue;
        }
        let any_done = day.done > 0;
        if diff == i64::from(streak) && any_done {
            streak += 1;
        } else if diff > i64::from(streak) || !any_done {
            break;
        }
    }
    streak
}
