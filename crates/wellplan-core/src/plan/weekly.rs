//! Monday-anchored week plans.

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::daily::generate;
use crate::energy::EnergyWindow;
use crate::profile::Profile;
use crate::task::DailyTask;

/// The generated tasks for one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub tasks: Vec<DailyTask>,
}

/// Seven day plans, Monday through Sunday.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekPlan {
    pub week_start: NaiveDate,
    pub days: Vec<DayPlan>,
}

impl WeekPlan {
    pub fn day(&self, date: NaiveDate) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.date == date)
    }

    pub fn task_count(&self) -> usize {
        self.days.iter().map(|d| d.tasks.len()).sum()
    }
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The seven dates of the week containing `date`, Monday first.
pub fn week_dates(date: NaiveDate) -> Vec<NaiveDate> {
    let monday = week_start(date);
    (0..7).map(|offset| monday + Duration::days(offset)).collect()
}

/// Build the week containing the first window's date.
///
/// With no windows at all the current week is planned from the default
/// baseline.
pub fn build_week(windows: &[EnergyWindow], profile: Option<&Profile>) -> WeekPlan {
    let anchor = windows
        .first()
        .map(|w| w.date)
        .unwrap_or_else(|| Local::now().date_naive());
    build_week_starting(anchor, windows, profile)
}

/// Build the week containing `anchor`.
///
/// Windows are matched to days by date; unsorted input, gaps and dates
/// outside the week are fine. A day without a window is planned from the
/// default `{3, 4, 2}` baseline with no check-in adjustments.
pub fn build_week_starting(
    anchor: NaiveDate,
    windows: &[EnergyWindow],
    profile: Option<&Profile>,
) -> WeekPlan {
    let monday = week_start(anchor);
    let days = week_dates(monday)
        .into_iter()
        .map(|date| {
            let energy = windows
                .iter()
                .find(|w| w.date == date)
                .copied()
                .unwrap_or_else(|| {
                    debug!(%date, "no energy window, using default baseline");
                    EnergyWindow::baseline(date)
                });
            DayPlan {
                date,
                tasks: generate(&energy, profile),
            }
        })
        .collect();

    WeekPlan {
        week_start: monday,
        days,
    }
}
