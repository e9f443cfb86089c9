pub mod checkin;
pub mod config;
pub mod grocery;
pub mod onboard;
pub mod plan;
pub mod report;
pub mod task;

use chrono::{Local, NaiveDate};

/// The given date, or today in local time.
pub fn date_or_today(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}
