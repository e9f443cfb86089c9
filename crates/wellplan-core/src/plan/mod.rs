//! Daily and weekly plan generation.
//!
//! Both entry points are pure: they read their arguments, allocate fresh
//! task records and return them. Persisting a plan is the caller's job.

mod catalog;
mod daily;
mod weekly;

pub use daily::{generate, WORKOUT_MIN_ENERGY};
pub use weekly::{build_week, build_week_starting, week_dates, week_start, DayPlan, WeekPlan};
