//! # Wellplan Core Library
//!
//! This library provides the planning logic behind Wellplan, a personal
//! wellness planner. A morning check-in (sleep, wake time, self-reported
//! energy) is turned into per-slot energy scores, and those scores drive a
//! small deterministic heuristic that lays out the day's workout, meal and
//! recovery tasks. Seven such days make a week.
//!
//! ## Architecture
//!
//! - **Energy**: check-in parsing, validation and the [`EnergyEstimator`]
//! - **Plan**: the pure [`generate`] and [`build_week`] functions
//! - **Storage**: SQLite plan store and TOML-based configuration
//! - **Workflow**: check-in, onboarding and auto-slot flows that connect the
//!   engine to the store
//!
//! The plan engine itself never touches the filesystem or the clock except
//! for [`build_week`] falling back to today when it is handed no windows.

pub mod energy;
pub mod error;
pub mod grocery;
pub mod onboarding;
pub mod plan;
pub mod profile;
pub mod report;
pub mod storage;
pub mod task;
pub mod workflow;

pub use energy::{
    estimate, parse_wake_time, CheckIn, EnergyEstimator, EnergyWindow, EstimatorConfig,
    PreferenceBaseline, Slot,
};
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use grocery::{build_grocery_list, GroceryItem, Macros, MealPreset};
pub use onboarding::OnboardingAnswers;
pub use plan::{build_week, build_week_starting, generate, week_start, DayPlan, WeekPlan};
pub use profile::{Conditions, Goal, Profile, SleepWake, SleepWindow};
pub use report::{DaySummary, ProgressReport};
pub use storage::{Config, Database, StoredTask};
pub use task::{DailyTask, Intensity, TaskStatus, TaskType};
