//! Daily task records produced by the plan generator.
//!
//! A task starts out `planned`. Marking it `done` or `skipped`, or moving it
//! to a different slot, happens after generation through the plan store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::energy::Slot;
use crate::error::ValidationError;

/// Kind of activity a task represents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Workout,
    Meal,
    Micro,
    WindDown,
    Walk,
    MealPrep,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Workout => "workout",
            TaskType::Meal => "meal",
            TaskType::Micro => "micro",
            TaskType::WindDown => "wind_down",
            TaskType::Walk => "walk",
            TaskType::MealPrep => "meal_prep",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "workout" => Ok(TaskType::Workout),
            "meal" => Ok(TaskType::Meal),
            "micro" => Ok(TaskType::Micro),
            "wind_down" => Ok(TaskType::WindDown),
            "walk" => Ok(TaskType::Walk),
            "meal_prep" => Ok(TaskType::MealPrep),
            other => Err(ValidationError::invalid("type", format!("unknown task type '{other}'"))),
        }
    }
}

/// Effort level of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    High,
    Low,
    Micro,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::High => "high",
            Intensity::Low => "low",
            Intensity::Micro => "micro",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Intensity::High),
            "low" => Ok(Intensity::Low),
            "micro" => Ok(Intensity::Micro),
            other => Err(ValidationError::invalid(
                "intensity",
                format!("unknown intensity '{other}'"),
            )),
        }
    }
}

/// Task completion status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Planned,
    Done,
    Skipped,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Planned => "planned",
            TaskStatus::Done => "done",
            TaskStatus::Skipped => "skipped",
        }
    }

    /// Name of the audit event recorded when a task enters this status.
    pub fn event_name(&self) -> &'static str {
        match self {
            TaskStatus::Done => "done",
            TaskStatus::Planned | TaskStatus::Skipped => "status_update",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "planned" => Ok(TaskStatus::Planned),
            "done" => Ok(TaskStatus::Done),
            "skipped" => Ok(TaskStatus::Skipped),
            other => Err(ValidationError::invalid(
                "status",
                format!("expected planned, done or skipped, got '{other}'"),
            )),
        }
    }
}

/// One planned activity for one slot of one day.
///
/// `id` names the catalog entry the task came from, so it repeats across
/// days; the plan store assigns its own row ids on insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyTask {
    pub id: String,
    pub date: NaiveDate,
    pub slot: Slot,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub title: String,
    pub duration_min: Option<u32>,
    pub intensity: Option<Intensity>,
    #[serde(default)]
    pub status: TaskStatus,
}

impl DailyTask {
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}
