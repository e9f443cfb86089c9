//! Static task tables: the four base archetypes and the per-slot fallbacks.

use chrono::NaiveDate;

use crate::energy::Slot;
use crate::task::{DailyTask, Intensity, TaskStatus, TaskType};

#[derive(Debug, Clone, Copy)]
pub(crate) struct TaskTemplate {
    pub id: &'static str,
    pub slot: Slot,
    pub task_type: TaskType,
    pub title: &'static str,
    pub duration_min: Option<u32>,
    pub intensity: Option<Intensity>,
}

impl TaskTemplate {
    pub fn instantiate(&self, date: NaiveDate) -> DailyTask {
        DailyTask {
            id: self.id.to_string(),
            date,
            slot: self.slot,
            task_type: self.task_type,
            title: self.title.to_string(),
            duration_min: self.duration_min,
            intensity: self.intensity,
            status: TaskStatus::Planned,
        }
    }
}

pub(crate) const CATALOG: [TaskTemplate; 4] = [
    TaskTemplate {
        id: "workout",
        slot: Slot::Morning,
        task_type: TaskType::Workout,
        title: PRIMARY_WORKOUT_TITLE,
        duration_min: Some(PRIMARY_WORKOUT_MIN),
        intensity: Some(Intensity::High),
    },
    TaskTemplate {
        id: "meal",
        slot: Slot::Afternoon,
        task_type: TaskType::Meal,
        title: "Preset meal",
        duration_min: None,
        intensity: None,
    },
    TaskTemplate {
        id: "micro",
        slot: Slot::Evening,
        task_type: TaskType::Micro,
        title: "Micro habit",
        duration_min: Some(5),
        intensity: Some(Intensity::Micro),
    },
    TaskTemplate {
        id: "wind-down",
        slot: Slot::Evening,
        task_type: TaskType::WindDown,
        title: "Evening wind-down",
        duration_min: Some(10),
        intensity: Some(Intensity::Low),
    },
];

pub(crate) const PRIMARY_WORKOUT_TITLE: &str = "Primary workout";
pub(crate) const PRIMARY_WORKOUT_MIN: u32 = 28;
pub(crate) const MICRO_MOVEMENT_TITLE: &str = "Micro movement: 12-min walk";
pub(crate) const MICRO_MOVEMENT_MIN: u32 = 12;

const FALLBACKS: [TaskTemplate; 3] = [
    TaskTemplate {
        id: "micro-morning",
        slot: Slot::Morning,
        task_type: TaskType::Micro,
        title: "2-min sunlight + mobility",
        duration_min: Some(5),
        intensity: Some(Intensity::Micro),
    },
    TaskTemplate {
        id: "micro-afternoon",
        slot: Slot::Afternoon,
        task_type: TaskType::Micro,
        title: "Stand + stretch break",
        duration_min: Some(5),
        intensity: Some(Intensity::Micro),
    },
    TaskTemplate {
        id: "micro-evening",
        slot: Slot::Evening,
        task_type: TaskType::WindDown,
        title: "Wind-down breathwork (6 min)",
        duration_min: Some(6),
        intensity: Some(Intensity::Low),
    },
];

/// Fallback task for an empty slot, id suffixed with the slot name.
pub(crate) fn fallback(slot: Slot, date: NaiveDate) -> DailyTask {
    let template = FALLBACKS
        .iter()
        .find(|t| t.slot == slot)
        .unwrap_or(&FALLBACKS[0]);
    let mut task = template.instantiate(date);
    task.id = format!("{}-{}", template.id, slot);
    task
}
