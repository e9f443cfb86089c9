//! Single-day plan generation.

use std::collections::HashSet;

use tracing::debug;

use super::catalog::{
    self, CATALOG, MICRO_MOVEMENT_MIN, MICRO_MOVEMENT_TITLE, PRIMARY_WORKOUT_MIN,
    PRIMARY_WORKOUT_TITLE,
};
use crate::energy::{EnergyWindow, Slot};
use crate::profile::Profile;
use crate::task::{DailyTask, Intensity, TaskType};

/// Minimum slot score that can host a full workout.
pub const WORKOUT_MIN_ENERGY: u8 = 4;

/// Generate the task list for the window's date.
///
/// The workout goes to the highest-ranked slot scoring at least
/// [`WORKOUT_MIN_ENERGY`]; with no such slot it shrinks to a 12-minute walk
/// in the top-ranked slot. Any slot still empty gets a fallback micro-task,
/// so every slot ends up covered. Output is sorted morning to evening and
/// holds at most one task per `(id, slot)`.
///
/// `profile` is accepted for callers that have one but does not change the
/// result.
pub fn generate(energy: &EnergyWindow, profile: Option<&Profile>) -> Vec<DailyTask> {
    let ranked = energy.ranked_slots();
    let mut tasks: Vec<DailyTask> = CATALOG
        .iter()
        .map(|template| template.instantiate(energy.date))
        .collect();

    if let Some(workout) = tasks.iter_mut().find(|t| t.task_type == TaskType::Workout) {
        place_workout(workout, energy, &ranked);
    }

    for slot in ranked {
        if !tasks.iter().any(|t| t.slot == slot) {
            tasks.push(catalog::fallback(slot, energy.date));
        }
    }

    let mut seen: HashSet<(String, Slot)> = HashSet::new();
    tasks.retain(|t| seen.insert((t.id.clone(), t.slot)));

    // stable: catalog order survives within a slot
    tasks.sort_by_key(|t| t.slot);

    debug!(
        date = %energy.date,
        has_profile = profile.is_some(),
        tasks = tasks.len(),
        "generated daily plan"
    );
    tasks
}

fn place_workout(workout: &mut DailyTask, energy: &EnergyWindow, ranked: &[Slot; 3]) {
    let high_slot = ranked
        .iter()
        .copied()
        .find(|slot| energy.score(*slot) >= WORKOUT_MIN_ENERGY);

    match high_slot {
        Some(slot) => {
            workout.slot = slot;
            workout.task_type = TaskType::Workout;
            workout.title = PRIMARY_WORKOUT_TITLE.to_string();
            workout.intensity = Some(Intensity::High);
            workout.duration_min = Some(PRIMARY_WORKOUT_MIN);
            debug!(%slot, score = energy.score(slot), "placed full workout");
        }
        None => {
            let slot = ranked[0];
            workout.slot = slot;
            workout.task_type = TaskType::Micro;
            workout.title = MICRO_MOVEMENT_TITLE.to_string();
            workout.intensity = Some(Intensity::Micro);
            workout.duration_min = Some(MICRO_MOVEMENT_MIN);
            debug!(%slot, score = energy.score(slot), "no high-energy slot, demoted workout");
        }
    }
}
