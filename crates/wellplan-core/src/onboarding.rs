//! Onboarding answers and the profile and first check-in built from them.

use serde::{Deserialize, Serialize};

use crate::energy::estimator::{check_score, validate_wake_time};
use crate::energy::{CheckIn, PreferenceBaseline};
use crate::error::ValidationError;
use crate::profile::{Conditions, Goal, Profile, SleepWake, SleepWindow};

const WEEKDAY_BEDTIME: &str = "22:30";
const WEEKEND_BEDTIME: &str = "23:00";
/// Mood recorded for the synthetic first check-in.
const NEUTRAL_MOOD: u8 = 3;

/// Everything a new user answers during onboarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingAnswers {
    pub name: String,
    pub tz: String,
    pub goal: Goal,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub cycle_phase: Option<String>,
    #[serde(default)]
    pub conditions: Conditions,
    pub morning_energy: i32,
    pub afternoon_energy: i32,
    pub evening_energy: i32,
    pub sleep_hours: f64,
    pub wake_time: String,
}

impl OnboardingAnswers {
    /// Check the answers before anything is stored.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::TooShort {
                field: "name",
                min_len: 1,
            });
        }
        if self.tz.trim().chars().count() < 2 {
            return Err(ValidationError::TooShort {
                field: "tz",
                min_len: 2,
            });
        }
        check_score("morning_energy", self.morning_energy)?;
        check_score("afternoon_energy", self.afternoon_energy)?;
        check_score("evening_energy", self.evening_energy)?;
        if !(4.0..=10.0).contains(&self.sleep_hours) {
            return Err(ValidationError::OutOfRange {
                field: "sleep_hours",
                min: 4.0,
                max: 10.0,
                value: self.sleep_hours,
            });
        }
        validate_wake_time(&self.wake_time)
    }

    pub fn baseline(&self) -> PreferenceBaseline {
        PreferenceBaseline::new(self.morning_energy, self.afternoon_energy, self.evening_energy)
    }

    /// The first check-in, standing in until the user submits a real one.
    ///
    /// Reported energy is the rounded mean of the three slot preferences.
    pub fn initial_checkin(&self) -> CheckIn {
        CheckIn {
            sleep_hours: self.sleep_hours,
            wake_time: self.wake_time.clone(),
            energy: self.baseline().combined().clamp(1, 5) as u8,
            mood: NEUTRAL_MOOD,
        }
    }

    pub fn to_profile(&self) -> Profile {
        let window = |bed: &str| SleepWindow {
            bed: bed.to_string(),
            wake: self.wake_time.clone(),
        };
        Profile {
            name: Some(self.name.trim().to_string()),
            tz: self.tz.trim().to_string(),
            goal: Some(self.goal),
            equipment: self.equipment.clone(),
            cycle_phase: self.cycle_phase.clone().filter(|p| !p.is_empty()),
            sleep_wake: Some(SleepWake {
                weekdays: window(WEEKDAY_BEDTIME),
                weekends: window(WEEKEND_BEDTIME),
            }),
            energy_pref: Some(self.baseline()),
            conditions: self.conditions,
        }
    }
}
