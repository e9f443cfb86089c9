//! Slots, preference baselines and energy windows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Lowest energy score a window can hold.
pub const MIN_SCORE: u8 = 1;
/// Highest energy score a window can hold.
pub const MAX_SCORE: u8 = 5;

/// One of the three fixed parts of a day.
///
/// Variant order is day order; `Ord` relies on it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Morning,
    Afternoon,
    Evening,
}

impl Slot {
    /// All slots in day order. Also the tie-break priority when ranking.
    pub const ALL: [Slot; 3] = [Slot::Morning, Slot::Afternoon, Slot::Evening];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Morning => "morning",
            Slot::Afternoon => "afternoon",
            Slot::Evening => "evening",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(Slot::Morning),
            "afternoon" => Ok(Slot::Afternoon),
            "evening" => Ok(Slot::Evening),
            other => Err(ValidationError::invalid(
                "slot",
                format!("expected morning, afternoon or evening, got '{other}'"),
            )),
        }
    }
}

fn default_morning() -> i32 {
    3
}
fn default_afternoon() -> i32 {
    4
}
fn default_evening() -> i32 {
    2
}

/// Per-slot energy baseline stored on the user's profile.
///
/// Fields missing from a stored record fall back to their defaults one by
/// one, so `{ morning = 5 }` reads as `{5, 4, 2}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreferenceBaseline {
    #[serde(default = "default_morning")]
    pub morning: i32,
    #[serde(default = "default_afternoon")]
    pub afternoon: i32,
    #[serde(default = "default_evening")]
    pub evening: i32,
}

impl Default for PreferenceBaseline {
    fn default() -> Self {
        Self {
            morning: default_morning(),
            afternoon: default_afternoon(),
            evening: default_evening(),
        }
    }
}

impl PreferenceBaseline {
    pub fn new(morning: i32, afternoon: i32, evening: i32) -> Self {
        Self {
            morning,
            afternoon,
            evening,
        }
    }

    pub fn get(&self, slot: Slot) -> i32 {
        match slot {
            Slot::Morning => self.morning,
            Slot::Afternoon => self.afternoon,
            Slot::Evening => self.evening,
        }
    }

    /// Mean of the three slot values, rounded half away from zero.
    pub fn combined(&self) -> i32 {
        let sum = self.morning + self.afternoon + self.evening;
        (f64::from(sum) / 3.0).round() as i32
    }
}

/// Clamp a raw score into `[MIN_SCORE, MAX_SCORE]`.
pub fn clamp_score(value: i32) -> u8 {
    value.clamp(i32::from(MIN_SCORE), i32::from(MAX_SCORE)) as u8
}

/// Expected capacity for each slot of one calendar day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnergyWindow {
    pub date: NaiveDate,
    pub morning: u8,
    pub afternoon: u8,
    pub evening: u8,
}

impl EnergyWindow {
    pub fn new(date: NaiveDate, morning: u8, afternoon: u8, evening: u8) -> Self {
        Self {
            date,
            morning,
            afternoon,
            evening,
        }
    }

    /// Window built straight from a baseline, no check-in adjustments.
    pub fn from_baseline(date: NaiveDate, baseline: &PreferenceBaseline) -> Self {
        Self {
            date,
            morning: clamp_score(baseline.morning),
            afternoon: clamp_score(baseline.afternoon),
            evening: clamp_score(baseline.evening),
        }
    }

    /// Window built from the default `{3, 4, 2}` baseline.
    pub fn baseline(date: NaiveDate) -> Self {
        Self::from_baseline(date, &PreferenceBaseline::default())
    }

    pub fn score(&self, slot: Slot) -> u8 {
        match slot {
            Slot::Morning => self.morning,
            Slot::Afternoon => self.afternoon,
            Slot::Evening => self.evening,
        }
    }

    /// Slots ordered by score, highest first.
    ///
    /// Equal scores keep day order, so morning wins over afternoon and
    /// afternoon over evening.
    pub fn ranked_slots(&self) -> [Slot; 3] {
        let mut slots = Slot::ALL;
        // stable sort keeps the tie-break order
        slots.sort_by(|a, b| self.score(*b).cmp(&self.score(*a)));
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()
    }

    #[test]
    fn slot_parse_and_display() {
        assert_eq!("Evening".parse::<Slot>().unwrap(), Slot::Evening);
        assert_eq!(Slot::Afternoon.to_string(), "afternoon");
        assert!("noon".parse::<Slot>().is_err());
    }

    #[test]
    fn slot_order_is_day_order() {
        let mut slots = vec![Slot::Evening, Slot::Morning, Slot::Afternoon];
        slots.sort();
        assert_eq!(slots, Slot::ALL.to_vec());
    }

    #[test]
    fn baseline_defaults_fill_missing_fields() {
        let baseline: PreferenceBaseline = serde_json::from_str(r#"{"morning": 5}"#).unwrap();
        assert_eq!(baseline, PreferenceBaseline::new(5, 4, 2));
    }

    #[test]
    fn combined_rounds_half_away_from_zero() {
        // 3 + 4 + 2 = 9 -> 3.0
        assert_eq!(PreferenceBaseline::default().combined(), 3);
        // 2 + 3 + 2 = 7 -> 2.33
        assert_eq!(PreferenceBaseline::new(2, 3, 2).combined(), 2);
        // 3 + 3 + 2 = 8 -> 2.67
        assert_eq!(PreferenceBaseline::new(3, 3, 2).combined(), 3);
        // -5 / 3 -> -1.67
        assert_eq!(PreferenceBaseline::new(-1, -2, -2).combined(), -2);
    }

    #[test]
    fn clamp_truncates_to_bounds() {
        assert_eq!(clamp_score(-3), 1);
        assert_eq!(clamp_score(0), 1);
        assert_eq!(clamp_score(3), 3);
        assert_eq!(clamp_score(9), 5);
    }

    #[test]
    fn ranked_slots_sorts_by_score_descending() {
        let window = EnergyWindow::new(day(), 2, 3, 5);
        assert_eq!(
            window.ranked_slots(),
            [Slot::Evening, Slot::Afternoon, Slot::Morning]
        );
    }

    #[test]
    fn ranked_slots_breaks_ties_in_day_order() {
        let window = EnergyWindow::new(day(), 4, 4, 4);
        assert_eq!(window.ranked_slots(), Slot::ALL);

        let window = EnergyWindow::new(day(), 1, 3, 3);
        assert_eq!(
            window.ranked_slots(),
            [Slot::Afternoon, Slot::Evening, Slot::Morning]
        );
    }

    #[test]
    fn from_baseline_clamps_out_of_range_preferences() {
        let window = EnergyWindow::from_baseline(day(), &PreferenceBaseline::new(7, 0, 3));
        assert_eq!((window.morning, window.afternoon, window.evening), (5, 1, 3));
    }
}
