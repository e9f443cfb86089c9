//! Check-in driven energy estimation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::window::{clamp_score, EnergyWindow, PreferenceBaseline};
use crate::error::ValidationError;

/// A daily self-report used to adjust the stored baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    /// Hours slept last night
    pub sleep_hours: f64,
    /// Wake time as "HH:MM"
    pub wake_time: String,
    /// Self-reported energy (1-5)
    pub energy: u8,
    /// Self-reported mood (1-5)
    pub mood: u8,
}

impl CheckIn {
    /// Check raw submitted values before they reach the estimator.
    ///
    /// The estimator tolerates anything; this is the gate for user input.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(3.0..=12.0).contains(&self.sleep_hours) {
            return Err(ValidationError::OutOfRange {
                field: "sleep_hours",
                min: 3.0,
                max: 12.0,
                value: self.sleep_hours,
            });
        }
        check_score("energy", self.energy)?;
        check_score("mood", self.mood)?;
        validate_wake_time(&self.wake_time)
    }
}

pub(crate) fn check_score(field: &'static str, value: impl Into<f64>) -> Result<(), ValidationError> {
    let value = value.into();
    if (1.0..=5.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            min: 1.0,
            max: 5.0,
            value,
        })
    }
}

pub(crate) fn validate_wake_time(wake_time: &str) -> Result<(), ValidationError> {
    let complete = wake_time
        .split(':')
        .take(2)
        .filter(|part| !part.trim().is_empty())
        .count()
        == 2;
    match parse_wake_time(wake_time) {
        Some(_) if complete => Ok(()),
        _ => Err(ValidationError::invalid(
            "wake_time",
            format!("expected HH:MM, got '{wake_time}'"),
        )),
    }
}

/// Parse "HH:MM" into minutes past midnight.
///
/// An empty component reads as zero, so "07:" is 07:00. Anything after a
/// second colon is ignored. Returns `None` when the minutes are missing,
/// a component is not a number, or hours/minutes fall outside 0-23/0-59.
pub fn parse_wake_time(wake_time: &str) -> Option<i64> {
    let mut parts = wake_time.split(':');
    let hours = parse_component(parts.next()?, 24)?;
    let minutes = parse_component(parts.next()?, 60)?;
    Some(hours * 60 + minutes)
}

fn parse_component(raw: &str, limit: i64) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    raw.parse::<i64>().ok().filter(|v| (0..limit).contains(v))
}

fn default_target_wake_minutes() -> i64 {
    7 * 60
}
fn default_wake_tolerance_minutes() -> i64 {
    45
}
fn default_rested_sleep_hours() -> f64 {
    7.0
}
fn default_short_sleep_hours() -> f64 {
    6.0
}
fn default_high_energy() -> u8 {
    4
}

/// Thresholds used by [`EnergyEstimator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Wake time (minutes past midnight) that earns the morning bonus
    #[serde(default = "default_target_wake_minutes")]
    pub target_wake_minutes: i64,
    /// Wake must be strictly closer than this to the target
    #[serde(default = "default_wake_tolerance_minutes")]
    pub wake_tolerance_minutes: i64,
    /// Sleep at or above this counts as rested
    #[serde(default = "default_rested_sleep_hours")]
    pub rested_sleep_hours: f64,
    /// Sleep below this costs an evening point
    #[serde(default = "default_short_sleep_hours")]
    pub short_sleep_hours: f64,
    /// Reported energy at or above this lifts the afternoon
    #[serde(default = "default_high_energy")]
    pub high_energy: u8,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            target_wake_minutes: default_target_wake_minutes(),
            wake_tolerance_minutes: default_wake_tolerance_minutes(),
            rested_sleep_hours: default_rested_sleep_hours(),
            short_sleep_hours: default_short_sleep_hours(),
            high_energy: default_high_energy(),
        }
    }
}

/// Maps a check-in onto a baseline to produce the day's energy window.
#[derive(Debug, Clone, Default)]
pub struct EnergyEstimator {
    config: EstimatorConfig,
}

impl EnergyEstimator {
    /// Create an estimator with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an estimator with custom thresholds.
    pub fn with_config(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate the energy window for `date`.
    ///
    /// Adjustments are independent and additive: a well-timed, rested wake
    /// adds a morning point, short sleep costs an evening point, and high
    /// reported energy adds an afternoon point. Scores are clamped to 1-5
    /// last. An unparseable wake time only skips the wake adjustment.
    pub fn estimate(
        &self,
        checkin: &CheckIn,
        baseline: Option<&PreferenceBaseline>,
        date: NaiveDate,
    ) -> EnergyWindow {
        let cfg = &self.config;
        let base = baseline.copied().unwrap_or_default();
        let (mut morning, mut afternoon, mut evening) = (base.morning, base.afternoon, base.evening);

        match parse_wake_time(&checkin.wake_time) {
            Some(wake) => {
                let gap = cfg.target_wake_minutes.abs_diff(wake);
                let on_time = i128::from(gap) < i128::from(cfg.wake_tolerance_minutes);
                if on_time && checkin.sleep_hours >= cfg.rested_sleep_hours {
                    morning = morning.saturating_add(1);
                }
            }
            None => debug!(
                wake_time = %checkin.wake_time,
                "unparseable wake time, skipping wake adjustment"
            ),
        }

        if checkin.sleep_hours < cfg.short_sleep_hours {
            evening = evening.saturating_sub(1);
        }

        if checkin.energy >= cfg.high_energy {
            afternoon = afternoon.saturating_add(1);
        }

        let window = EnergyWindow {
            date,
            morning: clamp_score(morning),
            afternoon: clamp_score(afternoon),
            evening: clamp_score(evening),
        };
        debug!(
            %date,
            morning = window.morning,
            afternoon = window.afternoon,
            evening = window.evening,
            "estimated energy window"
        );
        window
    }
}

/// Estimate with the default thresholds.
pub fn estimate(
    checkin: &CheckIn,
    baseline: Option<&PreferenceBaseline>,
    date: NaiveDate,
) -> EnergyWindow {
    EnergyEstimator::new().estimate(checkin, baseline, date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()
    }

    fn checkin(sleep_hours: f64, wake_time: &str, energy: u8) -> CheckIn {
        CheckIn {
            sleep_hours,
            wake_time: wake_time.to_string(),
            energy,
            mood: 3,
        }
    }

    #[test]
    fn rested_on_time_high_energy() {
        let baseline = PreferenceBaseline::new(3, 4, 2);
        let window = estimate(&checkin(7.5, "07:00", 4), Some(&baseline), day());
        assert_eq!(window, EnergyWindow::new(day(), 4, 5, 2));
    }

    #[test]
    fn short_sleep_late_wake_uses_default_baseline() {
        let window = estimate(&checkin(5.0, "09:00", 2), None, day());
        assert_eq!(window, EnergyWindow::new(day(), 3, 4, 1));
    }

    #[test]
    fn wake_tolerance_is_strict() {
        // 07:45 is exactly 45 minutes away and earns nothing
        let window = estimate(&checkin(8.0, "07:45", 2), None, day());
        assert_eq!(window.morning, 3);

        let window = estimate(&checkin(8.0, "06:16", 2), None, day());
        assert_eq!(window.morning, 4);
    }

    #[test]
    fn wake_bonus_needs_enough_sleep() {
        let window = estimate(&checkin(6.5, "07:00", 2), None, day());
        assert_eq!(window.morning, 3);
    }

    #[test]
    fn unparseable_wake_time_only_skips_wake_rule() {
        let window = estimate(&checkin(5.0, "soon", 5), None, day());
        assert_eq!(window, EnergyWindow::new(day(), 3, 5, 1));
    }

    #[test]
    fn scores_are_clamped() {
        let baseline = PreferenceBaseline::new(5, 5, 1);
        let window = estimate(&checkin(8.0, "07:10", 5), Some(&baseline), day());
        assert_eq!(window, EnergyWindow::new(day(), 5, 5, 1));

        let window = estimate(&checkin(4.0, "07:10", 1), Some(&baseline), day());
        assert_eq!(window.evening, 1);
    }

    #[test]
    fn custom_thresholds_apply() {
        let estimator = EnergyEstimator::with_config(EstimatorConfig {
            target_wake_minutes: 6 * 60,
            high_energy: 5,
            ..Default::default()
        });
        let window = estimator.estimate(&checkin(8.0, "06:00", 4), None, day());
        assert_eq!(window, EnergyWindow::new(day(), 4, 4, 2));
    }

    #[test]
    fn parse_wake_time_variants() {
        assert_eq!(parse_wake_time("07:00"), Some(420));
        assert_eq!(parse_wake_time("6:30"), Some(390));
        assert_eq!(parse_wake_time("06:30:15"), Some(390));
        assert_eq!(parse_wake_time("07:"), Some(420));
        assert_eq!(parse_wake_time(":30"), Some(30));
        assert_eq!(parse_wake_time("0630"), None);
        assert_eq!(parse_wake_time("24:00"), None);
        assert_eq!(parse_wake_time("07:60"), None);
        assert_eq!(parse_wake_time("ab:cd"), None);
        assert_eq!(parse_wake_time(""), None);
    }

    #[test]
    fn huge_wake_components_are_rejected_not_overflowed() {
        let late = checkin(8.0, "9223372036854775807:00", 4);
        assert_eq!(parse_wake_time(&late.wake_time), None);
        assert_eq!(estimate(&late, None, day()), EnergyWindow::new(day(), 3, 5, 2));
        assert!(late.validate().is_err());

        assert!(checkin(8.0, "07:9223372036854775807", 4).validate().is_err());
        assert!(checkin(8.0, "-9223372036854775808:00", 4).validate().is_err());
    }

    #[test]
    fn trailing_colon_still_earns_wake_bonus() {
        let window = estimate(&checkin(8.0, "07:", 2), None, day());
        assert_eq!(window.morning, 4);
        // validation still wants both components
        assert!(checkin(8.0, "07:", 2).validate().is_err());
    }

    #[test]
    fn extreme_baselines_saturate_to_bounds() {
        let high = PreferenceBaseline::new(i32::MAX, i32::MAX, i32::MAX);
        let window = estimate(&checkin(8.0, "07:00", 5), Some(&high), day());
        assert_eq!(window, EnergyWindow::new(day(), 5, 5, 5));

        let far_target = EnergyEstimator::with_config(EstimatorConfig {
            target_wake_minutes: i64::MIN,
            wake_tolerance_minutes: i64::MAX,
            ..Default::default()
        });
        let window = far_target.estimate(&checkin(8.0, "07:00", 2), None, day());
        assert_eq!(window.morning, 3);

        let low = PreferenceBaseline::new(i32::MIN, i32::MIN, i32::MIN);
        let window = estimate(&checkin(4.0, "07:00", 5), Some(&low), day());
        assert_eq!(window, EnergyWindow::new(day(), 1, 1, 1));
    }

    #[test]
    fn validate_accepts_typical_checkin() {
        assert!(checkin(7.0, "06:45", 3).validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        assert!(matches!(
            checkin(2.0, "07:00", 3).validate(),
            Err(ValidationError::OutOfRange { field: "sleep_hours", .. })
        ));
        assert!(matches!(
            checkin(7.0, "07:00", 0).validate(),
            Err(ValidationError::OutOfRange { field: "energy", .. })
        ));
        let mut bad_mood = checkin(7.0, "07:00", 3);
        bad_mood.mood = 6;
        assert!(bad_mood.validate().is_err());
        assert!(checkin(7.0, "25:00", 3).validate().is_err());
        assert!(checkin(7.0, "later", 3).validate().is_err());
    }

    proptest! {
        #[test]
        fn every_score_stays_in_range(
            sleep_hours in 0.0f64..16.0,
            hour in 0u32..24,
            minute in 0u32..60,
            energy in 1u8..=5,
            mood in 1u8..=5,
            morning in -10i32..10,
            afternoon in -10i32..10,
            evening in -10i32..10,
        ) {
            let checkin = CheckIn {
                sleep_hours,
                wake_time: format!("{hour:02}:{minute:02}"),
                energy,
                mood,
            };
            let baseline = PreferenceBaseline::new(morning, afternoon, evening);
            let window = estimate(&checkin, Some(&baseline), day());
            for score in [window.morning, window.afternoon, window.evening] {
                prop_assert!((1..=5).contains(&score));
            }
        }
    }
}
