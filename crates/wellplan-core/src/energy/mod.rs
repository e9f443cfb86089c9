//! Energy window estimation.
//!
//! This module turns a daily check-in plus the user's stored per-slot
//! preferences into an [`EnergyWindow`]: three integer scores (morning,
//! afternoon, evening) in the range 1-5.

pub(crate) mod estimator;
mod window;

pub use estimator::{estimate, parse_wake_time, CheckIn, EnergyEstimator, EstimatorConfig};
pub use window::{clamp_score, EnergyWindow, PreferenceBaseline, Slot, MAX_SCORE, MIN_SCORE};
