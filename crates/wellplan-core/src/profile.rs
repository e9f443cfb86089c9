//! User profile stored alongside the plan.
//!
//! The plan generator accepts a profile but does not read it yet; only the
//! energy preferences feed the estimator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::energy::PreferenceBaseline;
use crate::error::ValidationError;

/// Training goal chosen during onboarding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    FatLoss,
    Recomp,
    Glute,
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Goal::FatLoss => "fat_loss",
            Goal::Recomp => "recomp",
            Goal::Glute => "glute",
        })
    }
}

impl FromStr for Goal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fat_loss" => Ok(Goal::FatLoss),
            "recomp" => Ok(Goal::Recomp),
            "glute" => Ok(Goal::Glute),
            other => Err(ValidationError::invalid(
                "goal",
                format!("expected fat_loss, recomp or glute, got '{other}'"),
            )),
        }
    }
}

/// Bed and wake times for one kind of day, both "HH:MM".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SleepWindow {
    pub bed: String,
    pub wake: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SleepWake {
    pub weekdays: SleepWindow,
    pub weekends: SleepWindow,
}

/// Health condition toggles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Conditions {
    #[serde(default)]
    pub postpartum: bool,
    /// Insulin resistance
    #[serde(default)]
    pub ir: bool,
    #[serde(default)]
    pub hashimoto: bool,
    #[serde(default)]
    pub pcos: bool,
}

fn default_tz() -> String {
    "UTC".to_string()
}

/// A user's stored profile.
///
/// Plain values come before nested tables so the record serializes cleanly
/// to TOML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_tz")]
    pub tz: String,
    #[serde(default)]
    pub goal: Option<Goal>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub cycle_phase: Option<String>,
    #[serde(default)]
    pub sleep_wake: Option<SleepWake>,
    #[serde(default)]
    pub energy_pref: Option<PreferenceBaseline>,
    #[serde(default)]
    pub conditions: Conditions,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: None,
            tz: default_tz(),
            goal: None,
            equipment: Vec::new(),
            cycle_phase: None,
            sleep_wake: None,
            energy_pref: None,
            conditions: Conditions::default(),
        }
    }
}

impl Profile {
    /// Baseline handed to the estimator, `None` when the user never set one.
    pub fn baseline(&self) -> Option<&PreferenceBaseline> {
        self.energy_pref.as_ref()
    }

    /// Whether onboarding has been completed.
    pub fn is_onboarded(&self) -> bool {
        self.name.is_some() && self.energy_pref.is_some()
    }
}
