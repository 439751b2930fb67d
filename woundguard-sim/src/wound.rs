//! Latent wound physiology
//!
//! A single Infection Severity Index (ISI) in [0, 1] drives both measured
//! quantities linearly:
//!
//! ```text
//! pH(t)          = 6.0  + 2.0  * ISI(t)
//! temperature(t) = 36.8 + 1.65 * ISI(t)
//!
//! ISI, infection scenario
//! 0.8 ┤                              ..........
//!     │                     .......
//!     │               ....
//! 0.2 ┤          ┌─'
//! 0.0 ┼──────────┘
//!     0h        48h   (time constant 36h)
//! ```
//!
//! A healing wound sits at a constant ISI of 0.1.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Healthy wound-bed pH at ISI 0
pub const PH_BASE: f32 = 6.0;
/// Body-surface temperature at ISI 0 (°C)
pub const TEMP_BASE_C: f32 = 36.8;
/// pH rise per unit ISI
pub const PH_SENSITIVITY: f32 = 2.0;
/// Temperature rise per unit ISI (°C)
pub const TEMP_SENSITIVITY_C: f32 = 1.65;

/// ISI of a wound that is healing normally
pub const NORMAL_ISI: f32 = 0.1;
/// Hour at which the simulated infection takes hold
pub const INFECTION_ONSET_HOURS: f32 = 48.0;
/// ISI jump at onset
pub const INFECTION_ONSET_ISI: f32 = 0.2;
/// Further ISI gained as the infection saturates
pub const INFECTION_RISE_ISI: f32 = 0.6;
/// Time constant of the infection rise (hours)
pub const INFECTION_TIME_CONSTANT_HOURS: f32 = 36.0;

/// Clinical course being simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Uneventful healing
    Normal,
    /// Infection from day 3 onward
    Infection,
}

impl Scenario {
    /// Both scenarios, normal first
    pub const ALL: [Scenario; 2] = [Scenario::Normal, Scenario::Infection];

    /// Lowercase label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Normal => "normal",
            Scenario::Infection => "infection",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Noise-free ground truth for one wound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WoundModel {
    scenario: Scenario,
}

impl WoundModel {
    /// Model following `scenario`
    pub fn new(scenario: Scenario) -> Self {
        Self { scenario }
    }

    /// Scenario being modelled
    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    /// Infection Severity Index at `t_hours`
    pub fn severity(&self, t_hours: f32) -> f32 {
        match self.scenario {
            Scenario::Normal => NORMAL_ISI,
            Scenario::Infection if t_hours < INFECTION_ONSET_HOURS => 0.0,
            Scenario::Infection => {
                let since_onset = t_hours - INFECTION_ONSET_HOURS;
                INFECTION_ONSET_ISI
                    + INFECTION_RISE_ISI
                        * (1.0 - libm::expf(-since_onset / INFECTION_TIME_CONSTANT_HOURS))
            }
        }
    }

    /// Clean wound-bed pH at `t_hours`
    pub fn ph(&self, t_hours: f32) -> f32 {
        PH_BASE + PH_SENSITIVITY * self.severity(t_hours)
    }

    /// Clean wound-bed temperature at `t_hours` (°C)
    pub fn temperature(&self, t_hours: f32) -> f32 {
        TEMP_BASE_C + TEMP_SENSITIVITY_C * self.severity(t_hours)
    }
}
